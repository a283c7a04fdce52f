//! Reusable pieces shared by the scenes. Each component is built once from
//! configuration and renders into a caller-provided tree at an explicit frame.

mod exam_card;
mod paper_sheet;
mod phone;

pub use exam_card::ExamCard;
pub use paper_sheet::{PaperSheet, Scatter, SheetPose};
pub use phone::{MiniCard, PhoneMockup};

use reel_core::Color;

/// `color` with its alpha channel replaced, as in `#rrggbb` + `aa` notation.
pub(crate) fn tint(color: Color, alpha: u8) -> Color {
    Color { a: alpha, ..color }
}

pub(crate) const SLATE_800: Color = Color::rgb(0x1e, 0x29, 0x3b);
pub(crate) const SLATE_400: Color = Color::rgb(0x94, 0xa3, 0xb8);
