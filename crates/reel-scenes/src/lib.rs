//! # Reel Scenes
//!
//! The motion-graphics compositions of the exam-prep promo: exam cards,
//! paper to digital, the brand outro, and the episode timeline joining them.
//! All render at 1080x1920, 30 fps.

pub mod brand_outro;
pub mod catalog;
pub mod components;
pub mod design;
pub mod exam_cards;
pub mod paper_to_digital;

pub use brand_outro::{BrandOutroCopy, BrandOutroScene};
pub use catalog::{ep4_full, registry, EP4_ID};
pub use design::{Brand, DesignTokens, ExamCardSpec, SceneCopy};
pub use exam_cards::{ExamCardsCopy, ExamCardsScene};
pub use paper_to_digital::{PaperToDigitalCopy, PaperToDigitalScene};

pub const WIDTH: u32 = 1080;
pub const HEIGHT: u32 = 1920;
pub const FPS: u32 = 30;
