use super::{tint, SLATE_400, SLATE_800};
use crate::design::ExamCardSpec;
use reel_core::pattern::float_offset;
use reel_core::{
    lerp, Color, Fill, Frame, Interpolation, NodeId, Result, Spring, SpringConfig, Transform,
    VisualNode, VisualTree,
};

const COMING_SOON_BADGE: &str = "🔜 即將上線";

/// A single exam category card with a springy entrance, a gentle bob once
/// it lands, and a shine that sweeps across the face.
#[derive(Clone, Debug)]
pub struct ExamCard {
    spec: ExamCardSpec,
    index: usize,
    fps: u32,
    appear: Spring,
    shine: Interpolation,
}

impl ExamCard {
    pub const WIDTH: f32 = 280.0;
    pub const HEIGHT: f32 = 220.0;

    /// Card `index` of a grid; its entrance starts at frame `delay`.
    pub fn new(spec: ExamCardSpec, index: usize, delay: Frame, fps: u32) -> Result<Self> {
        let appear = Spring::new(SpringConfig::new(200.0, 12.0, 0.8)?)?.delayed(delay);
        let shine = Interpolation::new([0.0, 20.0], [-100.0, 200.0])?.clamped();
        Ok(Self {
            spec,
            index,
            fps,
            appear,
            shine,
        })
    }

    pub fn spec(&self) -> &ExamCardSpec {
        &self.spec
    }

    pub fn delay(&self) -> Frame {
        self.appear.delay()
    }

    /// Entrance progress at `frame`.
    pub fn appear(&self, frame: Frame) -> f32 {
        self.appear.progress(frame, self.fps)
    }

    /// Shine sweep position as a percentage of the card width.
    pub fn shine_offset(&self, frame: Frame) -> f32 {
        self.shine.eval((frame - self.delay() - 10) as f32)
    }

    /// Appends the card under `parent` with its layout origin at `(x, y)`.
    pub fn render_into(
        &self,
        tree: &mut VisualTree,
        parent: NodeId,
        x: f32,
        y: f32,
        frame: Frame,
    ) -> NodeId {
        let appear = self.appear(frame);
        let bob = float_offset(
            (frame - self.delay()) as f32,
            0.04,
            self.index as f32 * 1.2,
            3.0,
        );
        let transform = Transform::new()
            .with_translate(0.0, lerp(appear, 60.0, 0.0) + bob)
            .with_scale(lerp(appear, 0.3, 1.0))
            .with_rotation(lerp(appear, -8.0, 0.0));

        let spec = &self.spec;
        let card = tree.append(
            parent,
            VisualNode::group(format!("card:{}", spec.id))
                .at(x, y)
                .opacity(appear)
                .transform(transform),
        );

        tree.append(
            card,
            VisualNode::rect("glow", Self::WIDTH + 40.0, Self::HEIGHT + 40.0)
                .at(-20.0, -20.0)
                .rounded(40.0)
                .fill(Fill::radial([(spec.glow, 0.0), (Color::TRANSPARENT, 0.7)]))
                .blur(20.0)
                .opacity(appear * 0.6),
        );

        let body = tree.append(
            card,
            VisualNode::rect("body", Self::WIDTH, Self::HEIGHT)
                .rounded(24.0)
                .fill(Fill::solid(Color::WHITE.with_alpha(0.95)))
                .stroke(tint(spec.color, 0x40), 3.0),
        );

        tree.append(
            body,
            VisualNode::rect("shine", Self::WIDTH * 0.4, Self::HEIGHT)
                .at(self.shine_offset(frame) / 100.0 * Self::WIDTH, 0.0)
                .fill(Fill::linear(
                    90.0,
                    [
                        (Color::TRANSPARENT, 0.0),
                        (Color::WHITE.with_alpha(0.4), 0.5),
                        (Color::TRANSPARENT, 1.0),
                    ],
                ))
                .transform(Transform::new().with_skew_x(-20.0)),
        );

        let icon = tree.append(
            body,
            VisualNode::ellipse("icon", 80.0, 80.0)
                .at((Self::WIDTH - 80.0) / 2.0, 28.0)
                .fill(Fill::linear(
                    135.0,
                    [(tint(spec.color, 0x15), 0.0), (tint(spec.color, 0x30), 1.0)],
                )),
        );
        tree.append(icon, VisualNode::text("glyph", spec.icon.as_str(), 42.0).at(40.0, 40.0));

        tree.append(
            body,
            VisualNode::text("name", spec.name.as_str(), 26.0)
                .at(Self::WIDTH / 2.0, 124.0)
                .fill(Fill::solid(SLATE_800)),
        );

        let (label_color, badge_fill) = if spec.coming_soon {
            (SLATE_400, Color::rgba(0xf1, 0xf5, 0xf9, 0x20))
        } else {
            (spec.color, tint(spec.color, 0x12))
        };
        let badge = VisualNode::rect("badge", 120.0, 26.0)
            .at((Self::WIDTH - 120.0) / 2.0, 170.0)
            .rounded(20.0)
            .fill(Fill::solid(badge_fill));
        let badge = if spec.coming_soon {
            badge.dashed_stroke(Color::rgb(0xcb, 0xd5, 0xe1), 1.5)
        } else {
            badge.stroke(tint(spec.color, 0x30), 1.5)
        };
        let badge = tree.append(body, badge);
        tree.append(
            badge,
            VisualNode::text("label", spec.label.as_str(), 13.0)
                .at(60.0, 13.0)
                .fill(Fill::solid(label_color)),
        );

        if spec.coming_soon {
            let ribbon = tree.append(
                body,
                VisualNode::rect("coming-soon", 96.0, 22.0)
                    .at(Self::WIDTH - 12.0 - 96.0, 12.0)
                    .rounded(8.0)
                    .fill(Fill::solid(Color::rgb(0xed, 0xe9, 0xfe))),
            );
            tree.append(
                ribbon,
                VisualNode::text("coming-soon-text", COMING_SOON_BADGE, 10.0)
                    .at(48.0, 11.0)
                    .fill(Fill::solid(Color::rgb(0x8b, 0x5c, 0xf6))),
            );
        }

        card
    }
}
