use super::{tint, SLATE_400};
use crate::design::ExamCardSpec;
use reel_core::{
    lerp, Color, Fill, Frame, Interpolation, NodeId, Result, Spring, SpringConfig, Transform,
    VisualNode, VisualTree,
};

/// A compact exam tile on the phone screen.
#[derive(Clone, Debug, PartialEq)]
pub struct MiniCard {
    pub icon: String,
    pub name: String,
    pub color: Color,
}

impl From<&ExamCardSpec> for MiniCard {
    fn from(spec: &ExamCardSpec) -> Self {
        Self {
            icon: spec.icon.clone(),
            name: spec.name.clone(),
            color: spec.color,
        }
    }
}

/// Phone frame showing the app's exam picker. Tiles pop in one after another
/// and a shimmer crosses the screen.
#[derive(Clone, Debug)]
pub struct PhoneMockup {
    app_name: String,
    section_title: String,
    accent: Color,
    cards: Vec<(MiniCard, Spring)>,
    shimmer: Interpolation,
    reveal: Frame,
    fps: u32,
}

impl PhoneMockup {
    pub const WIDTH: f32 = 340.0;
    pub const HEIGHT: f32 = 700.0;
    const BEZEL: f32 = 12.0;
    const TILE_GAP: f32 = 8.0;
    const TILE_HEIGHT: f32 = 48.0;

    /// Screen content starts revealing at `reveal`; tile `i` follows `5 * i` frames later.
    pub fn new(
        app_name: impl Into<String>,
        section_title: impl Into<String>,
        accent: Color,
        cards: impl IntoIterator<Item = MiniCard>,
        reveal: Frame,
        fps: u32,
    ) -> Result<Self> {
        let config = SpringConfig::new(180.0, 12.0, 1.0)?;
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| {
                Spring::new(config).map(|spring| (card, spring.delayed(reveal + i as Frame * 5)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            app_name: app_name.into(),
            section_title: section_title.into(),
            accent,
            cards,
            shimmer: Interpolation::new([0.0, 40.0], [-50.0, 150.0])?.clamped(),
            reveal,
            fps,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Entrance progress of tile `index`.
    pub fn tile_appear(&self, index: usize, frame: Frame) -> Option<f32> {
        self.cards
            .get(index)
            .map(|(_, spring)| spring.progress(frame, self.fps))
    }

    /// Shimmer band center as a percentage across the screen.
    pub fn shimmer(&self, frame: Frame) -> f32 {
        self.shimmer.eval((frame - self.reveal) as f32)
    }

    pub fn render_into(&self, tree: &mut VisualTree, parent: NodeId, frame: Frame) -> NodeId {
        let screen_w = Self::WIDTH - Self::BEZEL * 2.0;
        let screen_h = Self::HEIGHT - Self::BEZEL * 2.0;

        let phone = tree.append(
            parent,
            VisualNode::rect("phone", Self::WIDTH, Self::HEIGHT)
                .rounded(44.0)
                .fill(Fill::solid(Color::rgb(0x1a, 0x1a, 0x1a))),
        );

        let screen = tree.append(
            phone,
            VisualNode::rect("screen", screen_w, screen_h)
                .at(Self::BEZEL, Self::BEZEL)
                .rounded(34.0)
                .fill(Fill::linear(
                    180.0,
                    [
                        (Color::rgb(0x0f, 0x17, 0x2a), 0.0),
                        (Color::rgb(0x1e, 0x29, 0x3b), 1.0),
                    ],
                )),
        );

        tree.append(
            screen,
            VisualNode::text("app-icon", "🚀", 24.0).at(20.0, 50.0),
        );
        tree.append(
            screen,
            VisualNode::text("app-name", self.app_name.as_str(), 18.0)
                .at(52.0, 52.0)
                .fill(Fill::solid(Color::WHITE)),
        );
        let avatar = tree.append(
            screen,
            VisualNode::ellipse("avatar", 32.0, 32.0)
                .at(screen_w - 20.0 - 32.0, 46.0)
                .fill(Fill::solid(self.accent)),
        );
        tree.append(
            avatar,
            VisualNode::text("avatar-glyph", "👤", 14.0).at(16.0, 16.0),
        );

        tree.append(
            screen,
            VisualNode::text("section", self.section_title.as_str(), 14.0)
                .at(16.0, 98.0)
                .fill(Fill::solid(SLATE_400)),
        );

        let tile_w = (screen_w - 32.0 - Self::TILE_GAP) / 2.0;
        for (i, (card, spring)) in self.cards.iter().enumerate() {
            let appear = spring.progress(frame, self.fps);
            let (col, row) = ((i % 2) as f32, (i / 2) as f32);
            let tile = tree.append(
                screen,
                VisualNode::rect(format!("tile:{i}"), tile_w, Self::TILE_HEIGHT)
                    .at(
                        16.0 + col * (tile_w + Self::TILE_GAP),
                        124.0 + row * (Self::TILE_HEIGHT + Self::TILE_GAP),
                    )
                    .rounded(12.0)
                    .fill(Fill::solid(Color::WHITE.with_alpha(0.05)))
                    .stroke(tint(card.color, 0x30), 1.0)
                    .opacity(appear)
                    .transform(Transform::new().with_scale(lerp(appear, 0.8, 1.0))),
            );
            let badge = tree.append(
                tile,
                VisualNode::rect("tile-icon", 28.0, 28.0)
                    .at(8.0, 10.0)
                    .rounded(8.0)
                    .fill(Fill::solid(tint(card.color, 0x20))),
            );
            tree.append(
                badge,
                VisualNode::text("tile-glyph", card.icon.as_str(), 14.0).at(14.0, 14.0),
            );
            tree.append(
                tile,
                VisualNode::text("tile-name", card.name.as_str(), 11.0)
                    .at(44.0, 24.0)
                    .fill(Fill::solid(Color::rgb(0xe2, 0xe8, 0xf0))),
            );
        }

        let center = self.shimmer(frame) / 100.0;
        let stop = |offset: f32| offset.clamp(0.0, 1.0);
        tree.append(
            screen,
            VisualNode::rect("shimmer", screen_w, screen_h).fill(Fill::linear(
                115.0,
                [
                    (Color::TRANSPARENT, stop(center - 0.2)),
                    (Color::WHITE.with_alpha(0.06), stop(center)),
                    (Color::TRANSPARENT, stop(center + 0.2)),
                ],
            )),
        );

        phone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::default_exam_cards;

    fn phone() -> PhoneMockup {
        let cards: Vec<MiniCard> = default_exam_cards()
            .iter()
            .take(6)
            .map(MiniCard::from)
            .collect();
        let accent = Color::rgb(0x00, 0x7b, 0xff);
        PhoneMockup::new("刷題王", "📚 選擇考試類別", accent, cards, 70, 30).unwrap()
    }

    #[test]
    fn tiles_are_staggered_by_five_frames() {
        let phone = phone();
        assert_eq!(phone.len(), 6);
        assert_eq!(phone.tile_appear(0, 70), Some(0.0));
        assert!(phone.tile_appear(0, 75).unwrap() > 0.0);
        assert_eq!(phone.tile_appear(1, 75), Some(0.0));
        assert_eq!(phone.tile_appear(5, 95), Some(0.0));
        assert_eq!(phone.tile_appear(6, 95), None);
    }

    #[test]
    fn shimmer_crosses_after_reveal() {
        let phone = phone();
        assert_eq!(phone.shimmer(0), -50.0);
        assert_eq!(phone.shimmer(90), 50.0);
        assert_eq!(phone.shimmer(119), 150.0);
    }

    #[test]
    fn renders_one_tile_per_card() {
        let phone = phone();
        let mut tree = VisualTree::new(1080, 1920);
        phone.render_into(&mut tree, VisualTree::ROOT, 100);
        let tiles = tree
            .paint_order()
            .filter(|&id| tree.nodes[id].name.starts_with("tile:"))
            .count();
        assert_eq!(tiles, 6);
        assert!(tree.find("shimmer").is_some());
    }
}
