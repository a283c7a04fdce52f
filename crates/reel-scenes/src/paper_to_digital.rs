//! # Paper to Digital
//!
//! A stack of paper exams scatters and fades while the backdrop cools from
//! warm paper tones to the dark brand gradient; a phone springs up in their
//! place showing the app's exam picker.

use crate::components::{tint, MiniCard, PaperSheet, PhoneMockup, Scatter};
use crate::design::DesignTokens;
use crate::{FPS, HEIGHT, WIDTH};
use reel_core::{
    lerp, Color, CompositionMeta, Fill, Frame, Interpolation, Result, Scene, Spring, SpringConfig,
    Transform, VisualNode, VisualTree,
};
use serde::{Deserialize, Serialize};

pub const ID: &str = "Scene3-PaperToDigital";
pub const DURATION: u32 = 120;

const PHONE_TOP: f32 = 450.0;
const REVEAL: Frame = 70;
const MINI_CARDS: usize = 6;

const WARM: Color = Color::rgb(0xe5, 0xe1, 0xd8);

/// The paper stack, as laid out before it scatters.
pub const PAPERS: [PaperSheet; 8] = [
    PaperSheet::new(80.0, 500.0, -12.0),
    PaperSheet::new(320.0, 450.0, 8.0),
    PaperSheet::new(600.0, 520.0, -5.0),
    PaperSheet::new(200.0, 700.0, 15.0),
    PaperSheet::new(500.0, 680.0, -18.0),
    PaperSheet::new(150.0, 880.0, 10.0),
    PaperSheet::new(450.0, 850.0, -8.0),
    PaperSheet::new(700.0, 750.0, 6.0),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperToDigitalCopy {
    pub old_title: String,
    pub old_subtitle: String,
    pub new_text: String,
    pub new_highlight: String,
    pub app_name: String,
    pub app_section: String,
}

impl Default for PaperToDigitalCopy {
    fn default() -> Self {
        Self {
            old_title: "📄 還在翻紙本考卷？".into(),
            old_subtitle: "2026 了，是時候進化了。".into(),
            new_text: "所有考試".into(),
            new_highlight: "，一機搞定".into(),
            app_name: "刷題王".into(),
            app_section: "📚 選擇考試類別".into(),
        }
    }
}

pub struct PaperToDigitalScene {
    meta: CompositionMeta,
    copy: PaperToDigitalCopy,
    blue: Color,
    dark: Color,
    white: Color,
    scatter: Scatter,
    backdrop: Interpolation,
    old_text: Interpolation,
    phone_spring: Spring,
    new_text: Spring,
    phone: PhoneMockup,
}

impl PaperToDigitalScene {
    pub fn new(tokens: &DesignTokens, copy: PaperToDigitalCopy) -> Result<Self> {
        let cards = tokens
            .exam_cards
            .iter()
            .filter(|card| !card.coming_soon)
            .take(MINI_CARDS)
            .map(MiniCard::from);
        let phone = PhoneMockup::new(
            copy.app_name.as_str(),
            copy.app_section.as_str(),
            tokens.brand.blue,
            cards,
            REVEAL,
            FPS,
        )?;

        Ok(Self {
            meta: CompositionMeta::new(ID, WIDTH, HEIGHT, FPS, DURATION)?,
            blue: tokens.brand.blue,
            dark: tokens.brand.dark,
            white: tokens.brand.white,
            scatter: Scatter::new()?,
            backdrop: Interpolation::new([25.0, 60.0], [0.0, 1.0])?.clamped(),
            old_text: Interpolation::new([0.0, 10.0, 25.0, 35.0], [0.0, 1.0, 1.0, 0.0])?
                .clamped(),
            phone_spring: Spring::new(SpringConfig::new(100.0, 11.0, 1.2)?)?.delayed(55),
            new_text: Spring::new(SpringConfig::new(120.0, 12.0, 1.0)?)?.delayed(REVEAL),
            phone,
            copy,
        })
    }

    /// 0 while the scene is all paper, 1 once it is fully digital.
    pub fn backdrop_blend(&self, frame: Frame) -> f32 {
        self.backdrop.eval(frame as f32)
    }

    pub fn phone(&self) -> &PhoneMockup {
        &self.phone
    }

    fn render_backdrop(&self, tree: &mut VisualTree, blend: f32) {
        let (w, h) = (WIDTH as f32, HEIGHT as f32);
        let ink = Color::rgb(0x1a, 0x1a, 0x3e);
        let navy = Color::rgb(0x0d, 0x1b, 0x3e);

        tree.append(
            VisualTree::ROOT,
            VisualNode::rect("backdrop", w, h).fill(Fill::solid(WARM.mix(self.dark, blend))),
        );
        tree.append(
            VisualTree::ROOT,
            VisualNode::rect("backdrop-warm", w, h)
                .fill(Fill::linear(
                    135.0,
                    [
                        (Color::rgb(0xfe, 0xf3, 0xc7), 0.0),
                        (WARM, 0.5),
                        (Color::rgb(0xd4, 0xc6, 0xa2), 1.0),
                    ],
                ))
                .opacity(1.0 - blend),
        );
        tree.append(
            VisualTree::ROOT,
            VisualNode::rect("backdrop-dark", w, h)
                .fill(Fill::linear(170.0, [(self.dark, 0.0), (ink, 0.5), (navy, 1.0)]))
                .opacity(blend),
        );
    }

    fn render_captions(&self, tree: &mut VisualTree, frame: Frame) {
        let center = WIDTH as f32 / 2.0;

        let old = tree.append(
            VisualTree::ROOT,
            VisualNode::group("old-caption")
                .at(0.0, 200.0)
                .opacity(self.old_text.eval(frame as f32)),
        );
        tree.append(
            old,
            VisualNode::text("old-title", self.copy.old_title.as_str(), 40.0)
                .at(center, 0.0)
                .fill(Fill::solid(Color::rgb(0x78, 0x71, 0x6c))),
        );
        tree.append(
            old,
            VisualNode::text("old-subtitle", self.copy.old_subtitle.as_str(), 22.0)
                .at(center, 60.0)
                .fill(Fill::solid(Color::rgb(0xa8, 0xa2, 0x9e))),
        );

        let appear = self.new_text.progress(frame, FPS);
        let new = tree.append(
            VisualTree::ROOT,
            VisualNode::group("new-caption")
                .at(0.0, HEIGHT as f32 - 280.0 - 50.0)
                .opacity(appear)
                .transform(Transform::translated(0.0, lerp(appear, 20.0, 0.0))),
        );
        tree.append(
            new,
            VisualNode::text("new-text", self.copy.new_text.as_str(), 36.0)
                .at(center - 90.0, 0.0)
                .fill(Fill::solid(self.white)),
        );
        tree.append(
            new,
            VisualNode::text("new-highlight", self.copy.new_highlight.as_str(), 36.0)
                .at(center + 90.0, 0.0)
                .fill(Fill::solid(self.blue)),
        );
    }
}

impl Scene for PaperToDigitalScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn render(&self, frame: Frame) -> VisualTree {
        let mut tree = VisualTree::new(WIDTH, HEIGHT);
        self.render_backdrop(&mut tree, self.backdrop_blend(frame));
        self.render_captions(&mut tree, frame);

        let stack = tree.append(VisualTree::ROOT, VisualNode::group("papers"));
        for (i, paper) in PAPERS.iter().enumerate() {
            paper.render_into(&mut tree, stack, &self.scatter, i, frame);
        }

        let appear = self.phone_spring.progress(frame, FPS);
        let holder = tree.append(
            VisualTree::ROOT,
            VisualNode::group("phone-holder")
                .at((WIDTH as f32 - PhoneMockup::WIDTH) / 2.0, PHONE_TOP)
                .opacity(appear)
                .transform(
                    Transform::translated(0.0, lerp(appear, 200.0, 0.0))
                        .with_scale(lerp(appear, 0.5, 1.0)),
                ),
        );
        tree.append(
            holder,
            VisualNode::rect("phone-glow", PhoneMockup::WIDTH, PhoneMockup::HEIGHT)
                .rounded(44.0)
                .fill(Fill::solid(tint(self.blue, 0x40)))
                .blur(60.0),
        );
        self.phone.render_into(&mut tree, holder, frame);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> PaperToDigitalScene {
        PaperToDigitalScene::new(&DesignTokens::default(), PaperToDigitalCopy::default()).unwrap()
    }

    #[test]
    fn backdrop_blends_between_25_and_60() {
        let scene = scene();
        assert_eq!(scene.backdrop_blend(0), 0.0);
        assert_eq!(scene.backdrop_blend(25), 0.0);
        assert!((scene.backdrop_blend(42) - 17.0 / 35.0).abs() < 1e-6);
        assert_eq!(scene.backdrop_blend(60), 1.0);
        assert_eq!(scene.backdrop_blend(119), 1.0);

        let warm = scene.render(0);
        let solid = |tree: &VisualTree| match &tree.find("backdrop").unwrap().state.fill {
            Some(Fill::Solid { color }) => *color,
            other => panic!("unexpected fill {other:?}"),
        };
        assert_eq!(solid(&warm), WARM);
        assert_eq!(solid(&scene.render(90)), DesignTokens::default().brand.dark);
    }

    #[test]
    fn old_caption_hands_over_to_new() {
        let scene = scene();
        let opacity = |frame, name: &str| scene.render(frame).find(name).unwrap().state.opacity;
        assert_eq!(opacity(0, "old-caption"), 0.0);
        assert_eq!(opacity(15, "old-caption"), 1.0);
        assert_eq!(opacity(35, "old-caption"), 0.0);
        assert_eq!(opacity(70, "new-caption"), 0.0);
        assert!(opacity(110, "new-caption") > 0.95);
    }

    #[test]
    fn phone_waits_for_frame_55() {
        let scene = scene();
        assert_eq!(scene.render(55).find("phone-holder").unwrap().state.opacity, 0.0);
        assert!(scene.render(80).find("phone-holder").unwrap().state.opacity > 0.5);
        assert_eq!(scene.phone().len(), 6);
    }

    #[test]
    fn papers_are_gone_after_scatter() {
        let tree = scene().render(60);
        for i in 0..PAPERS.len() {
            assert_eq!(tree.find(&format!("paper:{i}")).unwrap().state.opacity, 0.0);
        }
    }
}
