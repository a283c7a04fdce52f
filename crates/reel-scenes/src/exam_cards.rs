//! # Exam Cards
//!
//! "Choose your battlefield": a title drops in, the exam category cards pop
//! into a 3-2-2 grid one after another, and the voiceover line lands last.
//! Faint particles drift upwards over a grid backdrop.

use crate::components::{tint, ExamCard};
use crate::design::DesignTokens;
use crate::{FPS, HEIGHT, WIDTH};
use reel_core::pattern::{recycle, Pattern};
use reel_core::{
    lerp, Color, CompositionMeta, ConfigError, Fill, Frame, Interpolation, Result, Scene, Spring,
    SpringConfig, Transform, VisualNode, VisualTree,
};
use serde::{Deserialize, Serialize};

pub const ID: &str = "Scene3-ExamCards";
pub const DURATION: u32 = 120;

/// Card origins of the 3-2-2 grid.
const SLOTS: [(f32, f32); 7] = [
    (120.0, 440.0),
    (400.0, 440.0),
    (680.0, 440.0),
    (200.0, 700.0),
    (540.0, 700.0),
    (200.0, 960.0),
    (540.0, 960.0),
];

const PARTICLES: usize = 20;
const GRID_SPACING: u32 = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamCardsCopy {
    pub badge: String,
    pub title: String,
    pub title_highlight: String,
    pub voiceover: String,
    pub voiceover_lead: String,
    pub voiceover_highlight: String,
}

impl Default for ExamCardsCopy {
    fn default() -> Self {
        Self {
            badge: "📚 考試類別".into(),
            title: "選擇你的".into(),
            title_highlight: "戰場".into(),
            voiceover: "你的考試".into(),
            voiceover_lead: "我們".into(),
            voiceover_highlight: "都有。".into(),
        }
    }
}

/// One drifting background dot, in percent of the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub delay: Frame,
}

fn particle(i: usize) -> Particle {
    Particle {
        x: (15 + (i * 37) % 85) as f32,
        y: (10 + (i * 53) % 80) as f32,
        size: (3 + (i % 4) * 2) as f32,
        speed: 0.3 + (i % 3) as f32 * 0.2,
        delay: i as Frame * 3,
    }
}

pub struct ExamCardsScene {
    meta: CompositionMeta,
    copy: ExamCardsCopy,
    blue: Color,
    dark: Color,
    white: Color,
    title: Spring,
    voiceover: Spring,
    particle_fade: Interpolation,
    cards: Vec<ExamCard>,
}

impl ExamCardsScene {
    pub fn new(tokens: &DesignTokens, copy: ExamCardsCopy) -> Result<Self> {
        if tokens.exam_cards.len() > SLOTS.len() {
            return Err(ConfigError::InvalidComposition {
                id: ID.into(),
                reason: format!(
                    "{} exam cards but the grid has {} slots",
                    tokens.exam_cards.len(),
                    SLOTS.len()
                ),
            });
        }

        let cards = tokens
            .exam_cards
            .iter()
            .enumerate()
            .map(|(i, spec)| ExamCard::new(spec.clone(), i, 15 + i as Frame * 10, FPS))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            meta: CompositionMeta::new(ID, WIDTH, HEIGHT, FPS, DURATION)?,
            copy,
            blue: tokens.brand.blue,
            dark: tokens.brand.dark,
            white: tokens.brand.white,
            title: Spring::new(SpringConfig::new(120.0, 14.0, 1.0)?)?,
            voiceover: Spring::new(SpringConfig::new(100.0, 12.0, 1.0)?)?.delayed(95),
            particle_fade: Interpolation::new([0.0, 15.0, 60.0, 75.0], [0.0, 0.15, 0.15, 0.0])?
                .clamped(),
            cards,
        })
    }

    pub fn cards(&self) -> &[ExamCard] {
        &self.cards
    }

    pub fn particles() -> Pattern<fn(usize) -> Particle> {
        Pattern::new(PARTICLES, particle as fn(usize) -> Particle)
    }

    fn render_particles(&self, tree: &mut VisualTree, frame: Frame) {
        let layer = tree.append(VisualTree::ROOT, VisualNode::group("particles"));
        for (i, p) in Self::particles().iter().enumerate() {
            let opacity = self.particle_fade.eval((frame - p.delay) as f32);
            let y = recycle(p.y - frame as f32 * p.speed * 0.3, 100.0);
            tree.append(
                layer,
                VisualNode::ellipse(format!("particle:{i}"), p.size, p.size)
                    .at(p.x / 100.0 * WIDTH as f32, y / 100.0 * HEIGHT as f32)
                    .fill(Fill::solid(self.blue))
                    .blur(1.0)
                    .opacity(opacity),
            );
        }
    }

    fn render_grid(&self, tree: &mut VisualTree) {
        let grid = tree.append(VisualTree::ROOT, VisualNode::group("grid").opacity(0.5));
        let line = Fill::solid(Color::WHITE.with_alpha(0.03));
        for x in (0..WIDTH).step_by(GRID_SPACING as usize) {
            tree.append(
                grid,
                VisualNode::rect("grid-v", 1.0, HEIGHT as f32)
                    .at(x as f32, 0.0)
                    .fill(line.clone()),
            );
        }
        for y in (0..HEIGHT).step_by(GRID_SPACING as usize) {
            tree.append(
                grid,
                VisualNode::rect("grid-h", WIDTH as f32, 1.0)
                    .at(0.0, y as f32)
                    .fill(line.clone()),
            );
        }
    }

    fn render_header(&self, tree: &mut VisualTree, title: f32) {
        let center = WIDTH as f32 / 2.0;
        let header = tree.append(
            VisualTree::ROOT,
            VisualNode::group("header")
                .at(0.0, 140.0)
                .opacity(title)
                .transform(Transform::translated(0.0, lerp(title, 30.0, 0.0))),
        );

        let badge = tree.append(
            header,
            VisualNode::rect("badge", 180.0, 32.0)
                .at(center - 90.0, 0.0)
                .rounded(20.0)
                .fill(Fill::solid(Color::rgba(99, 102, 241, 38)))
                .stroke(Color::rgba(99, 102, 241, 77), 1.0),
        );
        tree.append(
            badge,
            VisualNode::text("badge-text", self.copy.badge.as_str(), 14.0)
                .at(90.0, 16.0)
                .fill(Fill::solid(Color::rgb(0xa5, 0xb4, 0xfc))),
        );
        tree.append(
            header,
            VisualNode::text("title", self.copy.title.as_str(), 48.0)
                .at(center, 84.0)
                .fill(Fill::solid(self.white)),
        );
        tree.append(
            header,
            VisualNode::text("title-highlight", self.copy.title_highlight.as_str(), 48.0)
                .at(center, 146.0)
                .fill(Fill::linear(
                    135.0,
                    [(self.blue, 0.0), (Color::rgb(0x60, 0xa5, 0xfa), 1.0)],
                )),
        );
    }

    fn render_voiceover(&self, tree: &mut VisualTree, frame: Frame) {
        let appear = self.voiceover.progress(frame, FPS);
        let center = WIDTH as f32 / 2.0;
        let group = tree.append(
            VisualTree::ROOT,
            VisualNode::group("voiceover")
                .at(0.0, HEIGHT as f32 - 280.0 - 140.0)
                .opacity(appear)
                .transform(Transform::new().with_scale(lerp(appear, 0.8, 1.0))),
        );
        tree.append(
            group,
            VisualNode::text("voiceover-line", self.copy.voiceover.as_str(), 52.0)
                .at(center, 0.0)
                .fill(Fill::solid(self.white)),
        );
        tree.append(
            group,
            VisualNode::text("voiceover-lead", self.copy.voiceover_lead.as_str(), 52.0)
                .at(center - 80.0, 70.0)
                .fill(Fill::solid(self.white)),
        );
        tree.append(
            group,
            VisualNode::text(
                "voiceover-highlight",
                self.copy.voiceover_highlight.as_str(),
                52.0,
            )
            .at(center + 52.0, 70.0)
            .fill(Fill::solid(self.blue)),
        );
    }

    fn render_corners(&self, tree: &mut VisualTree, title: f32) {
        let edge = tint(self.blue, 0x40);
        for (name, x) in [("corner-left", 40.0), ("corner-right", WIDTH as f32 - 80.0)] {
            tree.append(
                VisualTree::ROOT,
                VisualNode::rect(name, 40.0, 40.0)
                    .at(x, 60.0)
                    .rounded(4.0)
                    .stroke(edge, 3.0)
                    .opacity(title * 0.5),
            );
        }
    }
}

impl Scene for ExamCardsScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn render(&self, frame: Frame) -> VisualTree {
        let mut tree = VisualTree::new(WIDTH, HEIGHT);
        let title = self.title.progress(frame, FPS);

        tree.append(
            VisualTree::ROOT,
            VisualNode::rect("background", WIDTH as f32, HEIGHT as f32).fill(Fill::linear(
                170.0,
                [
                    (self.dark, 0.0),
                    (Color::rgb(0x1a, 0x1a, 0x3e), 0.4),
                    (Color::rgb(0x0d, 0x1b, 0x3e), 1.0),
                ],
            )),
        );
        self.render_particles(&mut tree, frame);
        self.render_grid(&mut tree);
        self.render_header(&mut tree, title);

        let grid = tree.append(VisualTree::ROOT, VisualNode::group("cards"));
        for (card, &(x, y)) in self.cards.iter().zip(SLOTS.iter()) {
            card.render_into(&mut tree, grid, x, y, frame);
        }

        self.render_voiceover(&mut tree, frame);
        self.render_corners(&mut tree, title);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> ExamCardsScene {
        ExamCardsScene::new(&DesignTokens::default(), ExamCardsCopy::default()).unwrap()
    }

    #[test]
    fn particles_follow_index_formulas() {
        let particles: Vec<Particle> = ExamCardsScene::particles().iter().collect();
        assert_eq!(particles.len(), 20);
        assert_eq!(
            particles[1],
            Particle {
                x: 52.0,
                y: 63.0,
                size: 5.0,
                speed: 0.5,
                delay: 3
            }
        );
        assert!(particles.iter().all(|p| p.x < 100.0 && p.y < 90.0));
    }

    #[test]
    fn cards_enter_ten_frames_apart() {
        let scene = scene();
        let delays: Vec<Frame> = scene.cards().iter().map(|c| c.delay()).collect();
        assert_eq!(delays, vec![15, 25, 35, 45, 55, 65, 75]);
    }

    #[test]
    fn frame_zero_is_blank_apart_from_backdrop() {
        let tree = scene().render(0);
        assert_eq!(tree.find("header").unwrap().state.opacity, 0.0);
        assert_eq!(tree.find("voiceover").unwrap().state.opacity, 0.0);
        assert_eq!(tree.find("card:cap").unwrap().state.opacity, 0.0);
        assert_eq!(tree.find("particle:0").unwrap().state.opacity, 0.0);
    }

    #[test]
    fn particles_wrap_instead_of_leaving_the_frame() {
        let scene = scene();
        for frame in [0, 60, 119] {
            let tree = scene.render(frame);
            for i in 0..PARTICLES {
                let node = tree.find(&format!("particle:{i}")).unwrap();
                assert!(node.position.y >= 0.0 && node.position.y < HEIGHT as f32);
            }
        }
    }

    #[test]
    fn too_many_cards_is_a_config_error() {
        let mut tokens = DesignTokens::default();
        tokens.exam_cards.push(tokens.exam_cards[0].clone());
        assert!(matches!(
            ExamCardsScene::new(&tokens, ExamCardsCopy::default()),
            Err(ConfigError::InvalidComposition { .. })
        ));
    }
}
