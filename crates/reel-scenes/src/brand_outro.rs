//! # Brand Outro
//!
//! Logo entrance with pulsing rings and a particle burst, then the slogan
//! revealed glyph by glyph, the sub-slogan, call to action and URL. The whole
//! frame fades out over the last 15 frames of whatever duration it is given.

use crate::components::tint;
use crate::design::DesignTokens;
use crate::{FPS, HEIGHT, WIDTH};
use reel_core::pattern::{radial_angle, Pattern};
use reel_core::{
    lerp, Color, CompositionMeta, Extrapolate, Fill, Frame, Interpolation, Result, Scene, Spring,
    SpringConfig, Transform, VisualNode, VisualTree,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use unicode_segmentation::UnicodeSegmentation;

pub const ID: &str = "Scene4-BrandOutro";
pub const DURATION: u32 = 300;

const SLOGAN_START: Frame = 60;
const GLYPH_STAGGER: Frame = 4;
const GLYPH_ADVANCE: f32 = 68.0;
const BURST_PARTICLES: usize = 30;
const EXIT_FRAMES: u32 = 15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandOutroCopy {
    pub logo: String,
    pub brand_name: String,
    pub tagline: String,
    pub slogan: String,
    /// Glyph indices of the slogan drawn in the accent color.
    pub highlight: RangeInclusive<usize>,
    pub sub_slogan: String,
    pub cta: String,
    pub url: String,
    pub footer: String,
}

impl Default for BrandOutroCopy {
    fn default() -> Self {
        Self {
            logo: "🚀".into(),
            brand_name: "刷題王".into(),
            tagline: "AI 智慧刷題平台".into(),
            slogan: "刷題，進化了。".into(),
            highlight: 3..=5,
            sub_slogan: "每一題，都不白刷。".into(),
            cta: "🚀 免費開始刷題".into(),
            url: "shuati.tw".into(),
            footer: "© 2026 刷題王 Shuati — 你的 AI 隨身家教".into(),
        }
    }
}

/// One ray of the logo burst at a given frame, relative to the burst center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

pub struct BrandOutroScene {
    meta: CompositionMeta,
    copy: BrandOutroCopy,
    glyphs: Vec<(String, Spring)>,
    blue: Color,
    orange: Color,
    dark: Color,
    white: Color,
    logo: Spring,
    sub_slogan: Spring,
    cta: Spring,
    url: Spring,
    ring_pulse: Interpolation,
    burst_fade: Interpolation,
    exit: Interpolation,
}

impl BrandOutroScene {
    /// The outro runs for `duration` frames; the exit fade always ends on the last one.
    pub fn new(tokens: &DesignTokens, copy: BrandOutroCopy, duration: u32) -> Result<Self> {
        let meta = CompositionMeta::new(ID, WIDTH, HEIGHT, FPS, duration)?;

        let glyph = SpringConfig::new(200.0, 10.0, 0.6)?;
        let glyphs = copy
            .slogan
            .graphemes(true)
            .enumerate()
            .map(|(i, g)| {
                let delay = SLOGAN_START + i as Frame * GLYPH_STAGGER;
                Spring::new(glyph).map(|s| (g.to_string(), s.delayed(delay)))
            })
            .collect::<Result<Vec<_>>>()?;

        let end = duration as f32;
        let exit = Interpolation::new([end - EXIT_FRAMES as f32, end], [1.0, 0.0])?.clamped();
        let headline = SpringConfig::new(120.0, 14.0, 1.0)?;

        Ok(Self {
            meta,
            glyphs,
            blue: tokens.brand.blue,
            orange: tokens.brand.orange,
            dark: tokens.brand.dark,
            white: tokens.brand.white,
            logo: Spring::new(SpringConfig::new(80.0, 10.0, 1.5)?)?,
            sub_slogan: Spring::new(SpringConfig::new(100.0, 12.0, 1.0)?)?.delayed(130),
            cta: Spring::new(headline)?.delayed(170),
            url: Spring::new(headline)?.delayed(200),
            ring_pulse: Interpolation::new([0.0, 300.0], [0.0, 12.0])?
                .extrapolate_left(Extrapolate::Clamp)
                .extrapolate_right(Extrapolate::Extend),
            burst_fade: Interpolation::new([0.0, 0.1, 0.6, 1.0], [0.0, 0.5, 0.2, 0.0])?
                .extrapolate_right(Extrapolate::Clamp),
            exit,
            copy,
        })
    }

    /// Slogan split into user-perceived characters.
    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(|(g, _)| g.as_str())
    }

    pub fn exit_opacity(&self, frame: Frame) -> f32 {
        self.exit.eval(frame as f32)
    }

    /// Burst rays at `frame`. Ray `i` launches at `20 + 3 * (i % 10)` and fades over 60 frames.
    pub fn burst(&self, frame: Frame) -> Pattern<impl Fn(usize) -> BurstParticle + '_> {
        Pattern::new(BURST_PARTICLES, move |i| {
            let angle = radial_angle(i, BURST_PARTICLES);
            let speed = 1.5 + (i % 5) as f32 * 0.8;
            let launch = 20 + (i % 10) as Frame * 3;
            let progress = ((frame - launch) as f32 / 60.0).max(0.0);
            let radius = progress * 400.0 * speed;
            BurstParticle {
                x: angle.cos() * radius,
                y: angle.sin() * radius,
                size: (2 + (i % 3) * 2) as f32,
                opacity: self.burst_fade.eval(progress),
            }
        })
    }

    fn burst_color(&self, i: usize) -> Color {
        match i % 3 {
            0 => self.blue,
            1 => self.orange,
            _ => Color::rgb(0x60, 0xa5, 0xfa),
        }
    }

    fn render_effects(&self, tree: &mut VisualTree, frame: Frame, logo: f32) {
        let (w, h) = (WIDTH as f32, HEIGHT as f32);
        let (cx, cy) = (w / 2.0, h * 0.38);

        tree.append(
            VisualTree::ROOT,
            VisualNode::ellipse("ambient", 600.0, 600.0)
                .at(w / 2.0 - 300.0, h / 2.0 - 300.0)
                .fill(Fill::radial([
                    (tint(self.blue, 0x15), 0.0),
                    (Color::TRANSPARENT, 0.7),
                ]))
                .blur(60.0),
        );

        let pulse = self.ring_pulse.eval(frame as f32);
        for ring in 1..=3 {
            let r = ring as f32;
            let size = 200.0 + r * 120.0 + (pulse + r).sin() * 20.0;
            tree.append(
                VisualTree::ROOT,
                VisualNode::ellipse(format!("ring:{ring}"), size, size)
                    .at(cx - size / 2.0, cy - size / 2.0)
                    .stroke(self.blue, 1.5)
                    .opacity(lerp(logo, 0.0, 0.08 / r)),
            );
        }

        let burst = tree.append(VisualTree::ROOT, VisualNode::group("burst").at(cx, cy));
        for (i, p) in self.burst(frame).iter().enumerate() {
            tree.append(
                burst,
                VisualNode::ellipse(format!("spark:{i}"), p.size, p.size)
                    .at(p.x, p.y)
                    .fill(Fill::solid(self.burst_color(i)))
                    .opacity(p.opacity),
            );
        }
    }

    fn render_logo(&self, tree: &mut VisualTree, logo: f32) {
        let group = tree.append(
            VisualTree::ROOT,
            VisualNode::group("logo")
                .at(WIDTH as f32 / 2.0, HEIGHT as f32 * 0.28)
                .opacity(logo)
                .transform(Transform::new().with_scale(lerp(logo, 0.1, 1.0))),
        );
        tree.append(
            group,
            VisualNode::text("logo-icon", self.copy.logo.as_str(), 100.0),
        );
        tree.append(
            group,
            VisualNode::text("brand-name", self.copy.brand_name.as_str(), 72.0)
                .at(0.0, 130.0)
                .fill(Fill::solid(self.white)),
        );
        tree.append(
            group,
            VisualNode::text("tagline", self.copy.tagline.as_str(), 18.0)
                .at(0.0, 190.0)
                .fill(Fill::solid(Color::rgb(0x94, 0xa3, 0xb8))),
        );
    }

    fn render_slogan(&self, tree: &mut VisualTree, frame: Frame) {
        let line = tree.append(
            VisualTree::ROOT,
            VisualNode::group("slogan").at(0.0, HEIGHT as f32 * 0.55),
        );
        let width = self.glyphs.len() as f32 * GLYPH_ADVANCE;
        let left = (WIDTH as f32 - width) / 2.0;

        for (i, (glyph, spring)) in self.glyphs.iter().enumerate() {
            let appear = spring.progress(frame, FPS);
            let color = if self.copy.highlight.contains(&i) {
                self.blue
            } else {
                self.white
            };
            tree.append(
                line,
                VisualNode::text(format!("glyph:{i}"), glyph.as_str(), 64.0)
                    .at(left + i as f32 * GLYPH_ADVANCE, 0.0)
                    .fill(Fill::solid(color))
                    .opacity(appear)
                    .transform(
                        Transform::translated(0.0, lerp(appear, 40.0, 0.0)).with_scale(appear),
                    ),
            );
        }
    }

    fn render_outro_copy(&self, tree: &mut VisualTree, frame: Frame) {
        let (w, h) = (WIDTH as f32, HEIGHT as f32);
        let center = w / 2.0;

        let sub = self.sub_slogan.progress(frame, FPS);
        tree.append(
            VisualTree::ROOT,
            VisualNode::text("sub-slogan", self.copy.sub_slogan.as_str(), 30.0)
                .at(center, h * 0.65)
                .fill(Fill::solid(Color::rgb(0x94, 0xa3, 0xb8)))
                .opacity(sub)
                .transform(Transform::translated(0.0, lerp(sub, 15.0, 0.0))),
        );

        let cta = self.cta.progress(frame, FPS);
        let button = tree.append(
            VisualTree::ROOT,
            VisualNode::rect("cta", 360.0, 72.0)
                .at(center - 180.0, h * 0.76)
                .rounded(16.0)
                .fill(Fill::linear(
                    135.0,
                    [(self.blue, 0.0), (Color::rgb(0x25, 0x63, 0xeb), 1.0)],
                ))
                .opacity(cta)
                .transform(Transform::new().with_scale(lerp(cta, 0.8, 1.0))),
        );
        tree.append(
            button,
            VisualNode::text("cta-text", self.copy.cta.as_str(), 28.0)
                .at(180.0, 36.0)
                .fill(Fill::solid(self.white)),
        );

        let url = self.url.progress(frame, FPS);
        let pill = tree.append(
            VisualTree::ROOT,
            VisualNode::rect("url", 220.0, 48.0)
                .at(center - 110.0, h - 260.0 - 48.0)
                .rounded(12.0)
                .fill(Fill::solid(Color::WHITE.with_alpha(0.06)))
                .stroke(Color::WHITE.with_alpha(0.1), 1.0)
                .opacity(url)
                .transform(Transform::translated(0.0, lerp(url, 10.0, 0.0))),
        );
        tree.append(
            pill,
            VisualNode::text("url-text", self.copy.url.as_str(), 22.0)
                .at(110.0, 24.0)
                .fill(Fill::solid(Color::rgb(0x64, 0x74, 0x8b))),
        );
        tree.append(
            VisualTree::ROOT,
            VisualNode::text("footer", self.copy.footer.as_str(), 14.0)
                .at(center, h - 120.0 - 14.0)
                .fill(Fill::solid(Color::rgb(0x47, 0x55, 0x69)))
                .opacity(lerp(url, 0.0, 0.4)),
        );

        let edge = tint(self.blue, 0x30);
        for (name, x) in [("corner-left", 40.0), ("corner-right", w - 70.0)] {
            tree.append(
                VisualTree::ROOT,
                VisualNode::rect(name, 30.0, 30.0)
                    .at(x, h - 80.0)
                    .rounded(4.0)
                    .stroke(edge, 2.0)
                    .opacity(lerp(cta, 0.0, 0.5)),
            );
        }
    }
}

impl Scene for BrandOutroScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn render(&self, frame: Frame) -> VisualTree {
        let mut tree = VisualTree::new(WIDTH, HEIGHT);
        tree.root_mut().state.opacity = self.exit_opacity(frame);

        tree.append(
            VisualTree::ROOT,
            VisualNode::rect("background", WIDTH as f32, HEIGHT as f32).fill(Fill::linear(
                170.0,
                [
                    (self.dark, 0.0),
                    (Color::rgb(0x0a, 0x0f, 0x2e), 0.4),
                    (Color::rgb(0x0d, 0x1b, 0x3e), 1.0),
                ],
            )),
        );

        let logo = self.logo.progress(frame, FPS);
        self.render_effects(&mut tree, frame, logo);
        self.render_logo(&mut tree, logo);
        self.render_slogan(&mut tree, frame);
        self.render_outro_copy(&mut tree, frame);
        tree
    }
}
