//! # Design Tokens
//!
//! Brand colors, the exam card catalogue and on-screen copy. Scenes receive
//! these as immutable configuration; the defaults match the shipped brand, and
//! a JSON file can override any subset of them.

use crate::brand_outro::BrandOutroCopy;
use crate::exam_cards::ExamCardsCopy;
use crate::paper_to_digital::PaperToDigitalCopy;
use anyhow::{Context, Result};
use reel_core::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Brand {
    pub blue: Color,
    pub dark_blue: Color,
    pub orange: Color,
    pub light: Color,
    pub dark: Color,
    pub slate50: Color,
    pub slate900: Color,
    pub white: Color,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            blue: Color::rgb(0x00, 0x7b, 0xff),
            dark_blue: Color::rgb(0x00, 0x56, 0xb3),
            orange: Color::rgb(0xff, 0x8c, 0x00),
            light: Color::rgb(0xf8, 0xf9, 0xfa),
            dark: Color::rgb(0x0f, 0x17, 0x2a),
            slate50: Color::rgb(0xf8, 0xfa, 0xfc),
            slate900: Color::rgb(0x0f, 0x17, 0x2a),
            white: Color::WHITE,
        }
    }
}

/// One exam category shown as a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamCardSpec {
    pub id: String,
    pub name: String,
    /// Emoji glyph shown in the icon circle.
    pub icon: String,
    pub color: Color,
    #[serde(alias = "bgGlow")]
    pub glow: Color,
    pub label: String,
    #[serde(default, alias = "comingSoon")]
    pub coming_soon: bool,
}

impl ExamCardSpec {
    fn new(id: &str, name: &str, icon: &str, color: Color, label: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color,
            glow: color.with_alpha(0x33 as f32 / 255.0),
            label: label.into(),
            coming_soon: false,
        }
    }

    fn coming_soon(mut self) -> Self {
        self.coming_soon = true;
        self
    }
}

/// The seven exam categories, in display order.
pub fn default_exam_cards() -> Vec<ExamCardSpec> {
    vec![
        ExamCardSpec::new("cap", "國中會考", "📝", Color::rgb(0x10, 0xb9, 0x81), "升學考試"),
        ExamCardSpec::new("gsat", "學測", "🎓", Color::rgb(0x3b, 0x82, 0xf6), "升學考試"),
        ExamCardSpec::new("ast", "分科測驗", "🔥", Color::rgb(0xf4, 0x3f, 0x5e), "升學考試"),
        ExamCardSpec::new("tve", "統測", "🛠️", Color::rgb(0xf9, 0x73, 0x16), "技職考試"),
        ExamCardSpec::new("law", "律師國考", "⚖️", Color::rgb(0xd9, 0x77, 0x06), "專技高考"),
        ExamCardSpec::new("medical", "醫療國考", "🏥", Color::rgb(0x14, 0xb8, 0xa6), "專技高考"),
        ExamCardSpec::new("civil", "高普考", "📋", Color::rgb(0x8b, 0x5c, 0xf6), "Coming Soon")
            .coming_soon(),
    ]
}

/// Text shown by each scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneCopy {
    pub exam_cards: ExamCardsCopy,
    pub paper_to_digital: PaperToDigitalCopy,
    pub brand_outro: BrandOutroCopy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokens {
    pub brand: Brand,
    pub exam_cards: Vec<ExamCardSpec>,
    pub copy: SceneCopy,
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            exam_cards: default_exam_cards(),
            copy: SceneCopy::default(),
        }
    }
}

impl DesignTokens {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse design tokens")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read design tokens: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid design tokens in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_glow_is_card_color_at_0x33() {
        let cards = default_exam_cards();
        assert_eq!(cards.len(), 7);
        for card in &cards {
            assert_eq!(card.glow.a, 0x33);
            assert_eq!(card.glow.with_alpha(1.0), card.color);
        }
        assert_eq!(cards[0].glow, Color::from_hex("#10b98133").unwrap());
        assert!(cards[6].coming_soon);
        assert!(cards[..6].iter().all(|c| !c.coming_soon));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let tokens = DesignTokens::from_json(r##"{ "brand": { "blue": "#2563eb" } }"##).unwrap();
        assert_eq!(tokens.brand.blue, Color::rgb(0x25, 0x63, 0xeb));
        assert_eq!(tokens.brand.orange, Brand::default().orange);
        assert_eq!(tokens.exam_cards, default_exam_cards());
    }

    #[test]
    fn accepts_camel_case_card_fields() {
        let tokens = DesignTokens::from_json(
            r##"{
                "exam_cards": [{
                    "id": "civil", "name": "高普考", "icon": "📋",
                    "color": "#8b5cf6", "bgGlow": "#8b5cf633",
                    "label": "Coming Soon", "comingSoon": true
                }]
            }"##,
        )
        .unwrap();
        assert_eq!(tokens.exam_cards.len(), 1);
        assert!(tokens.exam_cards[0].coming_soon);
        assert_eq!(tokens.exam_cards[0].glow.a, 0x33);
    }

    #[test]
    fn copy_overrides_are_partial() {
        let tokens =
            DesignTokens::from_json(r##"{ "copy": { "brand_outro": { "url": "example.tw" } } }"##)
                .unwrap();
        assert_eq!(tokens.copy.brand_outro.url, "example.tw");
        assert_eq!(tokens.copy.brand_outro.slogan, BrandOutroCopy::default().slogan);
        assert_eq!(tokens.copy.exam_cards, ExamCardsCopy::default());
    }

    #[test]
    fn rejects_bad_colors() {
        let err = DesignTokens::from_json(r##"{ "brand": { "blue": "blue" } }"##).unwrap_err();
        assert!(format!("{err:#}").contains("invalid color"));
    }
}
