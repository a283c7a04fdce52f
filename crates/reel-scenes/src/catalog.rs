//! # Catalog
//!
//! Every composition this crate ships, built from one set of design tokens.

use crate::brand_outro::{self, BrandOutroScene};
use crate::design::DesignTokens;
use crate::exam_cards::ExamCardsScene;
use crate::paper_to_digital::PaperToDigitalScene;
use crate::{FPS, HEIGHT, WIDTH};
use reel_core::{Result, SceneRegistry, Timeline};
use std::sync::Arc;
use tracing::info;

pub const EP4_ID: &str = "EP4-Scene3and4";

/// The outro's length when it closes the episode.
pub const EP4_OUTRO_FRAMES: u32 = 210;

/// Exam cards, paper to digital, then the outro, back to back.
pub fn ep4_full(tokens: &DesignTokens) -> Result<Timeline> {
    let copy = &tokens.copy;
    let mut timeline = Timeline::new(EP4_ID, WIDTH, HEIGHT, FPS);
    timeline.append(Arc::new(ExamCardsScene::new(tokens, copy.exam_cards.clone())?))?;
    timeline.append(Arc::new(PaperToDigitalScene::new(
        tokens,
        copy.paper_to_digital.clone(),
    )?))?;
    timeline.append(Arc::new(BrandOutroScene::new(
        tokens,
        copy.brand_outro.clone(),
        EP4_OUTRO_FRAMES,
    )?))?;
    Ok(timeline)
}

/// The four compositions, in preview order.
pub fn registry(tokens: &DesignTokens) -> Result<SceneRegistry> {
    let copy = &tokens.copy;
    let registry = SceneRegistry::new()
        .with(Arc::new(ExamCardsScene::new(tokens, copy.exam_cards.clone())?))?
        .with(Arc::new(PaperToDigitalScene::new(
            tokens,
            copy.paper_to_digital.clone(),
        )?))?
        .with(Arc::new(BrandOutroScene::new(
            tokens,
            copy.brand_outro.clone(),
            brand_outro::DURATION,
        )?))?
        .with(Arc::new(ep4_full(tokens)?))?;

    info!(compositions = registry.len(), "scene catalog ready");
    Ok(registry)
}
