//! # Timeline Plans
//!
//! A serializable description of a timeline: which registered scenes to play,
//! and where. Plans are resolved against a `SceneRegistry` into a `Timeline`.
//!
//! ```json
//! {
//!   "id": "EP4-Scene3and4",
//!   "width": 1080, "height": 1920, "fps": 30,
//!   "entries": [
//!     { "scene": "Scene3-ExamCards" },
//!     { "scene": "Scene4-BrandOutro", "from": 240, "duration": 210 }
//!   ]
//! }
//! ```

use crate::error::{ConfigError, Result};
use crate::registry::SceneRegistry;
use crate::timeline::Timeline;
use crate::types::Frame;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelinePlan {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub entries: Vec<PlanEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Id of a registered scene.
    pub scene: String,
    /// Start frame. Defaults to the end of the timeline so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Frame>,
    /// Window length. Defaults to the scene's own duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl TimelinePlan {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Resolves every entry of `plan` against `registry`.
pub fn build_timeline(plan: &TimelinePlan, registry: &SceneRegistry) -> Result<Timeline> {
    if plan.entries.is_empty() {
        return Err(ConfigError::InvalidComposition {
            id: plan.id.clone(),
            reason: "plan has no entries".into(),
        });
    }
    if plan.width == 0 || plan.height == 0 || plan.fps == 0 {
        return Err(ConfigError::InvalidComposition {
            id: plan.id.clone(),
            reason: "width, height and fps must be positive".into(),
        });
    }

    let mut timeline = Timeline::new(plan.id.clone(), plan.width, plan.height, plan.fps);
    for entry in &plan.entries {
        let scene = registry.get(&entry.scene)?;
        let from = entry.from.unwrap_or_else(|| timeline.end_frame());
        let duration = entry
            .duration
            .unwrap_or(scene.meta().duration_in_frames as i64);
        timeline.place(from, duration, scene)?;
    }

    info!(
        id = %plan.id,
        entries = plan.entries.len(),
        frames = timeline.end_frame(),
        "built timeline from plan"
    );
    Ok(timeline)
}
