//! # Reel Core
//!
//! Frame-deterministic evaluation for short motion-graphics videos.
//!
//! Every visual property is a pure function of the integer frame number:
//! springs and interpolation tables map a frame to a number, sequencers map a
//! parent frame to a child's local frame, and a `Scene` maps a frame to the
//! complete `VisualTree` for that instant. Any frame can therefore be rendered
//! in any order, on any thread, and always yields the same result.
//!
//! ## Modules
//! - `animation`: Closed-form damped springs and easing curves.
//! - `interpolate`: Breakpoint tables with extrapolation policies.
//! - `sequence`: Half-open time windows and local frame origins.
//! - `scene`: The per-frame visual tree and the `Scene` trait.
//! - `timeline`: Scenes placed one after another on a single timeline.
//! - `pattern`: Index-driven decorative element generators.
//! - `registry` / `plan`: Named compositions and timeline plans built from them.
//! - `render`: Parallel frame rendering and frame sinks.

pub mod animation;
pub mod error;
pub mod interpolate;
pub mod pattern;
pub mod plan;
pub mod registry;
pub mod render;
pub mod scene;
pub mod sequence;
pub mod timeline;
pub mod types;

pub use animation::{measure_spring, EasingType, Spring, SpringConfig, DEFAULT_SETTLE_THRESHOLD};
pub use error::{ConfigError, Result};
pub use interpolate::{lerp, Extrapolate, Interpolation};
pub use pattern::Pattern;
pub use plan::{build_timeline, PlanEntry, TimelinePlan};
pub use registry::SceneRegistry;
pub use render::{render_frames, render_to_sink, FrameSink, JsonLinesSink, RenderedFrame};
pub use scene::{Fill, NodeId, NodeKind, Scene, Stroke, VisualNode, VisualState, VisualTree};
pub use sequence::{Active, Segment, Sequencer};
pub use timeline::Timeline;
pub use types::{Color, CompositionMeta, Frame, Transform};
