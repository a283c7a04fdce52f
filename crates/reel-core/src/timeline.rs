//! # Timeline
//!
//! Combines whole scenes on one timeline. Each placed scene is rendered at its
//! own local frame and grafted under a group named after its segment.

use crate::error::{ConfigError, Result};
use crate::scene::{Scene, VisualNode, VisualTree};
use crate::sequence::{Segment, Sequencer};
use crate::types::{CompositionMeta, Frame};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Timeline {
    meta: CompositionMeta,
    scenes: Sequencer<Arc<dyn Scene>>,
}

impl Timeline {
    /// An empty timeline. Its duration grows as scenes are placed.
    pub fn new(id: impl Into<String>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            meta: CompositionMeta {
                id: id.into(),
                width,
                height,
                fps,
                duration_in_frames: 0,
            },
            scenes: Sequencer::new(),
        }
    }

    /// Places `scene` right after the current end, for its own duration.
    pub fn append(&mut self, scene: Arc<dyn Scene>) -> Result<()> {
        let from = self.end_frame();
        let duration = scene.meta().duration_in_frames as i64;
        self.place(from, duration, scene)
    }

    /// Places `scene` at `from` for `duration` frames.
    pub fn place(&mut self, from: Frame, duration: i64, scene: Arc<dyn Scene>) -> Result<()> {
        let child = scene.meta();
        if child.fps != self.meta.fps {
            return Err(ConfigError::composition(
                &self.meta.id,
                format!(
                    "scene '{}' runs at {} fps but the timeline runs at {} fps",
                    child.id, child.fps, self.meta.fps
                ),
            ));
        }
        if from < 0 {
            return Err(ConfigError::composition(
                &self.meta.id,
                format!("scene '{}' cannot start before frame 0 (got {from})", child.id),
            ));
        }

        let segment = Segment::new(child.id.clone(), from, duration)?;
        let end = segment.end().unwrap_or(from);
        let total = u32::try_from(end).map_err(|_| {
            ConfigError::composition(&self.meta.id, format!("timeline end {end} is too long"))
        })?;

        debug!(
            timeline = %self.meta.id,
            scene = %child.id,
            from,
            duration,
            "placed scene on timeline"
        );
        self.scenes.push(segment, scene);
        self.meta.duration_in_frames = self.meta.duration_in_frames.max(total);
        Ok(())
    }

    pub fn end_frame(&self) -> Frame {
        self.scenes.end_frame().unwrap_or(0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.scenes.iter().map(|(segment, _)| segment)
    }
}

impl Scene for Timeline {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn render(&self, frame: Frame) -> VisualTree {
        let mut tree = VisualTree::new(self.meta.width, self.meta.height);
        for active in self.scenes.active(frame) {
            trace!(
                scene = active.segment.name(),
                frame,
                local_frame = active.local_frame,
                "rendering timeline child"
            );
            let subtree = active.child.render(active.local_frame);
            tree.graft(VisualTree::ROOT, active.segment.name(), subtree);
        }
        if tree.is_empty() {
            // Empty stretches still carry one marker node.
            tree.append(VisualTree::ROOT, VisualNode::group("gap"));
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    struct Counter {
        meta: CompositionMeta,
    }

    impl Counter {
        fn new(id: &str, fps: u32, frames: u32) -> Arc<dyn Scene> {
            Arc::new(Self {
                meta: CompositionMeta::new(id, 100, 100, fps, frames).unwrap(),
            })
        }
    }

    impl Scene for Counter {
        fn meta(&self) -> &CompositionMeta {
            &self.meta
        }

        fn render(&self, frame: Frame) -> VisualTree {
            let mut tree = VisualTree::new(100, 100);
            tree.append(
                VisualTree::ROOT,
                VisualNode::text("frame", frame.to_string(), 12.0),
            );
            tree
        }
    }

    fn local_frame_of(tree: &VisualTree) -> Option<String> {
        tree.paint_order().find_map(|id| match &tree.nodes[id].kind {
            NodeKind::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
    }

    #[test]
    fn append_places_scenes_back_to_back() {
        let mut timeline = Timeline::new("Full", 100, 100, 30);
        timeline.append(Counter::new("one", 30, 120)).unwrap();
        timeline.append(Counter::new("two", 30, 120)).unwrap();
        timeline.append(Counter::new("three", 30, 210)).unwrap();

        let starts: Vec<Frame> = timeline.segments().map(|s| s.from()).collect();
        assert_eq!(starts, vec![0, 120, 240]);
        assert_eq!(timeline.meta().duration_in_frames, 450);

        let tree = timeline.render(150);
        assert!(tree.find("two").is_some());
        assert!(tree.find("one").is_none());
        assert_eq!(local_frame_of(&tree).as_deref(), Some("30"));
    }

    #[test]
    fn rejects_mismatched_fps() {
        let mut timeline = Timeline::new("Full", 100, 100, 30);
        let err = timeline.place(0, 60, Counter::new("fast", 60, 60)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidComposition { .. }));
    }

    #[test]
    fn rejects_non_positive_durations() {
        let mut timeline = Timeline::new("Full", 100, 100, 30);
        assert!(matches!(
            timeline.place(0, 0, Counter::new("one", 30, 10)),
            Err(ConfigError::NonPositiveDuration { .. })
        ));
        assert_eq!(timeline.meta().duration_in_frames, 0);
    }

    #[test]
    fn gaps_render_a_placeholder() {
        let mut timeline = Timeline::new("Gappy", 100, 100, 30);
        timeline.place(100, 10, Counter::new("late", 30, 10)).unwrap();
        let tree = timeline.render(5);
        assert!(tree.find("gap").is_some());
        assert!(local_frame_of(&tree).is_none());
    }
}
