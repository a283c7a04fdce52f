//! # Rendering
//!
//! Evaluates frame ranges of a `Scene`, in parallel, and streams the results
//! to a `FrameSink`. Frames are independent, so each one is rendered on
//! whatever rayon worker picks it up and the results are reassembled in order.

use crate::scene::{Scene, VisualTree};
use crate::types::Frame;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedFrame {
    pub frame: Frame,
    pub tree: VisualTree,
}

/// Clamps `range` to the frames the scene actually has.
pub fn clamp_range(scene: &dyn Scene, range: Range<Frame>) -> Range<Frame> {
    let all = scene.meta().frames();
    let start = range.start.clamp(all.start, all.end);
    let end = range.end.clamp(start, all.end);
    start..end
}

/// Renders every frame of `range` that lies inside the scene, in frame order.
pub fn render_frames(scene: &dyn Scene, range: Range<Frame>) -> Vec<RenderedFrame> {
    clamp_range(scene, range)
        .into_par_iter()
        .map(|frame| RenderedFrame {
            frame,
            tree: scene.render(frame),
        })
        .collect()
}

/// Destination for rendered frames, written strictly in frame order.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &RenderedFrame) -> Result<()>;

    /// Flushes buffered output. Called once after the last frame.
    fn finish(&mut self) -> Result<()>;
}

/// One JSON object per line: `{"frame": N, "tree": {...}}`.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn write_frame(&mut self, frame: &RenderedFrame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)
            .with_context(|| format!("Failed to serialize frame {}", frame.frame))?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush frame output")
    }
}

/// Renders `range` in chunks of `chunk` frames and writes them to `sink`.
///
/// Only one chunk is held in memory at a time. Returns the number of frames written.
pub fn render_to_sink(
    scene: &dyn Scene,
    range: Range<Frame>,
    sink: &mut dyn FrameSink,
    chunk: usize,
) -> Result<usize> {
    let range = clamp_range(scene, range);
    let chunk = chunk.max(1) as Frame;
    let id = &scene.meta().id;
    let started = Instant::now();

    info!(scene = %id, start = range.start, end = range.end, "rendering");

    let mut written = 0;
    let mut start = range.start;
    while start < range.end {
        let end = (start + chunk).min(range.end);
        for frame in render_frames(scene, start..end) {
            sink.write_frame(&frame)?;
            written += 1;
        }
        debug!(scene = %id, start, end, "chunk written");
        start = end;
    }
    sink.finish()?;

    info!(
        scene = %id,
        frames = written,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "render complete"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::VisualNode;
    use crate::types::CompositionMeta;

    struct Ticker(CompositionMeta);

    impl Scene for Ticker {
        fn meta(&self) -> &CompositionMeta {
            &self.0
        }

        fn render(&self, frame: Frame) -> VisualTree {
            let mut tree = VisualTree::new(self.0.width, self.0.height);
            tree.append(
                VisualTree::ROOT,
                VisualNode::rect("bar", frame as f32, 4.0),
            );
            tree
        }
    }

    fn ticker(frames: u32) -> Ticker {
        Ticker(CompositionMeta::new("ticker", 64, 64, 30, frames).unwrap())
    }

    #[test]
    fn frames_come_back_in_order() {
        let scene = ticker(50);
        let frames = render_frames(&scene, 0..50);
        let order: Vec<Frame> = frames.iter().map(|f| f.frame).collect();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
        assert_eq!(frames[7].tree, scene.render(7));
    }

    #[test]
    fn ranges_are_clamped_to_the_scene() {
        let scene = ticker(10);
        assert_eq!(clamp_range(&scene, -5..100), 0..10);
        assert_eq!(clamp_range(&scene, 20..30), 10..10);
        assert!(render_frames(&scene, 12..40).is_empty());
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_frame() {
        let scene = ticker(10);
        let mut sink = JsonLinesSink::new(Vec::new());
        let written = render_to_sink(&scene, 2..7, &mut sink, 2).unwrap();
        assert_eq!(written, 5);
        assert_eq!(sink.written(), 5);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let frames: Vec<Frame> = output
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["frame"].as_i64().unwrap()
            })
            .collect();
        assert_eq!(frames, vec![2, 3, 4, 5, 6]);
    }
}
