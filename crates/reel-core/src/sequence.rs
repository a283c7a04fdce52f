//! # Sequencer
//!
//! Time windows that mount children on a parent timeline.
//!
//! ## Key Types
//! - `Segment`: A named window `[from, from + duration)` with its own local frame origin.
//! - `Sequencer`: Ordered `(Segment, child)` pairs. Declaration order is paint order.
//! - `Active`: A child that is mounted at a given parent frame, with its local frame.

use crate::error::{ConfigError, Result};
use crate::types::Frame;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    name: String,
    from: Frame,
    duration: Option<u32>,
}

impl Segment {
    /// A window of `duration` frames starting at `from`.
    pub fn new(name: impl Into<String>, from: Frame, duration: i64) -> Result<Self> {
        let name = name.into();
        let duration = u32::try_from(duration)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| ConfigError::NonPositiveDuration {
                name: name.clone(),
                duration,
            })?;
        Ok(Self {
            name,
            from,
            duration: Some(duration),
        })
    }

    /// A window that starts at `from` and never ends.
    pub fn open(name: impl Into<String>, from: Frame) -> Self {
        Self {
            name: name.into(),
            from,
            duration: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> Frame {
        self.from
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Exclusive end frame, `None` for open windows.
    pub fn end(&self) -> Option<Frame> {
        self.duration.map(|d| self.from + d as Frame)
    }

    pub fn is_active(&self, frame: Frame) -> bool {
        frame >= self.from && self.end().map_or(true, |end| frame < end)
    }

    /// `frame - from` while active.
    pub fn local_frame(&self, frame: Frame) -> Option<Frame> {
        self.is_active(frame).then(|| frame - self.from)
    }
}

/// A child mounted at some parent frame.
#[derive(Debug)]
pub struct Active<'a, T> {
    pub index: usize,
    pub segment: &'a Segment,
    pub child: &'a T,
    pub local_frame: Frame,
}

#[derive(Clone, Debug)]
pub struct Sequencer<T> {
    entries: Vec<(Segment, T)>,
}

impl<T> Default for Sequencer<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Sequencer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment, child: T) {
        self.entries.push((segment, child));
    }

    pub fn with(mut self, segment: Segment, child: T) -> Self {
        self.push(segment, child);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Segment, &T)> {
        self.entries.iter().map(|(segment, child)| (segment, child))
    }

    /// Children mounted at `frame`, in paint order.
    pub fn active(&self, frame: Frame) -> impl Iterator<Item = Active<'_, T>> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(move |(index, (segment, child))| {
                segment.local_frame(frame).map(|local_frame| Active {
                    index,
                    segment,
                    child,
                    local_frame,
                })
            })
    }

    /// Latest end over all bounded segments.
    pub fn end_frame(&self) -> Option<Frame> {
        self.entries.iter().filter_map(|(s, _)| s.end()).max()
    }
}
