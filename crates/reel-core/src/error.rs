//! # Configuration Errors
//!
//! Every failure the evaluator can report is an authoring mistake in a
//! declarative table (spring constants, interpolation breakpoints, segment
//! windows, composition metadata). They are raised when the value is
//! constructed, never while a frame is being evaluated.

use thiserror::Error;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("interpolation needs at least one breakpoint")]
    EmptyRange,

    #[error("input range has {inputs} breakpoints but output range has {outputs}")]
    RangeLengthMismatch { inputs: usize, outputs: usize },

    #[error("input range must be strictly increasing: {prev} is followed by {next} at index {index}")]
    NotIncreasing { index: usize, prev: f32, next: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("spring {field} must be {expected}, got {value}")]
    InvalidSpring {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    #[error("a spring without damping never settles")]
    Undamped,

    #[error("segment '{name}' needs a positive duration, got {duration}")]
    NonPositiveDuration { name: String, duration: i64 },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("composition '{id}': {reason}")]
    InvalidComposition { id: String, reason: String },

    #[error("unknown scene id '{0}'")]
    UnknownScene(String),

    #[error("scene id '{0}' is already registered")]
    DuplicateScene(String),
}

impl ConfigError {
    pub(crate) fn composition(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidComposition {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinities in declarative tables.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
