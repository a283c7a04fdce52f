//! # Core Types
//!
//! Value types shared by every evaluator and scene.
//!
//! ## Key Types
//! - `Frame`: Signed frame index. Local frames can be negative before an origin.
//! - `Color`: RGBA8 color parsed from the hex notation used by design tokens.
//! - `Transform`: Translate / scale / rotate / skew, CSS-transform style.
//! - `CompositionMeta`: The id + size + fps + duration contract consumed by hosts.

use crate::error::{ConfigError, Result};
use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A frame index. Scene frames run from 0 to the scene duration.
pub type Frame = i64;

/// An RGBA color with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, i) in out.iter_mut().zip(0..3) {
                    *slot = channel(&digits[i..i + 1])? * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 | 8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    255
                };
                Ok(Self::rgba(r, g, b, a))
            }
            _ => Err(invalid()),
        }
    }

    /// Replaces the alpha channel with `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Linear blend towards `other`. `t` is clamped to `[0, 1]`.
    pub fn mix(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A 2D transform in CSS order: translate, then scale and rotate, then skew.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: f32,
    /// Degrees, clockwise in screen space.
    pub rotation: f32,
    /// Horizontal skew in degrees.
    pub skew_x: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
        skew_x: 0.0,
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn translated(x: f32, y: f32) -> Self {
        Self::IDENTITY.with_translate(x, y)
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_skew_x(mut self, degrees: f32) -> Self {
        self.skew_x = degrees;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Column-major affine matrix: `T * R * S * K`.
    pub fn to_matrix(&self) -> Mat3 {
        let trs = Mat3::from_scale_angle_translation(
            Vec2::splat(self.scale),
            self.rotation.to_radians(),
            self.translate,
        );
        if self.skew_x == 0.0 {
            return trs;
        }
        let skew = Mat3::from_cols(
            Vec3::X,
            Vec3::new(self.skew_x.to_radians().tan(), 1.0, 0.0),
            Vec3::Z,
        );
        trs * skew
    }
}

/// The contract a scene exposes to the rendering host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionMeta {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_in_frames: u32,
}

impl CompositionMeta {
    pub fn new(
        id: impl Into<String>,
        width: u32,
        height: u32,
        fps: u32,
        duration_in_frames: u32,
    ) -> Result<Self> {
        let meta = Self {
            id: id.into(),
            width,
            height,
            fps,
            duration_in_frames,
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::composition(&self.id, "id must not be empty"));
        }
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("fps", self.fps),
            ("duration_in_frames", self.duration_in_frames),
        ] {
            if value == 0 {
                return Err(ConfigError::composition(
                    &self.id,
                    format!("{field} must be positive"),
                ));
            }
        }
        Ok(())
    }

    /// All frames of the composition, `0..duration`.
    pub fn frames(&self) -> Range<Frame> {
        0..self.duration_in_frames as Frame
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_in_frames as f64 / self.fps as f64
    }
}
