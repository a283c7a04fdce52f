//! # Interpolation
//!
//! Piecewise-linear mapping from an input range of breakpoints onto output
//! values, with an extrapolation policy at each end.
//!
//! Tables are validated when they are built: mismatched lengths, breakpoints
//! that do not strictly increase, and non-finite numbers are rejected there,
//! so `eval` itself cannot fail.

use crate::animation::EasingType;
use crate::error::{ensure_finite, ConfigError, Result};
use serde::{Deserialize, Serialize};

/// What happens to inputs outside the breakpoint range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary output.
    Clamp,
    /// Continue the boundary segment's line.
    #[default]
    Extend,
    /// Return the input unchanged.
    Identity,
    /// Fold the input back into the breakpoint range.
    Wrap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interpolation {
    input: Vec<f32>,
    output: Vec<f32>,
    left: Extrapolate,
    right: Extrapolate,
    easing: EasingType,
}

impl Interpolation {
    pub fn new(input: impl Into<Vec<f32>>, output: impl Into<Vec<f32>>) -> Result<Self> {
        let input = input.into();
        let output = output.into();

        if input.is_empty() {
            return Err(ConfigError::EmptyRange);
        }
        if input.len() != output.len() {
            return Err(ConfigError::RangeLengthMismatch {
                inputs: input.len(),
                outputs: output.len(),
            });
        }
        for &value in &input {
            ensure_finite("input breakpoint", value)?;
        }
        for &value in &output {
            ensure_finite("output value", value)?;
        }
        if let Some(index) = input.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConfigError::NotIncreasing {
                index: index + 1,
                prev: input[index],
                next: input[index + 1],
            });
        }

        Ok(Self {
            input,
            output,
            left: Extrapolate::default(),
            right: Extrapolate::default(),
            easing: EasingType::Linear,
        })
    }

    /// Clamp on both ends.
    pub fn clamped(self) -> Self {
        self.extrapolate_left(Extrapolate::Clamp)
            .extrapolate_right(Extrapolate::Clamp)
    }

    pub fn extrapolate_left(mut self, policy: Extrapolate) -> Self {
        self.left = policy;
        self
    }

    pub fn extrapolate_right(mut self, policy: Extrapolate) -> Self {
        self.right = policy;
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn input(&self) -> &[f32] {
        &self.input
    }

    pub fn output(&self) -> &[f32] {
        &self.output
    }

    pub fn eval(&self, x: f32) -> f32 {
        let n = self.input.len();
        if n == 1 {
            return self.output[0];
        }

        let first = self.input[0];
        let last = self.input[n - 1];
        let mut x = x;

        if x < first {
            match self.left {
                Extrapolate::Clamp => return self.output[0],
                Extrapolate::Identity => return x,
                Extrapolate::Wrap => x = wrap(x, first, last),
                Extrapolate::Extend => {}
            }
        } else if x > last {
            match self.right {
                Extrapolate::Clamp => return self.output[n - 1],
                Extrapolate::Identity => return x,
                Extrapolate::Wrap => x = wrap(x, first, last),
                Extrapolate::Extend => {}
            }
        }

        // Segment whose start is the last breakpoint <= x, limited to real segments.
        let segment = self.input[1..n - 1].partition_point(|&b| b <= x);
        let (in0, in1) = (self.input[segment], self.input[segment + 1]);
        let (out0, out1) = (self.output[segment], self.output[segment + 1]);

        if out0 == out1 {
            return out0;
        }
        let t = self.easing.eval((x - in0) / (in1 - in0));
        out0 + (out1 - out0) * t
    }
}

fn wrap(x: f32, first: f32, last: f32) -> f32 {
    first + (x - first).rem_euclid(last - first)
}

/// Maps `t` in `[0, 1]` onto `[a, b]`, extending past either end.
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_within_segments() {
        let fade = Interpolation::new([0.0, 15.0, 60.0, 75.0], [0.0, 0.15, 0.15, 0.0]).unwrap();
        assert_eq!(fade.eval(0.0), 0.0);
        assert!((fade.eval(7.5) - 0.075).abs() < 1e-6);
        assert_eq!(fade.eval(30.0), 0.15);
        assert!((fade.eval(67.5) - 0.075).abs() < 1e-6);
        assert_eq!(fade.eval(75.0), 0.0);
    }

    #[test]
    fn clamp_returns_exact_boundary_outputs() {
        let shine = Interpolation::new([0.0, 20.0], [-100.0, 200.0])
            .unwrap()
            .clamped();
        assert_eq!(shine.eval(-50.0), -100.0);
        assert_eq!(shine.eval(1e9), 200.0);
    }

    #[test]
    fn extend_continues_linear_trend() {
        let pulse = Interpolation::new([0.0, 300.0], [0.0, 12.0]).unwrap();
        assert!((pulse.eval(600.0) - 24.0).abs() < 1e-4);
        assert!((pulse.eval(-150.0) + 6.0).abs() < 1e-4);
    }

    #[test]
    fn identity_and_wrap_policies() {
        let map = Interpolation::new([0.0, 10.0], [100.0, 200.0])
            .unwrap()
            .extrapolate_left(Extrapolate::Identity)
            .extrapolate_right(Extrapolate::Wrap);
        assert_eq!(map.eval(-3.0), -3.0);
        assert!((map.eval(12.5) - 125.0).abs() < 1e-4);
    }

    #[test]
    fn single_breakpoint_is_constant() {
        let constant = Interpolation::new([5.0], [0.7]).unwrap();
        for x in [-1e6, 0.0, 5.0, 1e6] {
            assert_eq!(constant.eval(x), 0.7);
        }
    }

    #[test]
    fn easing_shapes_segment_fraction() {
        let eased = Interpolation::new([0.0, 1.0], [0.0, 100.0])
            .unwrap()
            .with_easing(EasingType::EaseIn);
        assert!(eased.eval(0.5) < 50.0);
        assert!((eased.eval(1.0) - 100.0).abs() < 0.1);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(
            Interpolation::new(Vec::<f32>::new(), Vec::<f32>::new()),
            Err(ConfigError::EmptyRange)
        );
        assert_eq!(
            Interpolation::new([0.0, 1.0], [0.0]),
            Err(ConfigError::RangeLengthMismatch {
                inputs: 2,
                outputs: 1
            })
        );
        assert_eq!(
            Interpolation::new([0.0, 10.0, 10.0], [0.0, 1.0, 2.0]),
            Err(ConfigError::NotIncreasing {
                index: 2,
                prev: 10.0,
                next: 10.0
            })
        );
        assert!(matches!(
            Interpolation::new([0.0, f32::INFINITY], [0.0, 1.0]),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn lerp_extends_past_unit_range() {
        assert_eq!(lerp(0.0, 0.3, 1.0), 0.3);
        assert_eq!(lerp(1.0, 60.0, 0.0), 0.0);
        assert!((lerp(1.1, 0.0, 10.0) - 11.0).abs() < 1e-5);
    }
}
