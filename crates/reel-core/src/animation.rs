//! # Animation Module
//!
//! Spring physics and easing curves, evaluated as closed-form functions of
//! elapsed time.
//!
//! ## Responsibilities
//! - **Easing**: `EasingType` backed by the `keyframe` easing functions.
//! - **Springs**: `SpringConfig` validation and the analytic damped-oscillator
//!   solution behind `Spring::progress`.
//! - **Settling**: `measure_spring` finds how many frames a spring needs to settle.
//!
//! A spring never integrates frame by frame: progress for frame `f` is computed
//! from `(f - delay) / fps` alone, so frames can be evaluated in any order.

use crate::error::{ensure_finite, ConfigError, Result};
use crate::types::Frame;
use keyframe::EasingFunction;
use serde::{Deserialize, Serialize};

/// Distance from the target below which a spring counts as settled.
pub const DEFAULT_SETTLE_THRESHOLD: f32 = 0.005;

const MAX_MEASURED_FRAMES: u32 = 1_000_000;
const CRITICAL_EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        match self {
            // Kept exact so extended interpolation stays on its line.
            EasingType::Linear => x,
            _ => self.y(x as f64) as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Initial velocity towards the target, in progress units per second.
    pub velocity: f32,
    /// Stop at the target instead of overshooting it.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            velocity: 0.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Result<Self> {
        let config = Self {
            stiffness,
            damping,
            mass,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from a damping ratio, where 1.0 is critical damping.
    pub fn from_damping_ratio(ratio: f32, stiffness: f32, mass: f32) -> Result<Self> {
        ensure_finite("damping ratio", ratio)?;
        let damping = ratio * 2.0 * (stiffness * mass).sqrt();
        Self::new(stiffness, damping, mass)
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("spring stiffness", self.stiffness)?;
        ensure_finite("spring damping", self.damping)?;
        ensure_finite("spring mass", self.mass)?;
        ensure_finite("spring velocity", self.velocity)?;

        if self.stiffness <= 0.0 {
            return Err(ConfigError::InvalidSpring {
                field: "stiffness",
                expected: "positive",
                value: self.stiffness,
            });
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::InvalidSpring {
                field: "mass",
                expected: "positive",
                value: self.mass,
            });
        }
        if self.damping < 0.0 {
            return Err(ConfigError::InvalidSpring {
                field: "damping",
                expected: "non-negative",
                value: self.damping,
            });
        }
        Ok(())
    }

    /// `damping / critical damping`. Below 1 the spring oscillates.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Closed-form displacement from the target, starting at -1.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Oscillator {
    Under { decay: f64, omega: f64, x0: f64, b: f64 },
    Critical { omega0: f64, x0: f64, b: f64 },
    Over { r1: f64, r2: f64, c1: f64, c2: f64 },
}

impl Oscillator {
    fn new(config: &SpringConfig) -> Self {
        let k = config.stiffness as f64;
        let m = config.mass as f64;
        let c = config.damping as f64;
        let v0 = config.velocity as f64;
        let x0 = -1.0;

        let omega0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            Oscillator::Critical {
                omega0,
                x0,
                b: v0 + omega0 * x0,
            }
        } else if zeta < 1.0 {
            let decay = zeta * omega0;
            let omega = omega0 * (1.0 - zeta * zeta).sqrt();
            Oscillator::Under {
                decay,
                omega,
                x0,
                b: (v0 + decay * x0) / omega,
            }
        } else {
            let root = omega0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega0 + root;
            let r2 = -zeta * omega0 - root;
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            Oscillator::Over {
                r1,
                r2,
                c1: x0 - c2,
                c2,
            }
        }
    }

    fn displacement(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return -1.0;
        }
        match *self {
            Oscillator::Under { decay, omega, x0, b } => {
                (-decay * t).exp() * (x0 * (omega * t).cos() + b * (omega * t).sin())
            }
            Oscillator::Critical { omega0, x0, b } => (-omega0 * t).exp() * (x0 + b * t),
            Oscillator::Over { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
        }
    }

    /// Upper bound on `|displacement(t)|`.
    fn envelope(&self, t: f64) -> f64 {
        match *self {
            Oscillator::Under { decay, x0, b, .. } => (-decay * t).exp() * x0.hypot(b),
            Oscillator::Critical { omega0, x0, b } => {
                (-omega0 * t).exp() * (x0.abs() + b.abs() * t)
            }
            Oscillator::Over { r1, r2, c1, c2 } => {
                c1.abs() * (r1 * t).exp() + c2.abs() * (r2 * t).exp()
            }
        }
    }

    /// Whether the envelope only shrinks from `t` on.
    fn envelope_falling(&self, t: f64) -> bool {
        match *self {
            Oscillator::Critical { omega0, .. } => t >= 1.0 / omega0,
            _ => true,
        }
    }
}

/// A validated spring bound to an origin frame and an output range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    oscillator: Oscillator,
    delay: Frame,
    from: f32,
    to: f32,
    time_scale: f64,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            oscillator: Oscillator::new(&config),
            delay: 0,
            from: 0.0,
            to: 1.0,
            time_scale: 1.0,
        })
    }

    /// Moves the origin to `frames`. Earlier frames yield the start value.
    pub fn delayed(mut self, frames: Frame) -> Self {
        self.delay = frames;
        self
    }

    /// Maps progress onto `from..to` instead of `0..1`.
    pub fn range(mut self, from: f32, to: f32) -> Result<Self> {
        self.from = ensure_finite("spring from", from)?;
        self.to = ensure_finite("spring to", to)?;
        Ok(self)
    }

    /// Stretches time so the spring settles after `frames` frames at `fps`.
    pub fn with_duration(mut self, frames: u32, fps: u32) -> Result<Self> {
        if frames == 0 {
            return Err(ConfigError::InvalidSpring {
                field: "duration",
                expected: "positive",
                value: 0.0,
            });
        }
        let natural = measure_spring(&self.config, fps, DEFAULT_SETTLE_THRESHOLD)?;
        self.time_scale = natural as f64 / frames as f64;
        Ok(self)
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn delay(&self) -> Frame {
        self.delay
    }

    /// Normalized progress: exactly 0 up to the origin, converging to 1.
    pub fn progress(&self, frame: Frame, fps: u32) -> f32 {
        let local = frame - self.delay;
        if local <= 0 || fps == 0 {
            return 0.0;
        }
        let t = local as f64 * self.time_scale / fps as f64;
        let mut progress = 1.0 + self.oscillator.displacement(t);
        if self.config.overshoot_clamping {
            progress = progress.min(1.0);
        }
        progress as f32
    }

    /// Progress mapped onto the configured output range.
    pub fn value(&self, frame: Frame, fps: u32) -> f32 {
        let progress = self.progress(frame, fps);
        self.from + (self.to - self.from) * progress
    }
}

/// Number of frames after which the spring stays within `threshold` of its target.
pub fn measure_spring(config: &SpringConfig, fps: u32, threshold: f32) -> Result<u32> {
    config.validate()?;
    if config.damping == 0.0 {
        return Err(ConfigError::Undamped);
    }
    if fps == 0 {
        return Err(ConfigError::InvalidSpring {
            field: "fps",
            expected: "positive",
            value: 0.0,
        });
    }
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(ConfigError::InvalidSpring {
            field: "threshold",
            expected: "positive",
            value: threshold,
        });
    }

    let oscillator = Oscillator::new(config);
    let threshold = threshold as f64;
    let mut settled_at = 0;

    for frame in 0..=MAX_MEASURED_FRAMES {
        let t = frame as f64 / fps as f64;
        if oscillator.displacement(t).abs() >= threshold {
            settled_at = frame + 1;
        }
        if oscillator.envelope(t) < threshold && oscillator.envelope_falling(t) {
            break;
        }
    }

    tracing::trace!(
        stiffness = config.stiffness,
        damping = config.damping,
        mass = config.mass,
        frames = settled_at,
        "measured spring"
    );
    Ok(settled_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: u32 = 30;

    fn card_spring() -> Spring {
        Spring::new(SpringConfig::new(200.0, 12.0, 0.8).unwrap())
            .unwrap()
            .delayed(15)
    }

    #[test]
    fn progress_is_zero_at_and_before_origin() {
        let spring = card_spring();
        assert_eq!(spring.progress(15, FPS), 0.0);
        assert_eq!(spring.progress(0, FPS), 0.0);
        assert_eq!(spring.progress(-100, FPS), 0.0);
    }

    #[test]
    fn card_spring_settles_within_a_second() {
        let spring = card_spring();
        assert!((spring.progress(45, FPS) - 1.0).abs() < 0.01);
        assert!((spring.progress(90, FPS) - 1.0).abs() < 1e-4);
        assert!((spring.progress(10_000, FPS) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn progress_is_deterministic_regardless_of_call_order() {
        let spring = card_spring();
        let forward: Vec<u32> = (0..120).map(|f| spring.progress(f, FPS).to_bits()).collect();
        let backward: Vec<u32> = (0..120)
            .rev()
            .map(|f| spring.progress(f, FPS).to_bits())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn underdamped_spring_overshoots_unless_clamped() {
        let config = SpringConfig::new(200.0, 5.0, 1.0).unwrap();
        assert!(config.damping_ratio() < 1.0);

        let free = Spring::new(config).unwrap();
        let peak = (0..90).map(|f| free.progress(f, FPS)).fold(0.0, f32::max);
        assert!(peak > 1.05, "expected overshoot, peak was {peak}");

        let clamped = Spring::new(config.with_overshoot_clamping(true)).unwrap();
        let peak = (0..90).map(|f| clamped.progress(f, FPS)).fold(0.0, f32::max);
        assert!(peak <= 1.0);
    }

    #[test]
    fn critical_and_overdamped_springs_rise_monotonically() {
        for ratio in [1.0, 2.5] {
            let config = SpringConfig::from_damping_ratio(ratio, 120.0, 1.0).unwrap();
            assert!((config.damping_ratio() - ratio).abs() < 1e-4);

            let spring = Spring::new(config).unwrap();
            let values: Vec<f32> = (0..300).map(|f| spring.progress(f, FPS)).collect();
            for pair in values.windows(2) {
                assert!(pair[1] >= pair[0], "ratio {ratio} not monotonic: {pair:?}");
            }
            assert!(*values.last().unwrap() <= 1.0);
            assert!(*values.last().unwrap() > 0.99);
        }
    }

    #[test]
    fn value_maps_progress_onto_range() {
        let spring = Spring::new(SpringConfig::default())
            .unwrap()
            .range(0.3, 1.0)
            .unwrap();
        assert_eq!(spring.value(0, FPS), 0.3);
        assert!((spring.value(600, FPS) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(matches!(
            SpringConfig::new(-1.0, 10.0, 1.0),
            Err(ConfigError::InvalidSpring { field: "stiffness", .. })
        ));
        assert!(matches!(
            SpringConfig::new(100.0, 10.0, 0.0),
            Err(ConfigError::InvalidSpring { field: "mass", .. })
        ));
        assert!(matches!(
            SpringConfig::new(100.0, -2.0, 1.0),
            Err(ConfigError::InvalidSpring { field: "damping", .. })
        ));
        assert!(matches!(
            SpringConfig::new(f32::NAN, 10.0, 1.0),
            Err(ConfigError::NonFinite { .. })
        ));

        let sneaky = SpringConfig {
            mass: -3.0,
            ..SpringConfig::default()
        };
        assert!(Spring::new(sneaky).is_err());
    }

    #[test]
    fn measure_spring_marks_the_last_unsettled_frame() {
        let config = SpringConfig::default();
        let frames = measure_spring(&config, FPS, DEFAULT_SETTLE_THRESHOLD).unwrap();
        let spring = Spring::new(config).unwrap();

        assert!(frames > 0);
        let before = spring.progress(frames as Frame - 1, FPS);
        assert!((before - 1.0).abs() >= DEFAULT_SETTLE_THRESHOLD * 0.99);
        for frame in frames..frames + 300 {
            let p = spring.progress(frame as Frame, FPS);
            assert!(
                (p - 1.0).abs() < DEFAULT_SETTLE_THRESHOLD * 1.01,
                "frame {frame}: {p}"
            );
        }
    }

    #[test]
    fn measure_spring_rejects_undamped_springs() {
        let config = SpringConfig::new(100.0, 0.0, 1.0).unwrap();
        assert_eq!(
            measure_spring(&config, FPS, DEFAULT_SETTLE_THRESHOLD),
            Err(ConfigError::Undamped)
        );
    }

    #[test]
    fn with_duration_settles_at_requested_frame() {
        let spring = Spring::new(SpringConfig::default())
            .unwrap()
            .with_duration(40, FPS)
            .unwrap();
        let p = spring.progress(40, FPS);
        assert!((p - 1.0).abs() < DEFAULT_SETTLE_THRESHOLD + 1e-3);
        assert!(spring.progress(5, FPS) < p);
    }

    #[test]
    fn easing_curves_keep_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
        ] {
            assert!(easing.eval(0.0).abs() < 1e-3, "{easing:?}");
            assert!((easing.eval(1.0) - 1.0).abs() < 1e-3, "{easing:?}");
        }
        assert!(EasingType::EaseIn.eval(0.5) < 0.5);
        assert!(EasingType::EaseOut.eval(0.5) > 0.5);
    }
}
