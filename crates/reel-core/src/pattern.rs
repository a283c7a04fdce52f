//! # Decorative Patterns
//!
//! Particle fields, grid lines and paper stacks are described by index-based
//! formulas. `Pattern` turns such a formula into a finite, restartable
//! sequence of descriptors; the periodic helpers animate them from the frame.

use std::f32::consts::TAU;

/// `count` descriptors produced by `make(i)` for `i` in `0..count`.
#[derive(Clone, Copy, Debug)]
pub struct Pattern<F> {
    count: usize,
    make: F,
}

impl<T, F> Pattern<F>
where
    F: Fn(usize) -> T,
{
    pub const fn new(count: usize, make: F) -> Self {
        Self { count, make }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        (index < self.count).then(|| (self.make)(index))
    }

    /// A fresh pass over every descriptor.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        (0..self.count).map(&self.make)
    }
}

/// Sinusoidal bob: `sin(t * speed + phase) * amplitude`.
pub fn float_offset(t: f32, speed: f32, phase: f32, amplitude: f32) -> f32 {
    (t * speed + phase).sin() * amplitude
}

/// Folds `value` into `[0, period)`, so drifting elements re-enter from the far side.
pub fn recycle(value: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return value;
    }
    value.rem_euclid(period)
}

/// Angle of the `index`-th of `count` evenly spaced rays, in radians.
pub fn radial_angle(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32 * TAU
}
