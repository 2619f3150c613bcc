//! Smooth-noise sampling for organic wind variation.
//!
//! Wraps `noise::Perlin` behind a [0, 1]-ranged API: the wind formulas treat
//! noise as a unit-interval signal (base drift multiplies it by the wind
//! strength, turbulence recenters it around 0.5), so the raw [-1, 1] Perlin
//! output is remapped here once instead of at every call site.

use noise::{NoiseFn, Perlin};

/// Deterministic smooth noise, sampled in one or three dimensions.
///
/// Same seed and inputs always produce the same output.
#[derive(Clone)]
pub struct SmoothNoise {
    perlin: Perlin,
}

impl SmoothNoise {
    /// Creates a new smooth-noise source for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Samples 1D noise at `t`, returning a value in [0, 1].
    pub fn sample1(&self, t: f64) -> f64 {
        to_unit(self.perlin.get([t, 0.0]))
    }

    /// Samples 3D noise at `(x, y, z)`, returning a value in [0, 1].
    ///
    /// The third axis is conventionally time, giving spatial turbulence that
    /// drifts smoothly from frame to frame.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        to_unit(self.perlin.get([x, y, z]))
    }
}

/// Remaps nominal [-1, 1] Perlin output into [0, 1], clamping the slight
/// overshoot the gradient-noise algorithm can produce at extreme points.
fn to_unit(v: f64) -> f64 {
    (v * 0.5 + 0.5).clamp(0.0, 1.0)
}
