//! Time-evolving wind field: base drift, global sway, spatial turbulence,
//! and transient localized gusts.
//!
//! The field layers independent signals at different frequencies: a
//! low-frequency noise drift everyone shares, a slow sinusoidal sway,
//! mid-frequency spatial turbulence, and short-lived directional gusts.
//! The motion reads as organic without any physical simulation, and the
//! whole composition is deterministic per seed.

use meadow_core::ease::{ease_in_out_sine, map};
use meadow_core::{SmoothNoise, Xorshift64};
use serde::Serialize;

/// Maximum number of simultaneous gusts.
pub const MAX_GUSTS: usize = 25;

/// Frequency of the 1D noise driving the base drift.
const BASE_WIND_FREQ: f64 = 0.005;
/// Global phase advance per step.
const GLOBAL_PHASE_STEP: f64 = 0.01;

/// Global sway: frequency, per-blade phase coupling, amplitude.
const SWAY_FREQ: f64 = 0.012;
const SWAY_PHASE_SCALE: f64 = 0.2;
const SWAY_AMPLITUDE: f64 = 10.0;

/// Spatial turbulence: space scale, time scale, amplitude.
const TURBULENCE_SCALE: f64 = 0.012;
const TURBULENCE_TIME_SCALE: f64 = 0.008;
const TURBULENCE_AMPLITUDE: f64 = 18.0;

/// Gust oscillation frequency and output gain.
const GUST_WAVE_FREQ: f64 = 0.05;
const GUST_GAIN: f64 = 1.2;

/// The final wind value is scaled by `strength / WIND_NORMALIZER`.
const WIND_NORMALIZER: f64 = 16.0;

/// Spontaneous gust parameter ranges.
const SPAWN_STRENGTH_MIN: f64 = 10.0;
const SPAWN_STRENGTH_MAX: f64 = 30.0;
const SPAWN_DURATION_MIN: f64 = 30.0;
const SPAWN_DURATION_MAX: f64 = 120.0;
const SPAWN_RADIUS_MIN: f64 = 80.0;
const SPAWN_RADIUS_MAX: f64 = 150.0;

/// Injected (pointer) gust default ranges.
const INJECT_STRENGTH_MIN: f64 = 30.0;
const INJECT_STRENGTH_MAX: f64 = 45.0;
const INJECT_DURATION_MIN: f64 = 60.0;
const INJECT_DURATION_MAX: f64 = 100.0;
const INJECT_RADIUS_MIN: f64 = 150.0;
const INJECT_RADIUS_MAX: f64 = 230.0;

/// Default base strength and spontaneous gust probability.
const DEFAULT_STRENGTH: f64 = 15.0;
const DEFAULT_GUST_PROBABILITY: f64 = 0.001;
/// Upper clamp for the spontaneous gust probability.
const MAX_GUST_PROBABILITY: f64 = 0.01;

/// A transient, spatially localized wind perturbation.
///
/// Immutable except for `age`, which the field advances once per step. A
/// gust influences positions within `radius` of its origin, fading with
/// both distance and age.
#[derive(Debug, Clone, PartialEq)]
pub struct Gust {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub strength: f64,
    pub duration: f64,
    pub age: u32,
    pub phase: f64,
}

/// Wind field tunables.
#[derive(Debug, Clone, Copy)]
struct WindSettings {
    strength: f64,
    gust_probability: f64,
}

/// Snapshot of wind-field state for stats displays.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindStats {
    pub base_wind: f64,
    pub active_gusts: usize,
    pub strength: f64,
    pub gust_probability: f64,
}

/// The layered wind field.
#[derive(Clone)]
pub struct WindField {
    base_wind: f64,
    time: f64,
    global_phase: f64,
    gusts: Vec<Gust>,
    settings: WindSettings,
    width: f64,
    height: f64,
    noise: SmoothNoise,
    rng: Xorshift64,
}

impl WindField {
    /// Creates a still field over a `width` x `height` viewport.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            base_wind: 0.0,
            time: 0.0,
            global_phase: 0.0,
            gusts: Vec::with_capacity(MAX_GUSTS),
            settings: WindSettings {
                strength: DEFAULT_STRENGTH,
                gust_probability: DEFAULT_GUST_PROBABILITY,
            },
            width,
            height,
            noise: SmoothNoise::new(seed as u32),
            rng: Xorshift64::new(seed),
        }
    }

    /// Advances the field by one step. Always succeeds.
    ///
    /// Recomputes the base drift, may spawn a spontaneous gust, ages every
    /// gust, expires the finished ones, and evicts oldest-first past the
    /// capacity cap.
    pub fn step(&mut self) {
        self.time += 1.0;
        self.global_phase += GLOBAL_PHASE_STEP;
        self.base_wind = self.noise.sample1(self.time * BASE_WIND_FREQ) * self.settings.strength;

        if self.rng.next_f64() < self.settings.gust_probability && self.gusts.len() < MAX_GUSTS {
            let gust = Gust {
                strength: self.rng.next_range(SPAWN_STRENGTH_MIN, SPAWN_STRENGTH_MAX),
                duration: self.rng.next_range(SPAWN_DURATION_MIN, SPAWN_DURATION_MAX),
                age: 0,
                phase: self.rng.next_angle(),
                x: self.rng.next_range(0.0, self.width),
                y: self.rng.next_range(0.0, self.height),
                radius: self.rng.next_range(SPAWN_RADIUS_MIN, SPAWN_RADIUS_MAX),
            };
            self.gusts.push(gust);
        }

        for gust in &mut self.gusts {
            gust.age += 1;
        }
        // A gust whose age exceeds its duration is spent. At age == duration
        // the age influence is exactly zero, so keeping it that one extra
        // step changes nothing physically and makes a duration-D gust
        // observable for exactly D steps.
        self.gusts.retain(|g| f64::from(g.age) <= g.duration);

        if self.gusts.len() > MAX_GUSTS {
            // Stable sort: insertion order breaks age ties, oldest evict first.
            self.gusts.sort_by_key(|g| g.age);
            self.gusts.truncate(MAX_GUSTS);
        }
    }

    /// Evaluates the wind at `(x, y)` for a blade with the given animation
    /// identity. Pure with respect to field state.
    pub fn wind_at(&self, x: f64, y: f64, phase: f64, speed: f64, amp: f64) -> f64 {
        let mut wind = self.base_wind;

        // Global sway: every blade moves gently together.
        wind += (self.time * SWAY_FREQ + phase * SWAY_PHASE_SCALE).sin() * SWAY_AMPLITUDE;

        // Local turbulence, drifting over time.
        let t = self.time * TURBULENCE_TIME_SCALE;
        wind += (self.noise.sample3(x * TURBULENCE_SCALE, y * TURBULENCE_SCALE, t) - 0.5)
            * TURBULENCE_AMPLITUDE;

        // Directional gust contributions: push away from the gust origin,
        // fading with distance and age.
        for gust in &self.gusts {
            let dx = x - gust.x;
            let dy = y - gust.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < gust.radius {
                let distance_influence = ease_in_out_sine(map(distance, 0.0, gust.radius, 1.0, 0.0));
                let age_influence =
                    ease_in_out_sine(map(f64::from(gust.age), 0.0, gust.duration, 1.0, 0.0));
                let direction = if dx > 0.0 { 1.0 } else { -1.0 };
                let force = direction * gust.strength * distance_influence * age_influence;
                wind += force * (self.time * GUST_WAVE_FREQ + gust.phase).sin() * GUST_GAIN;
            }
        }

        // Individual blade movement.
        wind += (self.time * speed + phase).sin() * amp;

        wind * (self.settings.strength / WIND_NORMALIZER)
    }

    /// Injects a gust at `(x, y)`; `None` parameters take the pointer-gust
    /// defaults. Silently dropped when the field is at capacity.
    pub fn inject_gust(
        &mut self,
        x: f64,
        y: f64,
        strength: Option<f64>,
        duration: Option<f64>,
        radius: Option<f64>,
    ) {
        if self.gusts.len() >= MAX_GUSTS {
            log::debug!("gust at ({x:.0}, {y:.0}) dropped: field at capacity");
            return;
        }
        let gust = Gust {
            strength: strength
                .unwrap_or_else(|| self.rng.next_range(INJECT_STRENGTH_MIN, INJECT_STRENGTH_MAX)),
            duration: duration
                .unwrap_or_else(|| self.rng.next_range(INJECT_DURATION_MIN, INJECT_DURATION_MAX)),
            age: 0,
            phase: self.rng.next_angle(),
            x,
            y,
            radius: radius
                .unwrap_or_else(|| self.rng.next_range(INJECT_RADIUS_MIN, INJECT_RADIUS_MAX)),
        };
        self.gusts.push(gust);
    }

    /// Sets the base wind strength, clamped to [0, 100].
    pub fn set_strength(&mut self, strength: f64) {
        self.settings.strength = if strength.is_finite() {
            strength.clamp(0.0, 100.0)
        } else {
            DEFAULT_STRENGTH
        };
    }

    /// Sets the spontaneous gust probability, clamped to [0, 0.01].
    pub fn set_gust_probability(&mut self, probability: f64) {
        self.settings.gust_probability = if probability.is_finite() {
            probability.clamp(0.0, MAX_GUST_PROBABILITY)
        } else {
            DEFAULT_GUST_PROBABILITY
        };
    }

    /// Follows a viewport resize; affects where spontaneous gusts spawn.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Current base drift value.
    pub fn base_wind(&self) -> f64 {
        self.base_wind
    }

    /// Monotonic step counter.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Accumulated global phase.
    pub fn global_phase(&self) -> f64 {
        self.global_phase
    }

    /// Current base strength.
    pub fn strength(&self) -> f64 {
        self.settings.strength
    }

    /// Number of live gusts.
    pub fn gust_count(&self) -> usize {
        self.gusts.len()
    }

    /// Read access to the live gusts.
    pub fn gusts(&self) -> &[Gust] {
        &self.gusts
    }

    /// Snapshot of the field state for stats displays.
    pub fn stats(&self) -> WindStats {
        WindStats {
            base_wind: self.base_wind,
            active_gusts: self.gusts.len(),
            strength: self.settings.strength,
            gust_probability: self.settings.gust_probability,
        }
    }
}
