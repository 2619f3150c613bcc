//! Tuning constants and the scene settings object.

use meadow_core::params::{param_bool, param_f64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- Blade geometry --

/// Minimum blade height.
pub const MIN_HEIGHT: f64 = 80.0;
/// Maximum blade height.
pub const MAX_HEIGHT: f64 = 140.0;
/// Distance from the bottom edge to every blade base.
pub const BASE_OFFSET: f64 = 20.0;
/// Maximum lateral offset of the tip from the base.
pub const TIP_SPREAD: f64 = 30.0;
/// Horizontal jitter applied to the Bézier control point.
pub const CTRL_JITTER_X: f64 = 50.0;
/// Vertical lift range of the control point above the base-tip midpoint.
pub const CTRL_LIFT_MIN: f64 = 40.0;
pub const CTRL_LIFT_MAX: f64 = 100.0;

// -- Blade population --

/// Lower clamp for the blade count.
pub const MIN_BLADES: usize = 10;
/// Upper clamp for the blade count.
pub const MAX_BLADES: usize = 150;
/// Blades spawn at least this far from the left and right viewport edges.
pub const EDGE_MARGIN: f64 = 50.0;

// -- Per-blade animation identity --

/// Individual oscillation speed range.
pub const MIN_SPEED: f64 = 0.005;
pub const MAX_SPEED: f64 = 0.05;
/// Individual oscillation amplitude range.
pub const MIN_AMP: f64 = 5.0;
pub const MAX_AMP: f64 = 40.0;

// -- Grass color bands (HSB) --

pub const GRASS_HUE_MIN: f64 = 80.0;
pub const GRASS_HUE_MAX: f64 = 120.0;
pub const GRASS_SAT_MIN: f64 = 60.0;
pub const GRASS_SAT_MAX: f64 = 90.0;
pub const GRASS_BRIGHT_MIN: f64 = 30.0;
pub const GRASS_BRIGHT_MAX: f64 = 70.0;

// -- Performance --

/// Blades farther than this from the viewport center drop to half
/// resolution and lose skeleton detail.
pub const LOD_DISTANCE_THRESHOLD: f64 = 200.0;
/// Floor for LOD-reduced curve resolution.
pub const MIN_RESOLUTION: usize = 2;
/// Ceiling for configured curve resolution.
pub const MAX_RESOLUTION: usize = 25;
/// Wind deltas below this reuse the cached curve points.
pub const CACHE_TOLERANCE: f64 = 0.1;
/// Point arena capacity: enough for every blade's control points and a
/// full-resolution cached curve at the maximum blade count.
pub const POOL_CAPACITY: usize = 8192;

// -- Stats --

/// Rolling FPS window length, in samples.
pub const FPS_WINDOW: usize = 10;
/// Minimum interval between FPS samples, in milliseconds.
pub const FPS_SAMPLE_INTERVAL_MS: f64 = 1000.0;

/// Scene configuration, mutable at runtime through commands.
///
/// `wind` is forwarded to the wind field's strength; the rest is consumed by
/// blade generation and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Number of blades, clamped to [`MIN_BLADES`]..=[`MAX_BLADES`].
    pub num_blades: usize,
    /// Curve sampling resolution, clamped to [`MIN_RESOLUTION`]..=[`MAX_RESOLUTION`].
    pub resolution: usize,
    /// Blade silhouette half-width at the widest point.
    pub width: f64,
    /// Base wind strength, clamped to [0, 100].
    pub wind: f64,
    /// Draw skeleton cross-rungs on near blades.
    pub show_skeleton: bool,
    /// Draw the filled silhouette.
    pub show_fill: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            num_blades: 60,
            resolution: 12,
            width: 6.0,
            wind: 15.0,
            show_skeleton: true,
            show_fill: true,
        }
    }
}

impl SceneSettings {
    /// Extracts settings from a JSON object, falling back to defaults for
    /// missing or mistyped keys, then clamps everything into range.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            num_blades: param_usize(params, "num_blades", d.num_blades),
            resolution: param_usize(params, "resolution", d.resolution),
            width: param_f64(params, "width", d.width),
            wind: param_f64(params, "wind", d.wind),
            show_skeleton: param_bool(params, "show_skeleton", d.show_skeleton),
            show_fill: param_bool(params, "show_fill", d.show_fill),
        }
        .sanitized()
    }

    /// Returns the settings with every numeric field clamped into its
    /// documented range.
    pub fn sanitized(self) -> Self {
        Self {
            num_blades: self.num_blades.clamp(MIN_BLADES, MAX_BLADES),
            resolution: self.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            width: if self.width.is_finite() {
                self.width.max(0.0)
            } else {
                Self::default().width
            },
            wind: if self.wind.is_finite() {
                self.wind.clamp(0.0, 100.0)
            } else {
                Self::default().wind
            },
            ..self
        }
    }
}
