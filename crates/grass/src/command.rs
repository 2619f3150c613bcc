//! Typed inbound commands for interaction handling.
//!
//! Hosts translate pointer, touch, and keyboard input into these commands
//! and enqueue them on the scene; the queue is drained once per tick before
//! the wind advances, so external events never interleave with a step.

/// A command queued from outside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Inject a localized gust at `(x, y)`. `None` parameters take the
    /// pointer-gust defaults.
    InjectGust {
        x: f64,
        y: f64,
        strength: Option<f64>,
        duration: Option<f64>,
        radius: Option<f64>,
    },
    /// Set the base wind strength (clamped to [0, 100]).
    SetStrength(f64),
    /// Set the blade count (clamped to the configured range) and regenerate.
    SetBladeCount(usize),
    /// Toggle the filled silhouette.
    ToggleFill,
    /// Toggle the skeleton cross-rungs.
    ToggleSkeleton,
    /// Regenerate all blades in place.
    Regenerate,
}
