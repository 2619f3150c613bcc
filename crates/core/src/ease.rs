//! Easing and interval-mapping helpers.
//!
//! Pure functions shared by the wind field (gust falloff curves) and the
//! renderer (background gradient). All are total: degenerate input intervals
//! return the start of the output interval instead of dividing by zero.

use std::f64::consts::PI;

/// Interval width below which `map` treats the input range as degenerate.
const DEGENERATE_EPS: f64 = 1e-12;

/// Sinusoidal ease-in-out: 0 at 0, 1 at 1, symmetric about 0.5.
pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// Linearly remaps `value` from [start1, stop1] to [start2, stop2].
///
/// Values outside the input interval extrapolate. A degenerate input
/// interval maps everything to `start2`.
pub fn map(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    let span = stop1 - start1;
    if span.abs() < DEGENERATE_EPS {
        return start2;
    }
    start2 + (stop2 - start2) * ((value - start1) / span)
}

/// Remaps `value` between intervals with an easing function applied to the
/// normalized parameter.
pub fn map_eased(
    value: f64,
    start1: f64,
    stop1: f64,
    start2: f64,
    stop2: f64,
    ease: fn(f64) -> f64,
) -> f64 {
    let normalized = ease(map(value, start1, stop1, 0.0, 1.0));
    map(normalized, 0.0, 1.0, start2, stop2)
}
