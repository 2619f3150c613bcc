#![deny(unsafe_code)]
//! Grass-field simulation: a procedural meadow bending under layered wind.
//!
//! The [`WindField`](wind::WindField) composes base drift, global sway,
//! spatial turbulence, and transient gusts into a per-position wind value;
//! each [`Blade`](blade::Blade) bends a quadratic Bézier by that value with
//! memoized evaluation and distance-based level of detail; the
//! [`Scene`](scene::Scene) owns both plus the vector pool, drains a typed
//! command queue once per tick, and renders depth-layered through any
//! [`Surface`](meadow_core::Surface).

pub mod blade;
pub mod command;
pub mod config;
pub mod scene;
pub mod wind;

pub use blade::Blade;
pub use command::Command;
pub use config::SceneSettings;
pub use scene::{Scene, SceneState, SceneStats};
pub use wind::{Gust, WindField, WindStats};
