#![deny(unsafe_code)]
//! Core primitives for the meadow grass-field animation.
//!
//! Provides the `Surface` render-sink trait, the `VectorPool` point arena,
//! `Rgba` color, `Xorshift64` PRNG, `SmoothNoise`, easing/mapping helpers,
//! and tolerant JSON parameter extraction.

pub mod color;
pub mod ease;
pub mod error;
pub mod params;
pub mod pool;
pub mod prng;
pub mod smooth;
pub mod surface;

pub use color::Rgba;
pub use error::MeadowError;
pub use pool::{PointHandle, PoolStats, VectorPool};
pub use prng::Xorshift64;
pub use smooth::SmoothNoise;
pub use surface::Surface;
