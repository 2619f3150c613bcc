//! The render-sink trait the scene draws through.
//!
//! Any 2D backend that can fill polygons and stroke lines can display the
//! field: the CPU rasterizer in `meadow-raster` is one implementation, a
//! GPU or HTML-canvas adapter would be another. The trait is object-safe so
//! the scene renders through `&mut dyn Surface`.

use crate::color::Rgba;
use glam::DVec2;

/// A 2D drawing sink with filled-polygon, polyline, and line primitives.
pub trait Surface {
    /// Fills a closed polygon. Fewer than three vertices draws nothing.
    fn fill_polygon(&mut self, points: &[DVec2], color: Rgba);

    /// Strokes an open polyline through `points` at the given weight.
    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, weight: f64);

    /// Strokes a single line segment at the given weight.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, weight: f64);
}
