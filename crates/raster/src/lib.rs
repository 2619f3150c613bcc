#![deny(unsafe_code)]
//! CPU rasterizer: a [`Surface`] implementation over an RGBA8 pixel buffer.
//!
//! Polygons fill by even-odd scanline intersection; strokes expand to quads
//! around the segment. All drawing composites src-over with the color's
//! alpha. Coordinates outside the canvas clip silently; blades bending
//! past an edge must never fail a frame.

#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec2;
use meadow_core::{Rgba, Surface};

/// Minimum effective stroke weight, so hairline strokes stay visible.
const MIN_STROKE_WEIGHT: f64 = 1.0;

/// An RGBA8 pixel buffer that implements [`Surface`].
pub struct RasterCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    // Scanline intersection scratch, reused across fills.
    crossings: Vec<f64>,
}

impl RasterCanvas {
    /// Creates an opaque black canvas. Zero dimensions yield an inert
    /// canvas that accepts and ignores all drawing.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
            crossings: Vec::new(),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA8 buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads back one pixel as `[r, g, b, a]`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = (y * self.width + x) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Fills the whole canvas with `color`, replacing existing content.
    pub fn clear(&mut self, color: Rgba) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Composites `color` over the pixel at `(x, y)` using its alpha.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let idx = (y * self.width + x) * 4;
        let a = color.a;
        let inv = 1.0 - a;
        self.pixels[idx] = blend_channel(self.pixels[idx], color.r, a, inv);
        self.pixels[idx + 1] = blend_channel(self.pixels[idx + 1], color.g, a, inv);
        self.pixels[idx + 2] = blend_channel(self.pixels[idx + 2], color.b, a, inv);
        self.pixels[idx + 3] = self.pixels[idx + 3].max((a * 255.0).round() as u8);
    }

    /// Blends a horizontal span of pixels on row `y` from `x0` to `x1`
    /// (inclusive, canvas coordinates), clipping to the canvas.
    fn blend_span(&mut self, y: usize, x0: f64, x1: f64, color: Rgba) {
        let start = x0.max(0.0).floor() as usize;
        let end = x1.min(self.width as f64 - 1.0).floor() as usize;
        if x1 < 0.0 || x0 >= self.width as f64 {
            return;
        }
        for x in start..=end {
            self.blend_pixel(x, y, color);
        }
    }
}

/// Src-over blend of one 8-bit channel against a [0, 1] source component.
fn blend_channel(dst: u8, src: f64, a: f64, inv: f64) -> u8 {
    (src * 255.0 * a + dst as f64 * inv).round().clamp(0.0, 255.0) as u8
}

impl Surface for RasterCanvas {
    fn fill_polygon(&mut self, points: &[DVec2], color: Rgba) {
        if points.len() < 3 || self.width == 0 || self.height == 0 || color.a <= 0.0 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }
        let row_start = min_y.max(0.0).floor() as usize;
        let row_end = max_y.min(self.height as f64 - 1.0).ceil() as usize;
        if max_y < 0.0 || min_y >= self.height as f64 {
            return;
        }

        let mut crossings = std::mem::take(&mut self.crossings);
        for y in row_start..=row_end {
            // Sample at the row center for stable edge classification.
            let yc = y as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let p = points[i];
                let q = points[(i + 1) % points.len()];
                // Half-open edge rule: count edges crossing the scanline once.
                if (p.y <= yc && q.y > yc) || (q.y <= yc && p.y > yc) {
                    let t = (yc - p.y) / (q.y - p.y);
                    crossings.push(p.x + t * (q.x - p.x));
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            for pair in crossings.chunks_exact(2) {
                self.blend_span(y, pair[0], pair[1], color);
            }
        }
        self.crossings = crossings;
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, weight: f64) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], color, weight);
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, weight: f64) {
        let dir = to - from;
        let len = dir.length();
        if !len.is_finite() {
            return;
        }
        if len < 1e-9 {
            // Degenerate segment: a single blended pixel.
            if from.x >= 0.0 && from.y >= 0.0 {
                let (x, y) = (from.x as usize, from.y as usize);
                if x < self.width && y < self.height {
                    self.blend_pixel(x, y, color);
                }
            }
            return;
        }
        let half = weight.max(MIN_STROKE_WEIGHT) / 2.0;
        let normal = DVec2::new(-dir.y, dir.x) / len * half;
        let quad = [from + normal, to + normal, to - normal, from - normal];
        self.fill_polygon(&quad, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> RasterCanvas {
        RasterCanvas::new(64, 64)
    }

    const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    #[test]
    fn new_canvas_is_black() {
        let c = canvas();
        assert_eq!(c.pixels().len(), 64 * 64 * 4);
        assert!(c.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_sets_every_pixel() {
        let mut c = canvas();
        c.clear(Rgba::from_u8(20, 30, 50, 255));
        assert_eq!(c.pixel(0, 0), [20, 30, 50, 255]);
        assert_eq!(c.pixel(63, 63), [20, 30, 50, 255]);
    }

    #[test]
    fn fill_triangle_covers_interior_not_exterior() {
        let mut c = canvas();
        c.fill_polygon(
            &[
                DVec2::new(10.0, 10.0),
                DVec2::new(50.0, 10.0),
                DVec2::new(30.0, 50.0),
            ],
            WHITE,
        );
        assert_eq!(c.pixel(30, 20), [255, 255, 255, 255], "interior not filled");
        assert_eq!(c.pixel(2, 2), [0, 0, 0, 0], "exterior was touched");
        assert_eq!(c.pixel(60, 60), [0, 0, 0, 0], "exterior was touched");
    }

    #[test]
    fn fill_with_fewer_than_three_points_is_a_no_op() {
        let mut c = canvas();
        c.fill_polygon(&[DVec2::new(10.0, 10.0), DVec2::new(50.0, 50.0)], WHITE);
        assert!(c.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_clips_offscreen_polygons_silently() {
        let mut c = canvas();
        // Completely outside.
        c.fill_polygon(
            &[
                DVec2::new(-100.0, -100.0),
                DVec2::new(-50.0, -100.0),
                DVec2::new(-75.0, -50.0),
            ],
            WHITE,
        );
        // Straddling the left edge.
        c.fill_polygon(
            &[
                DVec2::new(-10.0, 20.0),
                DVec2::new(10.0, 20.0),
                DVec2::new(10.0, 30.0),
                DVec2::new(-10.0, 30.0),
            ],
            WHITE,
        );
        assert_eq!(c.pixel(5, 25), [255, 255, 255, 255], "clipped fill missing");
        assert_eq!(c.pixel(20, 25), [0, 0, 0, 0]);
    }

    #[test]
    fn alpha_blending_is_src_over() {
        let mut c = canvas();
        c.clear(Rgba::from_u8(100, 100, 100, 255));
        let half_white = Rgba::new(1.0, 1.0, 1.0, 0.5);
        c.fill_polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(64.0, 0.0),
                DVec2::new(64.0, 64.0),
                DVec2::new(0.0, 64.0),
            ],
            half_white,
        );
        let [r, ..] = c.pixel(32, 32);
        // 255 * 0.5 + 100 * 0.5 = 177.5
        assert!((176..=179).contains(&r), "blend produced {r}");
    }

    #[test]
    fn zero_alpha_draws_nothing() {
        let mut c = canvas();
        c.fill_polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(64.0, 0.0),
                DVec2::new(32.0, 64.0),
            ],
            Rgba::new(1.0, 1.0, 1.0, 0.0),
        );
        assert!(c.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn horizontal_stroke_marks_the_row() {
        let mut c = canvas();
        c.stroke_line(DVec2::new(4.0, 32.0), DVec2::new(60.0, 32.0), WHITE, 2.0);
        assert_eq!(c.pixel(32, 32), [255, 255, 255, 255]);
        assert_eq!(c.pixel(32, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn polyline_connects_all_segments() {
        let mut c = canvas();
        c.stroke_polyline(
            &[
                DVec2::new(8.0, 8.0),
                DVec2::new(56.0, 8.0),
                DVec2::new(56.0, 56.0),
            ],
            WHITE,
            2.0,
        );
        assert_ne!(c.pixel(30, 8), [0, 0, 0, 0], "first segment missing");
        assert_ne!(c.pixel(56, 30), [0, 0, 0, 0], "second segment missing");
    }

    #[test]
    fn degenerate_stroke_is_a_single_pixel() {
        let mut c = canvas();
        c.stroke_line(DVec2::new(10.0, 10.0), DVec2::new(10.0, 10.0), WHITE, 3.0);
        assert_eq!(c.pixel(10, 10), [255, 255, 255, 255]);
        assert_eq!(c.pixel(12, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn zero_sized_canvas_accepts_drawing() {
        let mut c = RasterCanvas::new(0, 0);
        c.fill_polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(5.0, 10.0),
            ],
            WHITE,
        );
        c.stroke_line(DVec2::ZERO, DVec2::new(5.0, 5.0), WHITE, 1.0);
        assert!(c.pixels().is_empty());
    }

    #[test]
    fn scene_renders_onto_the_canvas() {
        // End to end: a running scene paints something non-black everywhere
        // reasonable and never panics.
        use meadow_grass::{Scene, SceneSettings};
        let mut scene = Scene::new(64.0, 64.0, 42, SceneSettings::default()).unwrap();
        scene.init();
        scene.start();
        let mut c = canvas();
        for frame in 0..10 {
            scene.tick(frame as f64 * 16.0, &mut c);
        }
        let nonzero = c.pixels().iter().filter(|&&b| b != 0).count();
        assert!(nonzero > 0, "scene rendered nothing");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_point() -> impl Strategy<Value = DVec2> {
            (-200.0_f64..200.0, -200.0_f64..200.0).prop_map(|(x, y)| DVec2::new(x, y))
        }

        proptest! {
            /// Arbitrary polygons never panic or write out of bounds.
            #[test]
            fn fill_polygon_total(points in prop::collection::vec(any_point(), 0..12)) {
                let mut c = RasterCanvas::new(32, 32);
                c.fill_polygon(&points, Rgba::new(0.2, 0.8, 0.4, 0.9));
                prop_assert_eq!(c.pixels().len(), 32 * 32 * 4);
            }

            /// Arbitrary strokes never panic.
            #[test]
            fn stroke_line_total(a in any_point(), b in any_point(), w in 0.0_f64..10.0) {
                let mut c = RasterCanvas::new(32, 32);
                c.stroke_line(a, b, Rgba::new(1.0, 1.0, 1.0, 1.0), w);
            }
        }
    }
}
