//! Per-blade geometry: a quadratic Bézier bent by the local wind value.
//!
//! A blade's three control points are drawn once at construction and live
//! in the vector pool for the blade's lifetime. Curve evaluation is
//! memoized on `(wind, resolution)`: most blades see sub-tolerance wind
//! change most frames and reuse their cached points outright, which is the
//! main performance device of the whole animation.

use crate::config::{
    self, CACHE_TOLERANCE, CTRL_JITTER_X, CTRL_LIFT_MAX, CTRL_LIFT_MIN, LOD_DISTANCE_THRESHOLD,
    MAX_AMP, MAX_HEIGHT, MAX_SPEED, MIN_AMP, MIN_HEIGHT, MIN_RESOLUTION, MIN_SPEED, TIP_SPREAD,
};
use crate::wind::WindField;
use glam::DVec2;
use meadow_core::{PointHandle, Rgba, Surface, VectorPool, Xorshift64};
use std::f64::consts::{FRAC_PI_2, PI};

/// Spine stroke: a dark leaf green.
const SPINE_COLOR: Rgba = Rgba {
    r: 0.0,
    g: 160.0 / 255.0,
    b: 20.0 / 255.0,
    a: 1.0,
};
const SPINE_WEIGHT: f64 = 1.5;

/// Skeleton cross-rungs: translucent light green.
const SKELETON_COLOR: Rgba = Rgba {
    r: 100.0 / 255.0,
    g: 200.0 / 255.0,
    b: 50.0 / 255.0,
    a: 150.0 / 255.0,
};
const SKELETON_WEIGHT: f64 = 1.0;
/// Skeleton rungs span this fraction of the fill width.
const SKELETON_WIDTH_FACTOR: f64 = 0.7;

/// Reusable buffers for transient render geometry, owned by the scene and
/// shared across all blades within a frame.
#[derive(Debug, Default)]
pub struct RenderScratch {
    spine: Vec<DVec2>,
    left: Vec<DVec2>,
    right: Vec<DVec2>,
}

/// A single blade of grass.
pub struct Blade {
    base: PointHandle,
    tip: PointHandle,
    ctrl: PointHandle,
    color: Rgba,
    phase: f64,
    speed: f64,
    amp: f64,
    distance_from_center: f64,
    cached: Vec<PointHandle>,
    last_wind: f64,
    last_resolution: usize,
}

impl Blade {
    /// Creates a blade rooted at x-position `x` near the bottom of a
    /// `viewport_width` x `viewport_height` scene, drawing its geometry,
    /// color, and animation identity from `rng` and its points from `pool`.
    pub fn new(
        x: f64,
        viewport_width: f64,
        viewport_height: f64,
        rng: &mut Xorshift64,
        pool: &mut VectorPool,
    ) -> Self {
        let base_y = viewport_height - config::BASE_OFFSET;
        let base = pool.get(x, base_y);

        let height = rng.next_range(MIN_HEIGHT, MAX_HEIGHT);
        let tip_dx = rng.next_range(-TIP_SPREAD, TIP_SPREAD);
        let tip = pool.get(x + tip_dx, base_y - height);

        let base_p = pool.point(base);
        let tip_p = pool.point(tip);
        let ctrl_x = (base_p.x + tip_p.x) / 2.0 + rng.next_range(-CTRL_JITTER_X, CTRL_JITTER_X);
        let ctrl_y = (base_p.y + tip_p.y) / 2.0 - rng.next_range(CTRL_LIFT_MIN, CTRL_LIFT_MAX);
        let ctrl = pool.get(ctrl_x, ctrl_y);

        Self {
            base,
            tip,
            ctrl,
            color: grass_color(rng),
            phase: rng.next_angle(),
            speed: rng.next_range(MIN_SPEED, MAX_SPEED),
            amp: rng.next_range(MIN_AMP, MAX_AMP),
            distance_from_center: (x - viewport_width / 2.0).abs(),
            cached: Vec::new(),
            last_wind: f64::INFINITY,
            last_resolution: 0,
        }
    }

    /// Distance of the base from the viewport center; drives LOD and
    /// depth-layer assignment. Fixed for the blade's lifetime.
    pub fn distance_from_center(&self) -> f64 {
        self.distance_from_center
    }

    /// Resolution after the level-of-detail adjustment: distant blades get
    /// half the configured resolution, floored at the minimum.
    pub fn lod_resolution(&self, base_resolution: usize) -> usize {
        if self.distance_from_center > LOD_DISTANCE_THRESHOLD {
            MIN_RESOLUTION.max(base_resolution / 2)
        } else {
            base_resolution
        }
    }

    /// Evaluates the wind-displaced curve at `resolution + 1` points.
    ///
    /// Returns the cached points when `resolution` is unchanged and `wind`
    /// moved less than the cache tolerance; otherwise releases the old
    /// cache, samples the quadratic Bézier with control and tip displaced
    /// by `wind`, and caches the fresh points.
    pub fn evaluate(
        &mut self,
        wind: f64,
        resolution: usize,
        pool: &mut VectorPool,
    ) -> &[PointHandle] {
        let resolution = resolution.max(1);
        if !self.cached.is_empty()
            && resolution == self.last_resolution
            && (wind - self.last_wind).abs() < CACHE_TOLERANCE
        {
            return &self.cached;
        }

        pool.release_all(self.cached.drain(..));

        let displacement = DVec2::new(wind, 0.0);
        let base = pool.point(self.base);
        let ctrl = pool.point(self.ctrl) + displacement;
        let tip = pool.point(self.tip) + displacement;

        self.cached.reserve(resolution + 1);
        for i in 0..=resolution {
            let u = i as f64 / resolution as f64;
            let p = quadratic_bezier(base, ctrl, tip, u);
            self.cached.push(pool.get(p.x, p.y));
        }
        self.last_wind = wind;
        self.last_resolution = resolution;
        &self.cached
    }

    /// Draws the blade: silhouette fill, optional skeleton rungs, spine.
    ///
    /// `opacity` scales every alpha, letting the scene dim its background
    /// depth layer. No state changes beyond the evaluation cache.
    pub fn render(
        &mut self,
        wind_field: &WindField,
        settings: &config::SceneSettings,
        pool: &mut VectorPool,
        scratch: &mut RenderScratch,
        surface: &mut dyn Surface,
        opacity: f64,
    ) {
        let base = pool.point(self.base);
        let wind = wind_field.wind_at(base.x, base.y, self.phase, self.speed, self.amp);
        let resolution = self.lod_resolution(settings.resolution);
        self.evaluate(wind, resolution, pool);

        scratch.spine.clear();
        scratch
            .spine
            .extend(self.cached.iter().map(|&h| pool.point(h)));

        let RenderScratch { spine, left, right } = scratch;

        if settings.show_fill {
            draw_fill(
                spine,
                settings.width,
                self.color.scale_alpha(opacity),
                left,
                right,
                surface,
            );
        }

        // Detail styling is suppressed on distant blades along with the
        // resolution drop.
        if settings.show_skeleton && self.distance_from_center < LOD_DISTANCE_THRESHOLD {
            draw_skeleton(
                spine,
                settings.width,
                SKELETON_COLOR.scale_alpha(opacity),
                surface,
            );
        }

        surface.stroke_polyline(spine, SPINE_COLOR.scale_alpha(opacity), SPINE_WEIGHT);
    }

    /// Returns every pool point this blade holds: the three control points
    /// and any cached curve points. Must be called before dropping the
    /// blade or the pool leaks those slots.
    pub fn release(&mut self, pool: &mut VectorPool) {
        pool.release_all(self.cached.drain(..));
        pool.release(self.base);
        pool.release(self.tip);
        pool.release(self.ctrl);
    }
}

/// Evaluates the quadratic Bézier through `p0`, `p1`, `p2` at parameter `u`.
fn quadratic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, u: f64) -> DVec2 {
    let v = 1.0 - u;
    v * v * p0 + 2.0 * v * u * p1 + u * u * p2
}

/// Draws a grass color from the configured HSB bands.
fn grass_color(rng: &mut Xorshift64) -> Rgba {
    Rgba::from_hsb(
        rng.next_range(config::GRASS_HUE_MIN, config::GRASS_HUE_MAX),
        rng.next_range(config::GRASS_SAT_MIN, config::GRASS_SAT_MAX),
        rng.next_range(config::GRASS_BRIGHT_MIN, config::GRASS_BRIGHT_MAX),
        1.0,
    )
}

/// Unit normal of the segment from `p` toward `q`.
fn segment_normal(p: DVec2, q: DVec2) -> DVec2 {
    let angle = (q.y - p.y).atan2(q.x - p.x) + FRAC_PI_2;
    DVec2::new(angle.cos(), angle.sin())
}

/// Fills the tapered silhouette: left and right contours offset from the
/// spine along each segment's normal, width profile `sin(u * pi)` so the
/// shape pinches to nothing at root and tip.
fn draw_fill(
    spine: &[DVec2],
    width: f64,
    color: Rgba,
    left: &mut Vec<DVec2>,
    right: &mut Vec<DVec2>,
    surface: &mut dyn Surface,
) {
    let n = spine.len();
    if n < 2 {
        return;
    }
    left.clear();
    right.clear();
    for (i, &p) in spine.iter().enumerate() {
        // The final point reuses the previous segment's direction; its
        // width factor is zero there so the flipped normal is harmless.
        let q = if i + 1 < n { spine[i + 1] } else { spine[i - 1] };
        let width_factor = ((i as f64 / (n - 1) as f64) * PI).sin();
        let offset = segment_normal(p, q) * (width * width_factor);
        left.push(p + offset);
        right.push(p - offset);
    }
    left.extend(right.iter().rev());
    surface.fill_polygon(left, color);
}

/// Draws skeleton cross-rungs perpendicular to the spine.
fn draw_skeleton(spine: &[DVec2], width: f64, color: Rgba, surface: &mut dyn Surface) {
    let n = spine.len();
    if n < 2 {
        return;
    }
    let w = width * SKELETON_WIDTH_FACTOR;
    for i in 0..n - 1 {
        let p = spine[i];
        let width_factor = ((i as f64 / (n - 1) as f64) * PI).sin();
        let offset = segment_normal(p, spine[i + 1]) * (w * width_factor);
        surface.stroke_line(p + offset, p - offset, color, SKELETON_WEIGHT);
    }
}
