//! Scene manager: owns the wind field, the blade population, and the
//! vector pool, and drives them through an explicit lifecycle.
//!
//! One external tick drives a step and a render synchronously; interaction
//! arrives as typed [`Command`]s on a queue drained at the start of each
//! step, so there is exactly one writer no matter how the host dispatches
//! events.

use crate::blade::{Blade, RenderScratch};
use crate::command::Command;
use crate::config::{
    SceneSettings, EDGE_MARGIN, FPS_SAMPLE_INTERVAL_MS, FPS_WINDOW, LOD_DISTANCE_THRESHOLD,
    MAX_BLADES, MIN_BLADES, POOL_CAPACITY,
};
use crate::wind::{WindField, WindStats};
use glam::DVec2;
use meadow_core::ease::map;
use meadow_core::{MeadowError, PoolStats, Rgba, Surface, VectorPool, Xorshift64};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Sky gradient endpoints, top to bottom.
const BG_TOP: Rgba = Rgba {
    r: 20.0 / 255.0,
    g: 30.0 / 255.0,
    b: 50.0 / 255.0,
    a: 1.0,
};
const BG_BOTTOM: Rgba = Rgba {
    r: 5.0 / 255.0,
    g: 10.0 / 255.0,
    b: 20.0 / 255.0,
    a: 1.0,
};

/// Opacity of the distant depth layer.
const BACKGROUND_LAYER_OPACITY: f64 = 0.7;

/// Seed offset separating the blade-geometry stream from the wind stream.
const BLADE_SEED_OFFSET: u64 = 7919;

/// Lifecycle state of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Constructed, no blades yet.
    Uninitialized,
    /// Blades generated, wind configured, not yet running.
    Ready,
    /// Ticking: `advance`/`tick` step and render every frame.
    Running,
    /// Suspended: `advance`/`tick` do nothing until resumed.
    Paused,
    /// All blades released. Terminal.
    Destroyed,
}

/// Aggregate statistics for displays and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct SceneStats {
    pub fps: f64,
    pub blade_count: usize,
    pub wind: WindStats,
    pub pool: PoolStats,
    pub settings: SceneSettings,
}

/// The grass field: blade collection, wind field, pool, and frame driver.
pub struct Scene {
    width: f64,
    height: f64,
    pool: VectorPool,
    wind: WindField,
    blades: Vec<Blade>,
    settings: SceneSettings,
    rng: Xorshift64,
    state: SceneState,
    queue: VecDeque<Command>,
    scratch: RenderScratch,
    // FPS bookkeeping
    frame_history: VecDeque<f64>,
    instant_fps: f64,
    last_frame_ms: Option<f64>,
    last_sample_ms: Option<f64>,
}

impl Scene {
    /// Creates an uninitialized scene over a `width` x `height` viewport.
    ///
    /// Returns `MeadowError::InvalidDimensions` unless both dimensions are
    /// finite and positive. Settings are sanitized into range.
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        settings: SceneSettings,
    ) -> Result<Self, MeadowError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MeadowError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            pool: VectorPool::new(POOL_CAPACITY),
            wind: WindField::new(width, height, seed),
            blades: Vec::new(),
            settings: settings.sanitized(),
            rng: Xorshift64::new(seed.wrapping_add(BLADE_SEED_OFFSET)),
            state: SceneState::Uninitialized,
            queue: VecDeque::new(),
            scratch: RenderScratch::default(),
            frame_history: VecDeque::with_capacity(FPS_WINDOW),
            instant_fps: 0.0,
            last_frame_ms: None,
            last_sample_ms: None,
        })
    }

    /// Generates the initial blades and applies the configured wind
    /// strength. Uninitialized → Ready.
    pub fn init(&mut self) {
        if self.state != SceneState::Uninitialized {
            return;
        }
        self.wind.set_strength(self.settings.wind);
        self.state = SceneState::Ready;
        self.regenerate();
        log::info!(
            "scene ready: {}x{}, {} blades",
            self.width,
            self.height,
            self.blades.len()
        );
    }

    /// Ready/Paused → Running.
    pub fn start(&mut self) {
        if matches!(self.state, SceneState::Ready | SceneState::Paused) {
            self.state = SceneState::Running;
        }
    }

    /// Running → Paused. External trigger only; a paused scene simply stops
    /// being advanced.
    pub fn pause(&mut self) {
        if self.state == SceneState::Running {
            self.state = SceneState::Paused;
        }
    }

    /// Paused → Running.
    pub fn resume(&mut self) {
        if self.state == SceneState::Paused {
            self.state = SceneState::Running;
        }
    }

    /// Releases every blade back to the pool. Terminal.
    pub fn destroy(&mut self) {
        for blade in &mut self.blades {
            blade.release(&mut self.pool);
        }
        self.blades.clear();
        self.state = SceneState::Destroyed;
        log::debug!("scene destroyed");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Enqueues a command; it takes effect at the start of the next step.
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Destroys and recreates the blade population at random x-positions
    /// within the edge margin, stored far-to-near for depth-layered drawing
    /// (blade distance never changes, so the order is set once here).
    pub fn regenerate(&mut self) {
        if matches!(self.state, SceneState::Uninitialized | SceneState::Destroyed) {
            return;
        }
        for blade in &mut self.blades {
            blade.release(&mut self.pool);
        }
        self.blades.clear();

        let margin = EDGE_MARGIN.min(self.width / 2.0);
        for _ in 0..self.settings.num_blades {
            let x = self.rng.next_range(margin, self.width - margin);
            self.blades
                .push(Blade::new(x, self.width, self.height, &mut self.rng, &mut self.pool));
        }
        self.blades.sort_by(|a, b| {
            b.distance_from_center()
                .partial_cmp(&a.distance_from_center())
                .unwrap_or(Ordering::Equal)
        });
        log::debug!("regenerated {} blades", self.blades.len());
    }

    /// Clamps `count` into the configured range, stores it, and
    /// regenerates.
    pub fn set_blade_count(&mut self, count: usize) {
        self.settings.num_blades = count.clamp(MIN_BLADES, MAX_BLADES);
        self.regenerate();
    }

    /// Sets the base wind strength; the stored setting mirrors the wind
    /// field's clamped value.
    pub fn set_strength(&mut self, strength: f64) {
        self.wind.set_strength(strength);
        self.settings.wind = self.wind.strength();
    }

    /// Injects a gust directly (hosts may prefer queuing
    /// [`Command::InjectGust`]).
    pub fn inject_gust(
        &mut self,
        x: f64,
        y: f64,
        strength: Option<f64>,
        duration: Option<f64>,
        radius: Option<f64>,
    ) {
        self.wind.inject_gust(x, y, strength, duration, radius);
    }

    /// Resizes the viewport. Existing blades keep their geometry; the wind
    /// field spawns gusts over the new bounds.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
            self.wind.set_bounds(width, height);
        }
    }

    /// Drains the command queue, then advances the wind field one step.
    pub fn step(&mut self) {
        if self.state == SceneState::Destroyed {
            return;
        }
        while let Some(command) = self.queue.pop_front() {
            self.apply(command);
        }
        self.wind.step();
    }

    /// Frame driver without rendering: steps and updates the FPS window.
    /// Only acts while Running.
    pub fn advance(&mut self, now_ms: f64) {
        if self.state != SceneState::Running {
            return;
        }
        self.step();
        self.note_frame(now_ms);
    }

    /// Full frame driver: advance, then render. Only acts while Running.
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        if self.state != SceneState::Running {
            return;
        }
        self.advance(now_ms);
        self.render(surface);
    }

    /// Draws the background and both blade depth layers.
    ///
    /// Blades are already ordered far-to-near; the distant layer (beyond
    /// the LOD threshold) draws first at reduced opacity, then the near
    /// layer at full opacity.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        if self.state == SceneState::Destroyed {
            return;
        }
        self.draw_background(surface);

        let split = self
            .blades
            .partition_point(|b| b.distance_from_center() > LOD_DISTANCE_THRESHOLD);
        let (far, near) = self.blades.split_at_mut(split);
        for blade in far {
            blade.render(
                &self.wind,
                &self.settings,
                &mut self.pool,
                &mut self.scratch,
                surface,
                BACKGROUND_LAYER_OPACITY,
            );
        }
        for blade in near {
            blade.render(
                &self.wind,
                &self.settings,
                &mut self.pool,
                &mut self.scratch,
                surface,
                1.0,
            );
        }
    }

    /// Aggregate statistics: FPS window mean, population, wind, pool,
    /// settings.
    pub fn stats(&self) -> SceneStats {
        SceneStats {
            fps: self.fps(),
            blade_count: self.blades.len(),
            wind: self.wind.stats(),
            pool: self.pool.stats(),
            settings: self.settings.clone(),
        }
    }

    /// Mean of the rolling FPS window; 0 before the first sample.
    pub fn fps(&self) -> f64 {
        if self.frame_history.is_empty() {
            return 0.0;
        }
        self.frame_history.iter().sum::<f64>() / self.frame_history.len() as f64
    }

    /// Read access to the wind field.
    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    /// Number of live blades.
    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }

    /// Current settings.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::InjectGust {
                x,
                y,
                strength,
                duration,
                radius,
            } => self.wind.inject_gust(x, y, strength, duration, radius),
            Command::SetStrength(v) => self.set_strength(v),
            Command::SetBladeCount(n) => self.set_blade_count(n),
            Command::ToggleFill => self.settings.show_fill = !self.settings.show_fill,
            Command::ToggleSkeleton => self.settings.show_skeleton = !self.settings.show_skeleton,
            Command::Regenerate => self.regenerate(),
        }
    }

    /// Tracks instantaneous FPS from frame deltas and folds it into the
    /// rolling window at most once per sample interval.
    fn note_frame(&mut self, now_ms: f64) {
        if let Some(last) = self.last_frame_ms {
            let delta = now_ms - last;
            if delta > 0.0 {
                self.instant_fps = 1000.0 / delta;
            }
        }
        self.last_frame_ms = Some(now_ms);

        let due = match self.last_sample_ms {
            None => true,
            Some(last) => now_ms - last > FPS_SAMPLE_INTERVAL_MS,
        };
        if due && self.instant_fps > 0.0 {
            self.frame_history.push_back(self.instant_fps);
            while self.frame_history.len() > FPS_WINDOW {
                self.frame_history.pop_front();
            }
            self.last_sample_ms = Some(now_ms);
        }
    }

    /// Vertical sky gradient, one scanline at a time.
    fn draw_background(&self, surface: &mut dyn Surface) {
        let rows = self.height.ceil() as usize;
        for row in 0..=rows {
            let y = row as f64;
            let t = map(y, 0.0, self.height, 0.0, 1.0);
            let color = BG_TOP.lerp(BG_BOTTOM, t);
            surface.stroke_line(
                DVec2::new(0.0, y),
                DVec2::new(self.width, y),
                color,
                1.0,
            );
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        if self.state != SceneState::Destroyed {
            self.destroy();
        }
    }
}
