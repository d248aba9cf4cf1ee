//! The particle field instance and its per-frame algorithm.

use std::sync::Arc;

use constella_core::{FieldConfig, Point, Rgb, SurfaceSize, ThemeColors, ThemeSpec};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::particle::{Particle, spawn_particles};
use crate::pointer::PointerState;
use crate::scheduler::{FieldId, FrameHandle, FrameRequest, FrameScheduler};
use crate::surface::{DisplayList, Surface};

/// Host layout that fields mount into.
pub trait MountPoints {
    /// Logical size of the named region, if it exists.
    fn surface_size(&self, name: &str) -> Option<SurfaceSize>;

    /// Width of the whole viewport, used to pick the particle tier.
    fn viewport_width(&self) -> f64;
}

/// Settings shared by every field of a page.
#[derive(Debug, Clone, Default)]
pub struct FieldSettings {
    pub config: Arc<FieldConfig>,
    pub theme: ThemeSpec,
    /// Hold particles still (reduced motion).
    pub freeze_drift: bool,
}

/// Appearance of one dot for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub color: Rgb,
    pub opacity: f64,
    pub radius: f64,
}

/// Opacity of a line between two particles `distance` apart, or `None` when
/// they are too far apart to be connected.
pub fn line_opacity(config: &FieldConfig, distance: f64, near_pointer: bool) -> Option<f64> {
    if distance > config.max_line_distance {
        return None;
    }

    let ratio = 1.0 - distance / config.max_line_distance;
    let base = ratio * config.line_base_opacity;
    if near_pointer {
        Some(base.max(ratio * config.line_hover_opacity))
    } else {
        Some(base)
    }
}

/// Style of a dot `pointer_distance` away from the rendered pointer.
pub fn dot_style(config: &FieldConfig, colors: &ThemeColors, pointer_distance: f64) -> DotStyle {
    if pointer_distance < config.mouse_radius {
        let t = 1.0 - pointer_distance / config.mouse_radius;
        DotStyle {
            color: colors.accent,
            opacity: config.base_opacity + t * (config.hover_opacity - config.base_opacity),
            radius: config.dot_radius + t * config.dot_radius_boost,
        }
    } else {
        DotStyle {
            color: colors.text_muted,
            opacity: config.base_opacity,
            radius: config.dot_radius,
        }
    }
}

/// One animated particle field bound to a named region.
#[derive(Debug)]
pub struct ParticleField {
    id: FieldId,
    name: String,
    config: Arc<FieldConfig>,
    colors: ThemeColors,
    size: SurfaceSize,
    particles: Vec<Particle>,
    pointer: PointerState,
    freeze_drift: bool,
    frame: Option<FrameHandle>,
    frames_drawn: u64,
    canvas: DisplayList,
    rng: StdRng,
}

impl ParticleField {
    /// Mount on the named region and request the first frame.
    ///
    /// Returns `None` when the region does not exist; that is not an error.
    pub fn mount(
        id: FieldId,
        name: &str,
        mounts: &impl MountPoints,
        settings: &FieldSettings,
        scheduler: &mut FrameScheduler,
    ) -> Option<Self> {
        let Some(size) = mounts.surface_size(name) else {
            tracing::debug!(field = name, "mount point absent, skipping");
            return None;
        };

        let mut field = Self::new(
            id,
            name,
            settings,
            size,
            mounts.viewport_width(),
            StdRng::from_entropy(),
        );
        field.start(scheduler);
        tracing::info!(
            field = name,
            particles = field.particles.len(),
            width = size.width,
            height = size.height,
            "particle field mounted"
        );
        Some(field)
    }

    /// Build a field without scheduling it.
    pub fn new(
        id: FieldId,
        name: &str,
        settings: &FieldSettings,
        size: SurfaceSize,
        viewport_width: f64,
        mut rng: StdRng,
    ) -> Self {
        let resolved = settings.theme.resolve();
        for (key, err) in &resolved.fallbacks {
            tracing::warn!(field = name, key = *key, error = %err, "using fallback theme color");
        }
        tracing::debug!(
            field = name,
            accent = %resolved.colors.accent,
            muted = %resolved.colors.text_muted,
            "theme colors resolved"
        );

        let config = Arc::clone(&settings.config);
        let count = config.particle_count(viewport_width);
        let particles = spawn_particles(count, size, config.drift_speed, &mut rng);

        Self {
            id,
            name: name.to_string(),
            pointer: PointerState::new(config.pointer_sentinel),
            colors: resolved.colors,
            size,
            particles,
            freeze_drift: settings.freeze_drift,
            frame: None,
            frames_drawn: 0,
            canvas: DisplayList::new(),
            rng,
            config,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Commands drawn by the most recent frame.
    pub fn canvas(&self) -> &DisplayList {
        &self.canvas
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Whether a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Request a frame unless one is already pending.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.frame.is_none() {
            self.frame = Some(scheduler.request_frame(self.id));
        }
    }

    /// Cancel the pending frame so the field is no longer stepped.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Stop for good and release the particle set.
    pub fn teardown(mut self, scheduler: &mut FrameScheduler) {
        self.stop(scheduler);
        tracing::info!(field = %self.name, frames = self.frames_drawn, "particle field torn down");
    }

    /// Resize the surface and regenerate every particle for the new bounds.
    pub fn resize(&mut self, size: SurfaceSize, viewport_width: f64) {
        let count = self.config.particle_count(viewport_width);
        let particles = spawn_particles(count, size, self.config.drift_speed, &mut self.rng);

        self.size = size;
        self.particles = particles;
        tracing::debug!(
            field = %self.name,
            particles = count,
            backing_width = size.backing_width(),
            backing_height = size.backing_height(),
            "surface resized"
        );
    }

    /// Pointer entered or moved within the region, in surface pixels.
    pub fn pointer_moved(&mut self, local: Point) {
        self.pointer.set_target(local);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.release();
    }

    /// Serve a due frame request: step, then ask for the next frame.
    ///
    /// Requests that no longer match the pending handle are ignored.
    pub fn on_frame(&mut self, request: FrameRequest, scheduler: &mut FrameScheduler) {
        if request.owner != self.id || self.frame != Some(request.handle) {
            return;
        }
        self.frame = None;

        let mut canvas = std::mem::take(&mut self.canvas);
        self.step(&mut canvas);
        self.canvas = canvas;

        self.frame = Some(scheduler.request_frame(self.id));
    }

    /// Advance one frame and draw it onto `surface`.
    pub fn step(&mut self, surface: &mut impl Surface) {
        let config = Arc::clone(&self.config);

        self.pointer.ease(config.pointer_smoothing);
        surface.clear();

        if !self.freeze_drift {
            for p in &mut self.particles {
                p.advance(self.size.width, self.size.height);
            }
        }

        let pointer = self.pointer.rendered();
        let pointer_distance: Vec<f64> = self
            .particles
            .iter()
            .map(|p| pointer.distance(Point::new(p.x, p.y)))
            .collect();
        let near = |i: usize| pointer_distance[i] < config.mouse_radius;

        let line_color = self.colors.text_muted;
        for i in 0..self.particles.len() {
            let a = Point::new(self.particles[i].x, self.particles[i].y);
            for j in (i + 1)..self.particles.len() {
                let b = Point::new(self.particles[j].x, self.particles[j].y);
                let Some(opacity) = line_opacity(&config, a.distance(b), near(i) || near(j))
                else {
                    continue;
                };
                surface.stroke_line(a, b, line_color.with_alpha(opacity));
            }
        }

        for (p, &distance) in self.particles.iter().zip(&pointer_distance) {
            let style = dot_style(&config, &self.colors, distance);
            surface.fill_circle(
                Point::new(p.x, p.y),
                style.radius,
                style.color.with_alpha(style.opacity),
            );
        }

        self.frames_drawn += 1;
    }

    #[cfg(test)]
    fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }
}
