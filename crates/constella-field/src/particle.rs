//! Particle state and integration.

use constella_core::SurfaceSize;
use rand::Rng;

/// A drifting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity in pixels per frame.
    pub vx: f64,
    /// Vertical velocity in pixels per frame.
    pub vy: f64,
}

impl Particle {
    /// Integrate one frame, then bounce off and clamp to the bounds.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }

        self.x = self.x.clamp(0.0, width);
        self.y = self.y.clamp(0.0, height);
    }
}

/// Scatter `count` particles uniformly over `size`.
pub fn spawn_particles(
    count: usize,
    size: SurfaceSize,
    drift_speed: f64,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: rng.gen_range(0.0..1.0) * size.width,
            y: rng.gen_range(0.0..1.0) * size.height,
            vx: (rng.gen_range(0.0..1.0) - 0.5) * drift_speed,
            vy: (rng.gen_range(0.0..1.0) - 0.5) * drift_speed,
        })
        .collect()
}
