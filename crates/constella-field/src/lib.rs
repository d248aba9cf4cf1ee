//! Drifting particle field with proximity lines and pointer highlighting.
//!
//! A [`ParticleField`] owns its particles and pointer state and draws into a
//! [`Surface`] once per frame. Frames are driven by a [`FrameScheduler`] whose
//! requests can be cancelled, and a [`FieldCanvas`] paints the recorded
//! [`DisplayList`] onto a ratatui braille canvas.

mod canvas;
mod field;
mod particle;
mod pointer;
mod scheduler;
mod surface;

pub use canvas::FieldCanvas;
pub use field::{DotStyle, FieldSettings, MountPoints, ParticleField, dot_style, line_opacity};
pub use particle::{Particle, spawn_particles};
pub use pointer::PointerState;
pub use scheduler::{FieldId, FrameHandle, FrameRequest, FrameScheduler};
pub use surface::{DisplayList, DrawCommand, Surface};
