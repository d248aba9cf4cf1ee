//! Drawing seam between the simulation and whatever paints it.

use constella_core::{Point, Rgba};

/// A 2D drawing target for one field.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a hairline: one backing-store dot wide.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line { from: Point, to: Point, color: Rgba },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
}

/// Surface that records commands for a later paint pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
