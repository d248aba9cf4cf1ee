//! Paints a recorded field frame onto a ratatui braille canvas.

use constella_core::{Rgb, Rgba, SurfaceSize};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Painter, Shape},
    },
};

use crate::surface::{DisplayList, DrawCommand};

/// Widget drawing a field's display list.
///
/// Surface y grows downward while canvas y grows upward, so y is flipped.
/// Translucent colors are composited over `background`. Braille lines are
/// always one dot wide.
#[derive(Debug, Clone, Copy)]
pub struct FieldCanvas<'a> {
    list: &'a DisplayList,
    size: SurfaceSize,
    background: Rgb,
}

impl<'a> FieldCanvas<'a> {
    pub fn new(list: &'a DisplayList, size: SurfaceSize, background: Rgb) -> Self {
        Self {
            list,
            size,
            background,
        }
    }

    fn blend(&self, color: Rgba) -> Color {
        color.over(self.background).into()
    }
}

impl Widget for FieldCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.size.width;
        let height = self.size.height;
        // One backing-store dot in surface pixels.
        let dot_step = 1.0 / self.size.pixel_ratio;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.background.into())
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for command in self.list.commands() {
                    match *command {
                        DrawCommand::Line { from, to, color } => ctx.draw(&CanvasLine {
                            x1: from.x,
                            y1: height - from.y,
                            x2: to.x,
                            y2: height - to.y,
                            color: self.blend(color),
                        }),
                        DrawCommand::Circle {
                            center,
                            radius,
                            color,
                        } => ctx.draw(&Dot {
                            x: center.x,
                            y: height - center.y,
                            radius,
                            step: dot_step,
                            color: self.blend(color),
                        }),
                    }
                }
            })
            .render(area, buf);
    }
}

/// Filled disc sampled on the backing-store grid.
#[derive(Debug, Clone, Copy)]
struct Dot {
    x: f64,
    y: f64,
    radius: f64,
    step: f64,
    color: Color,
}

impl Shape for Dot {
    fn draw(&self, painter: &mut Painter) {
        if let Some((px, py)) = painter.get_point(self.x, self.y) {
            painter.paint(px, py, self.color);
        }

        let reach = (self.radius / self.step).floor() as i32;
        for i in -reach..=reach {
            for j in -reach..=reach {
                let dx = i as f64 * self.step;
                let dy = j as f64 * self.step;
                if dx * dx + dy * dy > self.radius * self.radius {
                    continue;
                }
                if let Some((px, py)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use constella_core::Point;

    #[test]
    fn test_renders_dot_in_expected_cell() {
        let size = SurfaceSize::from_cells(10, 4);
        let mut list = DisplayList::new();
        list.fill_circle(
            Point::new(4.0, 8.0),
            1.6,
            Rgb::new(255, 255, 255).with_alpha(1.0),
        );

        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(&list, size, Rgb::new(0, 0, 0)).render(area, &mut buf);

        assert_ne!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(5, 2)].symbol(), " ");
    }

    #[test]
    fn test_line_is_one_dot_wide() {
        let size = SurfaceSize::from_cells(10, 4);
        let mut list = DisplayList::new();
        // Horizontal hairline through the first row of dots in row 1.
        list.stroke_line(
            Point::new(0.0, 16.0),
            Point::new(80.0, 16.0),
            Rgb::new(255, 255, 255).with_alpha(1.0),
        );

        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(&list, size, Rgb::new(0, 0, 0)).render(area, &mut buf);

        let painted_rows: Vec<u16> = (0..4)
            .filter(|&y| (0..10).any(|x| buf[(x, y)].symbol() != " "))
            .collect();
        assert_eq!(painted_rows.len(), 1);
        let row = painted_rows[0];
        assert!((0..10).all(|x| buf[(x, row)].symbol() != " "));
    }

    #[test]
    fn test_empty_list_paints_background_only() {
        let size = SurfaceSize::from_cells(4, 2);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(&DisplayList::new(), size, Rgb::new(1, 2, 3)).render(area, &mut buf);

        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf[(x, y)].symbol(), " ");
                assert_eq!(buf[(x, y)].bg, Color::Rgb(1, 2, 3));
            }
        }
    }
}
