//! Surface coordinates and sizes.

/// Logical surface pixels covered by one terminal column.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Logical surface pixels covered by one terminal row.
pub const CELL_HEIGHT_PX: f64 = 16.0;
/// Backing-store dots per logical pixel on a braille canvas (2x4 dots per cell).
pub const BRAILLE_PIXEL_RATIO: f64 = 2.0 / CELL_WIDTH_PX;

/// A position in surface-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Logical pixel at the centre of a terminal cell, relative to a region origin.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: (column as f64 + 0.5) * CELL_WIDTH_PX,
            y: (row as f64 + 0.5) * CELL_HEIGHT_PX,
        }
    }
}

/// Logical drawing dimensions plus the backing-store scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    /// Negative or NaN dimensions collapse to zero.
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let sanitize = |v: f64| if v > 0.0 { v } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    /// Size of a terminal region drawn with a braille canvas.
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Self::new(
            columns as f64 * CELL_WIDTH_PX,
            rows as f64 * CELL_HEIGHT_PX,
            BRAILLE_PIXEL_RATIO,
        )
    }

    pub fn backing_width(&self) -> u32 {
        (self.width * self.pixel_ratio).round() as u32
    }

    pub fn backing_height(&self) -> u32 {
        (self.height * self.pixel_ratio).round() as u32
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}
