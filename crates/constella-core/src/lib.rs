//! Core types shared by the constella crates.

mod color;
mod config;
mod geometry;
mod theme;

pub use color::{ParseColorError, Rgb, Rgba};
pub use config::{FieldConfig, InvalidFieldConfig};
pub use geometry::{BRAILLE_PIXEL_RATIO, CELL_HEIGHT_PX, CELL_WIDTH_PX, Point, SurfaceSize};
pub use theme::{ResolvedTheme, ThemeColors, ThemeSpec};
