//! Terminal page layout and its named sections.

use constella_core::{CELL_WIDTH_PX, Point, SurfaceSize};
use constella_field::MountPoints;
use ratatui::layout::{Constraint, Layout, Rect};

/// A named region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub area: Rect,
}

/// The page: a header line, three sections, and a help line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub area: Rect,
    pub header: Rect,
    pub help: Rect,
    sections: Vec<Section>,
}

impl Page {
    pub fn layout(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Fill(3),   // Hero
            Constraint::Length(3), // About
            Constraint::Fill(2),   // Projects
            Constraint::Length(1), // Help text
        ])
        .split(area);

        Self {
            area,
            header: chunks[0],
            help: chunks[4],
            sections: vec![
                Section {
                    name: "hero",
                    area: chunks[1],
                },
                Section {
                    name: "about",
                    area: chunks[2],
                },
                Section {
                    name: "projects",
                    area: chunks[3],
                },
            ],
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Pointer position relative to the named section, in surface pixels.
    ///
    /// `None` when the cell lies outside that section.
    pub fn local_point(&self, name: &str, column: u16, row: u16) -> Option<Point> {
        let area = self.section(name)?.area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| Point::from_cell(column - area.x, row - area.y))
    }
}

impl MountPoints for Page {
    fn surface_size(&self, name: &str) -> Option<SurfaceSize> {
        self.section(name)
            .map(|s| SurfaceSize::from_cells(s.area.width, s.area.height))
    }

    fn viewport_width(&self) -> f64 {
        self.area.width as f64 * CELL_WIDTH_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_sections() {
        let page = Page::layout(Rect::new(0, 0, 120, 40));
        let names: Vec<_> = page.sections().iter().map(|s| s.name).collect();
        assert_eq!(names, ["hero", "about", "projects"]);

        let hero = page.section("hero").unwrap().area;
        let projects = page.section("projects").unwrap().area;
        assert_eq!(hero.y, 1);
        assert!(hero.height > projects.height);
        assert_eq!(page.section("about").unwrap().area.height, 3);
    }

    #[test]
    fn test_mount_sizes() {
        let page = Page::layout(Rect::new(0, 0, 120, 40));
        let hero = page.section("hero").unwrap().area;
        let size = page.surface_size("hero").unwrap();
        assert_eq!(size.width, 960.0);
        assert_eq!(size.height, hero.height as f64 * 16.0);
        assert_eq!(page.viewport_width(), 960.0);
        assert!(page.surface_size("footer").is_none());
    }

    #[test]
    fn test_local_point_translates_by_section_origin() {
        let page = Page::layout(Rect::new(0, 0, 120, 40));
        let projects = page.section("projects").unwrap().area;

        let p = page
            .local_point("projects", 3, projects.y + 2)
            .expect("inside projects");
        assert_eq!(p, Point::new(28.0, 40.0));

        assert!(page.local_point("projects", 3, 0).is_none());
        assert!(page.local_point("hero", 3, projects.y).is_none());
    }
}
