//! Pointer target and eased position.

use constella_core::Point;

/// Last observed pointer location and the smoothed position that trails it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    target: Point,
    rendered: Point,
    sentinel: Point,
}

impl PointerState {
    /// Both positions start at the sentinel, far outside any surface.
    pub fn new(sentinel: f64) -> Self {
        let sentinel = Point::splat(sentinel);
        Self {
            target: sentinel,
            rendered: sentinel,
            sentinel,
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn rendered(&self) -> Point {
        self.rendered
    }

    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    /// Send the target back to the sentinel.
    pub fn release(&mut self) {
        self.target = self.sentinel;
    }

    /// Move the rendered position `smoothing` of the way toward the target.
    pub fn ease(&mut self, smoothing: f64) {
        self.rendered.x += (self.target.x - self.rendered.x) * smoothing;
        self.rendered.y += (self.target.y - self.rendered.y) * smoothing;
    }
}
