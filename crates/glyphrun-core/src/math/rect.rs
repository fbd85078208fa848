use crate::math::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(DVec2::ZERO, DVec2::ZERO);

    pub const fn new(min: DVec2, max: DVec2) -> Rect {
        Rect { min, max }
    }

    /// Builds a rectangle from two opposite corners in any order.
    pub fn from_corners(a: DVec2, b: DVec2) -> Rect {
        Rect::new(a.min(b), a.max(b))
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
