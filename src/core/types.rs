use serde::{Deserialize, Serialize};

/// Aspect ratio applied when a host sizes the chart from its container width.
pub const CONTAINER_ASPECT_RATIO: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Sizes a chart to fill `container_width`, keeping a 3:2 aspect ratio
    /// but never growing taller than the window.
    #[must_use]
    pub fn for_container(container_width: u32, window_height: u32) -> Self {
        let proportional = (f64::from(container_width) * CONTAINER_ASPECT_RATIO).floor();
        let height = proportional.min(f64::from(window_height)).max(0.0) as u32;
        Self::new(container_width, height)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width_px() / 2.0, self.height_px() / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds bounds from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    #[must_use]
    pub fn union(self, other: Bounds) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, Point, Viewport};

    #[test]
    fn container_sizing_keeps_aspect_ratio_until_window_limit() {
        assert_eq!(Viewport::for_container(600, 1000), Viewport::new(600, 400));
        assert_eq!(Viewport::for_container(900, 500), Viewport::new(900, 500));
    }

    #[test]
    fn bounds_union_covers_both_rectangles() {
        let merged = Bounds::new(0.0, 0.0, 10.0, 10.0).union(Bounds::new(5.0, -5.0, 20.0, 5.0));
        assert_eq!(merged, Bounds::new(0.0, -5.0, 25.0, 15.0));
        assert!(merged.contains(Point::new(25.0, 10.0)));
    }
}
