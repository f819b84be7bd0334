use crate::core::{Bounds, Point};
use crate::interaction::ListenerGuard;
use crate::render::{Color, LineStrokeStyle, RectPrimitive};

/// Drags shorter than this in both directions count as clicks.
pub const MIN_DRAG_PX: f64 = 4.0;

/// An in-progress box selection, in plot-local pixels.
///
/// Holding the session keeps the window listeners installed.
#[derive(Debug)]
pub struct DragSession {
    pub start: Point,
    pub current: Point,
    _listeners: ListenerGuard,
}

impl DragSession {
    #[must_use]
    pub fn new(start: Point, listeners: ListenerGuard) -> Self {
        Self {
            start,
            current: start,
            _listeners: listeners,
        }
    }

    /// Visible rectangle for the current pointer, clamped to the plot.
    #[must_use]
    pub fn visible_rect(&self, plot_width: f64, plot_height: f64) -> Bounds {
        clamp_drag_rect(self.start, self.current, plot_width, plot_height)
    }
}

/// Rectangle spanned by `start` and `current`, kept inside a
/// `width` x `height` area anchored at the origin.
#[must_use]
pub fn clamp_drag_rect(start: Point, current: Point, width: f64, height: f64) -> Bounds {
    let x = start.x.min(current.x).max(0.0);
    let y = start.y.min(current.y).max(0.0);
    let w = (current.x - start.x).abs().min(width - x).max(0.0);
    let h = (current.y - start.y).abs().min(height - y).max(0.0);
    Bounds::new(x, y, w, h)
}

#[must_use]
pub fn exceeds_drag_threshold(start: Point, end: Point) -> bool {
    (end.x - start.x).abs() >= MIN_DRAG_PX || (end.y - start.y).abs() >= MIN_DRAG_PX
}

/// Inclusive data-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl DataRect {
    /// Normalizes corner order.
    #[must_use]
    pub fn new(x_a: f64, x_b: f64, y_a: f64, y_b: f64) -> Self {
        Self {
            x0: x_a.min(x_b),
            x1: x_a.max(x_b),
            y0: y_a.min(y_b),
            y1: y_a.max(y_b),
        }
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Dashed translucent rectangle drawn while dragging.
#[must_use]
pub fn selection_rect_primitive(bounds: Bounds, stroke: Color) -> RectPrimitive {
    RectPrimitive::from_bounds(bounds)
        .with_fill(Some(Color::rgba(0.0, 0.0, 0.0, 0.1)))
        .with_border(stroke, 1.0)
        .with_stroke_style(LineStrokeStyle::Dashed { dash: 4.0, gap: 4.0 })
}
