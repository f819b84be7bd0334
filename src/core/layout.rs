use serde::{Deserialize, Serialize};

use crate::core::types::{Point, Viewport};

/// Margins used by axis charts without title or y label.
pub const AXIS_MARGIN: Margin = Margin {
    top: 50.0,
    right: 30.0,
    bottom: 50.0,
    left: 50.0,
};
pub const TITLE_MARGIN_TOP: f64 = 60.0;
pub const Y_LABEL_MARGIN_LEFT: f64 = 70.0;
/// Uniform margin used by Pie and Radar.
pub const RADIAL_MARGIN: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Four-sided margins for axis charts.
///
/// `right` and `bottom` never move; the x label sits inside the bottom margin.
#[must_use]
pub fn compute_margins(has_title: bool, _has_x_label: bool, has_y_label: bool) -> Margin {
    let mut margin = AXIS_MARGIN;
    if has_title {
        margin.top = TITLE_MARGIN_TOP;
    }
    if has_y_label {
        margin.left = Y_LABEL_MARGIN_LEFT;
    }
    margin
}

/// Radius of the radial plot, centered in the viewport.
#[must_use]
pub fn radial_radius(viewport: Viewport) -> f64 {
    (viewport.width_px().min(viewport.height_px()) / 2.0 - RADIAL_MARGIN).max(0.0)
}

/// Region marks are drawn in, expressed in root pixel coordinates.
///
/// Axis charts use the viewport minus margins; radial charts use the whole
/// viewport so that pointer positions and overlay bounds share one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn with_margin(viewport: Viewport, margin: Margin) -> Self {
        Self {
            left: margin.left,
            top: margin.top,
            width: (viewport.width_px() - margin.left - margin.right).max(0.0),
            height: (viewport.height_px() - margin.top - margin.bottom).max(0.0),
        }
    }

    #[must_use]
    pub fn full(viewport: Viewport) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: viewport.width_px(),
            height: viewport.height_px(),
        }
    }

    #[must_use]
    pub fn to_local(self, root: Point) -> Point {
        Point::new(root.x - self.left, root.y - self.top)
    }

    #[must_use]
    pub fn to_root(self, local: Point) -> Point {
        Point::new(local.x + self.left, local.y + self.top)
    }

    #[must_use]
    pub fn contains_local(self, local: Point) -> bool {
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, compute_margins, radial_radius};
    use crate::core::Viewport;

    #[test]
    fn plot_area_is_clamped_for_tiny_viewports() {
        let plot = PlotArea::with_margin(Viewport::new(40, 60), compute_margins(true, true, true));
        assert_eq!(plot.width, 0.0);
        assert_eq!(plot.height, 0.0);
        assert_eq!(radial_radius(Viewport::new(40, 60)), 0.0);
    }
}
