use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::overlay::{
    BACKGROUND_CORNER_RADIUS, BACKGROUND_STROKE_WIDTH, ITEM_X_OFFSET, OverlayStyle, ROW_HEIGHT,
    SwatchItem, push_rows, row_bounds,
};
use crate::core::{Bounds, Quadrant};
use crate::render::{Primitive, RectPrimitive, TextMeasurer};

pub const LEGEND_BACKGROUND_OPACITY: f64 = 0.85;
/// Radial charts hang their legend this far below the top edge.
pub const RADIAL_LEGEND_OFFSET_Y: f64 = 30.0;

const FIRST_ROW_Y: f64 = 17.0;
const CORNER_GAP: f64 = 13.0;
const BACKGROUND_X: f64 = 8.0;
const BACKGROUND_Y: f64 = 5.0;
const BACKGROUND_PAD_Y: f64 = 10.0;

/// Result of the placement phase, relative to the legend bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendPlacement {
    pub x: f64,
    pub y: f64,
    pub background_width: f64,
    pub background_height: f64,
}

/// Legend laid out in two phases: rows are measured at construction and
/// the background is sized and cornered by [`LegendLayout::place`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    items: Vec<SwatchItem>,
    position: Quadrant,
    bounds: Bounds,
    style: OverlayStyle,
    measured: Bounds,
    placement: Option<LegendPlacement>,
}

impl LegendLayout {
    /// Phase 1. `bounds` is the area, in root coordinates, the legend is
    /// cornered into.
    #[must_use]
    pub fn measure(
        items: Vec<SwatchItem>,
        position: Quadrant,
        bounds: Bounds,
        style: OverlayStyle,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let measured = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                row_bounds(item, FIRST_ROW_Y + ROW_HEIGHT * index as f64, measurer)
            })
            .reduce(Bounds::union)
            .unwrap_or_default();
        Self {
            items,
            position,
            bounds,
            style,
            measured,
            placement: None,
        }
    }

    /// Phase 2: sizes the background and moves the group into its corner.
    /// Repeated calls return the first placement.
    pub fn place(&mut self) -> LegendPlacement {
        if let Some(placement) = self.placement {
            return placement;
        }
        let background_width = self.measured.width + ITEM_X_OFFSET;
        let background_height = self.measured.height + BACKGROUND_PAD_Y;
        let x = if self.position.is_left() {
            0.0
        } else {
            self.bounds.width - background_width - CORNER_GAP
        };
        let y = if self.position.is_up() {
            0.0
        } else {
            self.bounds.height - background_height - CORNER_GAP
        };
        let placement = LegendPlacement {
            x,
            y,
            background_width,
            background_height,
        };
        debug!(
            position = ?self.position,
            x,
            y,
            background_width,
            background_height,
            "legend placed"
        );
        self.placement = Some(placement);
        placement
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    #[must_use]
    pub fn placement(&self) -> Option<LegendPlacement> {
        self.placement
    }

    /// Bounding box of the rows, relative to the legend group.
    #[must_use]
    pub fn measured(&self) -> Bounds {
        self.measured
    }

    #[must_use]
    pub fn items(&self) -> &[SwatchItem] {
        &self.items
    }

    #[must_use]
    pub fn position(&self) -> Quadrant {
        self.position
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Background rectangle in root coordinates, once placed.
    #[must_use]
    pub fn background(&self) -> Option<Bounds> {
        self.placement.map(|placement| {
            Bounds::new(
                self.bounds.x + placement.x + BACKGROUND_X,
                self.bounds.y + placement.y + BACKGROUND_Y,
                placement.background_width,
                placement.background_height,
            )
        })
    }

    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let (group_x, group_y) = self.placement.map_or((self.bounds.x, self.bounds.y), |p| {
            (self.bounds.x + p.x, self.bounds.y + p.y)
        });
        let mut out = Vec::with_capacity(1 + self.items.len() * 2);
        if let Some(background) = self.background() {
            out.push(
                RectPrimitive::from_bounds(background)
                    .with_fill(Some(self.style.background))
                    .with_fill_opacity(LEGEND_BACKGROUND_OPACITY)
                    .with_border(self.style.stroke, BACKGROUND_STROKE_WIDTH)
                    .with_corner_radius(BACKGROUND_CORNER_RADIUS)
                    .with_filter(self.style.filter)
                    .into(),
            );
        }
        push_rows(&mut out, &self.items, group_x, group_y, FIRST_ROW_Y, &self.style);
        out
    }
}
