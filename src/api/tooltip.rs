use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::overlay::{
    BACKGROUND_CORNER_RADIUS, BACKGROUND_STROKE_WIDTH, ITEM_TEXT_OFFSET, ITEM_X_OFFSET,
    OVERLAY_FONT_SIZE, OverlayStyle, ROW_HEIGHT, SwatchItem, push_rows,
};
use crate::core::{Point, Quadrant};
use crate::render::{
    FontWeight, Primitive, RectPrimitive, TextHAlign, TextMeasurer, TextPrimitive,
};

/// Distance between the pointer and the tooltip anchor on axis charts and pies.
pub const TOOLTIP_MOUSE_OFFSET: f64 = 10.0;
/// Distance between a scatter dot's center and the tooltip anchor.
pub const SCATTER_TOOLTIP_OFFSET: f64 = 5.0;
pub const TOOLTIP_BACKGROUND_OPACITY: f64 = 0.9;

const BACKGROUND_INSET: f64 = 5.0;
const TITLE_BASELINE: f64 = 25.0;
const FIRST_ROW_Y: f64 = 37.0;

/// Anchor point in root coordinates plus the direction the box opens to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub x: f64,
    pub y: f64,
    pub quadrant: Quadrant,
}

impl TooltipPosition {
    #[must_use]
    pub fn new(anchor: Point, quadrant: Quadrant) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            quadrant,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipUpdate {
    pub title: Option<String>,
    pub items: Option<Vec<SwatchItem>>,
    pub position: Option<TooltipPosition>,
}

impl TooltipUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<SwatchItem>) -> Self {
        self.items = Some(items);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: TooltipPosition) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub title: String,
    pub items: Vec<SwatchItem>,
    pub position: TooltipPosition,
}

/// Floating hover box shared by every chart kind.
#[derive(Debug, Clone)]
pub struct Tooltip {
    state: TooltipState,
    style: OverlayStyle,
    visible: bool,
    width: f64,
    height: f64,
    measure_count: usize,
}

impl Tooltip {
    #[must_use]
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            state: TooltipState {
                title: String::new(),
                items: Vec::new(),
                position: TooltipPosition::new(Point::default(), Quadrant::DownRight),
            },
            style,
            visible: false,
            width: ITEM_TEXT_OFFSET + ITEM_X_OFFSET,
            height: ROW_HEIGHT + 10.0,
            measure_count: 0,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    /// Measured box size `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    /// Applies `update`; content is re-measured only when the title or the
    /// items actually changed. Returns whether a re-measure happened.
    pub fn update(&mut self, update: TooltipUpdate, measurer: &dyn TextMeasurer) -> bool {
        let mut content_changed = false;
        if let Some(title) = update.title {
            if title != self.state.title {
                self.state.title = title;
                content_changed = true;
            }
        }
        if let Some(items) = update.items {
            if items != self.state.items {
                self.state.items = items;
                content_changed = true;
            }
        }
        if content_changed {
            self.measure(measurer);
        }
        if let Some(position) = update.position {
            self.state.position = position;
        }
        content_changed
    }

    fn measure(&mut self, measurer: &dyn TextMeasurer) {
        let title_width = if self.state.title.is_empty() {
            0.0
        } else {
            measurer
                .measure(&self.state.title, OVERLAY_FONT_SIZE, FontWeight::Bold)
                .width
        };
        let item_width = self
            .state
            .items
            .iter()
            .map(|item| {
                measurer
                    .measure(&item.text, OVERLAY_FONT_SIZE, FontWeight::Normal)
                    .width
            })
            .fold(0.0, f64::max);
        // a row spans its swatch offset, the text offset and the text
        let row_width = if self.state.items.is_empty() {
            0.0
        } else {
            ITEM_X_OFFSET + ITEM_TEXT_OFFSET + item_width
        };
        self.width = title_width.max(row_width) + ITEM_X_OFFSET;
        self.height = (self.state.items.len() + 1) as f64 * ROW_HEIGHT + 10.0;
        self.measure_count += 1;
        trace!(
            width = self.width,
            height = self.height,
            rows = self.state.items.len(),
            "tooltip re-measured"
        );
    }

    /// Top-left corner of the box in root coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        let position = self.state.position;
        let x = if position.quadrant.is_left() {
            position.x - self.width - ROW_HEIGHT
        } else {
            position.x
        };
        let y = if position.quadrant.is_up() {
            position.y - self.height - ROW_HEIGHT
        } else {
            position.y
        };
        Point::new(x, y)
    }

    /// Primitives for the current state; empty while hidden.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        if !self.visible {
            return Vec::new();
        }
        let origin = self.origin();
        let mut out = Vec::with_capacity(2 + self.state.items.len() * 2);
        out.push(
            RectPrimitive::new(
                origin.x + BACKGROUND_INSET,
                origin.y + BACKGROUND_INSET,
                self.width,
                self.height,
            )
            .with_fill(Some(self.style.background))
            .with_fill_opacity(TOOLTIP_BACKGROUND_OPACITY)
            .with_border(self.style.stroke, BACKGROUND_STROKE_WIDTH)
            .with_corner_radius(BACKGROUND_CORNER_RADIUS)
            .with_filter(self.style.filter)
            .into(),
        );
        if !self.state.title.is_empty() {
            out.push(
                TextPrimitive::new(
                    self.state.title.clone(),
                    origin.x + ITEM_X_OFFSET,
                    origin.y + TITLE_BASELINE,
                    OVERLAY_FONT_SIZE,
                    self.style.stroke,
                    TextHAlign::Left,
                )
                .bold()
                .into(),
            );
        }
        push_rows(
            &mut out,
            &self.state.items,
            origin.x,
            origin.y,
            FIRST_ROW_Y,
            &self.style,
        );
        out
    }
}
