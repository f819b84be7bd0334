use serde::{Deserialize, Serialize};

use crate::core::Bounds;
use crate::render::{
    Color, FilterRef, FontWeight, Primitive, RectPrimitive, TextHAlign, TextMeasurer,
    TextPrimitive,
};

pub const ROW_HEIGHT: f64 = 20.0;
pub const SWATCH_SIZE: f64 = 8.0;
pub const SWATCH_CORNER_RADIUS: f64 = 2.0;
pub const ITEM_X_OFFSET: f64 = 15.0;
pub const ITEM_TEXT_OFFSET: f64 = 12.0;
pub const OVERLAY_FONT_SIZE: f64 = 15.0;
pub const BACKGROUND_CORNER_RADIUS: f64 = 5.0;
pub const BACKGROUND_STROKE_WIDTH: f64 = 2.0;

/// One colored row of a tooltip or legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwatchItem {
    pub color: Color,
    pub text: String,
}

impl SwatchItem {
    #[must_use]
    pub fn new(color: Color, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }
}

/// Colors and filter shared by tooltip and legend chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub background: Color,
    pub stroke: Color,
    pub filter: Option<FilterRef>,
}

/// Swatch and text of one row whose swatch top sits at `origin.y + item_y`.
pub(crate) fn swatch_row(
    item: &SwatchItem,
    origin_x: f64,
    origin_y: f64,
    item_y: f64,
    style: &OverlayStyle,
) -> [Primitive; 2] {
    let swatch = RectPrimitive::new(
        origin_x + ITEM_X_OFFSET,
        origin_y + item_y,
        SWATCH_SIZE,
        SWATCH_SIZE,
    )
    .with_fill(Some(item.color))
    .with_corner_radius(SWATCH_CORNER_RADIUS)
    .with_filter(style.filter);
    let text = TextPrimitive::new(
        item.text.clone(),
        origin_x + ITEM_X_OFFSET + ITEM_TEXT_OFFSET,
        origin_y + item_y + SWATCH_SIZE,
        OVERLAY_FONT_SIZE,
        style.stroke,
        TextHAlign::Left,
    );
    [swatch.into(), text.into()]
}

/// Box covering a row's swatch and text, relative to the overlay origin.
pub(crate) fn row_bounds(item: &SwatchItem, item_y: f64, measurer: &dyn TextMeasurer) -> Bounds {
    let swatch = Bounds::new(ITEM_X_OFFSET, item_y, SWATCH_SIZE, SWATCH_SIZE);
    if item.text.is_empty() {
        return swatch;
    }
    let extent = measurer.measure(&item.text, OVERLAY_FONT_SIZE, FontWeight::Normal);
    let text = extent.bounds_at(
        ITEM_X_OFFSET + ITEM_TEXT_OFFSET,
        item_y + SWATCH_SIZE,
        TextHAlign::Left,
    );
    swatch.union(text)
}

/// Rows whose text is empty keep their swatch but emit no text primitive.
pub(crate) fn push_rows(
    out: &mut Vec<Primitive>,
    items: &[SwatchItem],
    origin_x: f64,
    origin_y: f64,
    first_row_y: f64,
    style: &OverlayStyle,
) {
    for (index, item) in items.iter().enumerate() {
        let item_y = first_row_y + ROW_HEIGHT * index as f64;
        let [swatch, text] = swatch_row(item, origin_x, origin_y, item_y, style);
        out.push(swatch);
        if !item.text.is_empty() {
            out.push(text);
        }
    }
}
