use crate::core::{ChartSpec, Viewport};
use crate::render::{Color, FontWeight, Primitive, TextHAlign, TextMeasurer, TextPrimitive};

pub const TITLE_FONT_SIZE: f64 = 20.0;
pub const LABEL_FONT_SIZE: f64 = 17.0;

const TITLE_BASELINE: f64 = 30.0;
const X_LABEL_BOTTOM_GAP: f64 = 10.0;
const Y_LABEL_X: f64 = 6.0;
const Y_LABEL_DY_EM: f64 = 0.75;

/// Title, x-axis label and rotated y-axis label of a chart.
#[must_use]
pub fn chart_labels(
    spec: &ChartSpec,
    viewport: Viewport,
    stroke: Color,
    measurer: &dyn TextMeasurer,
) -> Vec<Primitive> {
    let center_x = viewport.width_px() / 2.0;
    let mut out = Vec::with_capacity(3);

    if let Some(title) = spec.title.as_deref().filter(|title| !title.is_empty()) {
        out.push(
            TextPrimitive::new(
                title,
                center_x,
                TITLE_BASELINE,
                TITLE_FONT_SIZE,
                stroke,
                TextHAlign::Center,
            )
            .bold()
            .into(),
        );
    }

    if let Some(label) = spec.x_label.as_deref().filter(|label| !label.is_empty()) {
        out.push(
            TextPrimitive::new(
                label,
                center_x,
                viewport.height_px() - X_LABEL_BOTTOM_GAP,
                LABEL_FONT_SIZE,
                stroke,
                TextHAlign::Center,
            )
            .into(),
        );
    }

    if let Some(label) = spec.y_label.as_deref().filter(|label| !label.is_empty()) {
        // rotated -90: the text ends at the anchor and runs downward from it
        let length = measurer
            .measure(label, LABEL_FONT_SIZE, FontWeight::Normal)
            .width;
        out.push(
            TextPrimitive::new(
                label,
                Y_LABEL_X,
                viewport.height_px() / 2.0 - length / 2.0,
                LABEL_FONT_SIZE,
                stroke,
                TextHAlign::Right,
            )
            .rotated(-90.0)
            .with_dy_em(Y_LABEL_DY_EM)
            .into(),
        );
    }

    out
}
