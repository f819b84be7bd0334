use crate::core::ticks::{format_fixed_ticks, format_si_ticks};
use crate::core::{LinearScale, PlotArea, TimeScale};
use crate::render::{
    Color, FilterRef, PathCommand, PathPrimitive, Primitive, TextHAlign, TextPrimitive,
};

pub const TICK_FONT_SIZE: f64 = 16.0;
/// Stroke width inherited by every shape that does not set its own.
pub const ROOT_STROKE_WIDTH: f64 = 3.0;

const Y_TICK_SIZE: f64 = 1.0;
const Y_TICK_PADDING: f64 = 10.0;
const X_TICK_PADDING: f64 = 6.0;
const Y_TICK_DY_EM: f64 = 0.32;
const X_TICK_DY_EM: f64 = 0.71;

/// One labelled tick; `position` is plot-local along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub stroke: Color,
    pub filter: Option<FilterRef>,
}

/// Ticks of a value axis, labelled with SI prefixes.
#[must_use]
pub fn value_ticks(scale: LinearScale, count: usize) -> Vec<AxisTick> {
    let ticks = scale.ticks(count);
    let labels = format_si_ticks(&ticks, scale.domain());
    ticks
        .iter()
        .zip(labels)
        .map(|(tick, label)| AxisTick {
            position: scale.map(*tick),
            label,
        })
        .collect()
}

/// Ticks of a numeric horizontal axis, labelled with grouped decimals.
#[must_use]
pub fn linear_ticks(scale: LinearScale, count: usize) -> Vec<AxisTick> {
    let ticks = scale.ticks(count);
    let labels = format_fixed_ticks(&ticks);
    ticks
        .iter()
        .zip(labels)
        .map(|(tick, label)| AxisTick {
            position: scale.map(*tick),
            label,
        })
        .collect()
}

#[must_use]
pub fn time_ticks(scale: TimeScale, count: usize) -> Vec<AxisTick> {
    let ticks = scale.ticks(count);
    let labels = TimeScale::tick_labels(&ticks);
    ticks
        .iter()
        .zip(labels)
        .map(|(tick, label)| AxisTick {
            position: scale.map(*tick),
            label,
        })
        .collect()
}

/// One tick per category label at `position(index)`.
#[must_use]
pub fn category_ticks(labels: &[String], position: impl Fn(usize) -> f64) -> Vec<AxisTick> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| AxisTick {
            position: position(index),
            label: label.clone(),
        })
        .collect()
}

/// Left axis: domain line with one-pixel outer ticks, labels right-aligned
/// beside each tick.
#[must_use]
pub fn left_axis(plot: PlotArea, ticks: &[AxisTick], style: AxisStyle) -> Vec<Primitive> {
    let x = plot.left;
    let mut out = Vec::with_capacity(1 + ticks.len() * 2);
    out.push(
        PathPrimitive::new(vec![
            PathCommand::MoveTo {
                x: x - Y_TICK_SIZE,
                y: plot.bottom(),
            },
            PathCommand::LineTo {
                x,
                y: plot.bottom(),
            },
            PathCommand::LineTo { x, y: plot.top },
            PathCommand::LineTo {
                x: x - Y_TICK_SIZE,
                y: plot.top,
            },
        ])
        .with_stroke(style.stroke, ROOT_STROKE_WIDTH)
        .with_filter(style.filter)
        .into(),
    );
    for tick in ticks {
        let y = plot.top + tick.position;
        out.push(
            PathPrimitive::new(vec![
                PathCommand::MoveTo { x, y },
                PathCommand::LineTo {
                    x: x - Y_TICK_SIZE,
                    y,
                },
            ])
            .with_stroke(style.stroke, ROOT_STROKE_WIDTH)
            .into(),
        );
        if !tick.label.is_empty() {
            out.push(
                TextPrimitive::new(
                    tick.label.clone(),
                    x - Y_TICK_SIZE - Y_TICK_PADDING,
                    y,
                    TICK_FONT_SIZE,
                    style.stroke,
                    TextHAlign::Right,
                )
                .with_dy_em(Y_TICK_DY_EM)
                .into(),
            );
        }
    }
    out
}

/// Bottom axis: a bare domain line (tick size 0) with centered labels.
#[must_use]
pub fn bottom_axis(plot: PlotArea, ticks: &[AxisTick], style: AxisStyle) -> Vec<Primitive> {
    let y = plot.bottom();
    let mut out = Vec::with_capacity(1 + ticks.len());
    out.push(
        PathPrimitive::new(vec![
            PathCommand::MoveTo { x: plot.left, y },
            PathCommand::LineTo {
                x: plot.right(),
                y,
            },
        ])
        .with_stroke(style.stroke, ROOT_STROKE_WIDTH)
        .with_filter(style.filter)
        .into(),
    );
    for tick in ticks.iter().filter(|tick| !tick.label.is_empty()) {
        out.push(
            TextPrimitive::new(
                tick.label.clone(),
                plot.left + tick.position,
                y + X_TICK_PADDING,
                TICK_FONT_SIZE,
                style.stroke,
                TextHAlign::Center,
            )
            .with_dy_em(X_TICK_DY_EM)
            .into(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{AxisStyle, bottom_axis, category_ticks, value_ticks};
    use crate::core::{LinearScale, Margin, PlotArea, Viewport};
    use crate::render::{Color, Primitive};

    #[test]
    fn value_ticks_follow_the_scale() {
        let scale = LinearScale::new((0.0, 30.0), (300.0, 0.0));
        let ticks = value_ticks(scale, 3);
        let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "10", "20", "30"]);
        assert_eq!(ticks[3].position, 0.0);
    }

    #[test]
    fn bottom_axis_places_labels_under_the_plot() {
        let plot = PlotArea::with_margin(Viewport::new(600, 400), Margin::uniform(50.0));
        let labels = vec!["a".to_owned(), String::new()];
        let ticks = category_ticks(&labels, |index| 100.0 * index as f64);
        let style = AxisStyle {
            stroke: Color::BLACK,
            filter: None,
        };
        let primitives = bottom_axis(plot, &ticks, style);
        assert_eq!(primitives.len(), 2);
        let Primitive::Text(text) = &primitives[1] else {
            panic!("expected a tick label");
        };
        assert_eq!(text.y, 356.0);
        assert_eq!(text.x, 50.0);
    }
}
