use crate::api::axis::{
    AxisTick, ROOT_STROKE_WIDTH, bottom_axis, left_axis, linear_ticks, time_ticks, value_ticks,
};
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::api::tooltip::SCATTER_TOOLTIP_OFFSET;
use crate::core::curve::monotone_x;
use crate::core::time_scale::format_timestamp;
use crate::core::{Bounds, ChartKind, LinearScale, PlotArea, Point, TimeScale};
use crate::interaction::{DataRect, MarkHit, SelectionItem, exceeds_drag_threshold};
use crate::render::{CanvasLayerKind, CirclePrimitive, PathPrimitive, Primitive, RenderFrame};

pub const DOT_RADIUS: f64 = 3.5;
pub const DOT_HOVER_RADIUS: f64 = 6.0;

/// Horizontal scale of a scatter chart: plain numbers, or epoch
/// milliseconds when a time format is configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterXScale {
    Linear(LinearScale),
    Time(TimeScale),
}

impl ScatterXScale {
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        match self {
            ScatterXScale::Linear(scale) => scale.map(value),
            ScatterXScale::Time(scale) => scale.map(value),
        }
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        match self {
            ScatterXScale::Linear(scale) => scale.invert(pixel),
            ScatterXScale::Time(scale) => scale.invert(pixel),
        }
    }

    fn ticks(self, count: usize) -> Vec<AxisTick> {
        match self {
            ScatterXScale::Linear(scale) => linear_ticks(scale, count),
            ScatterXScale::Time(scale) => time_ticks(scale, count),
        }
    }
}

/// Dots grouped by dataset, an optional connecting line per dataset and,
/// when a select handler is configured, rectangle selection.
#[derive(Debug, Clone)]
pub struct ScatterMarks {
    setup: MarkSetup,
    x: ScatterXScale,
    y: LinearScale,
    /// Numeric `(x, y)` per dataset and point; `None` for entries that are
    /// not `{x, y}` pairs.
    positions: Vec<Vec<Option<(f64, f64)>>>,
}

impl ScatterMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let timed = setup.options.time_format.is_some();
        let positions: Vec<Vec<Option<(f64, f64)>>> = setup
            .spec
            .datasets()
            .iter()
            .map(|dataset| {
                dataset
                    .data
                    .iter()
                    .map(|value| {
                        value.as_point().map(|(x, y)| {
                            let x = if timed { x.as_time_ms() } else { x.as_number() };
                            (x, y)
                        })
                    })
                    .collect()
            })
            .collect();

        let plot = setup.plot;
        let xs = positions.iter().flatten().flatten().map(|(x, _)| *x);
        let x = if timed {
            ScatterXScale::Time(TimeScale::from_extent(xs, (0.0, plot.width)))
        } else {
            ScatterXScale::Linear(LinearScale::from_extent(xs, (0.0, plot.width)))
        };
        let y = LinearScale::from_extent(
            positions.iter().flatten().flatten().map(|(_, y)| *y),
            (plot.height, 0.0),
        );
        Self {
            setup,
            x,
            y,
            positions,
        }
    }

    #[must_use]
    pub fn x_scale(&self) -> ScatterXScale {
        self.x
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.y
    }

    /// Dot center in root coordinates.
    #[must_use]
    pub fn dot_center(&self, dataset: usize, index: usize) -> Option<Point> {
        let (x, y) = (*self.positions.get(dataset)?.get(index)?)?;
        let center = self
            .setup
            .plot
            .to_root(Point::new(self.x.map(x), self.y.map(y)));
        center.is_finite().then_some(center)
    }

    fn dot_radius(&self) -> f64 {
        DOT_RADIUS * self.setup.options.dot_size
    }

    fn hover_radius(&self) -> f64 {
        DOT_HOVER_RADIUS * self.setup.options.dot_size
    }

    fn dots(&self) -> impl Iterator<Item = (usize, usize, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .flat_map(move |(dataset, points)| {
                (0..points.len()).filter_map(move |index| {
                    self.dot_center(dataset, index)
                        .map(|center| (dataset, index, center))
                })
            })
    }

    fn point_item(&self, dataset: usize, index: usize) -> Option<SelectionItem> {
        let data = self.setup.spec.datasets().get(dataset)?;
        let (x, y) = data.data.get(index)?.as_point()?;
        Some(SelectionItem::Point {
            dataset_index: dataset,
            point_index: index,
            label: data.label.clone(),
            x: x.clone(),
            y,
        })
    }
}

impl MarkRenderer for ScatterMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn plot(&self) -> PlotArea {
        self.setup.plot
    }

    fn draw_static(&self, frame: &mut RenderFrame) {
        let plot = self.setup.plot;
        let style = self.setup.axis_style();
        let x_ticks = self.x.ticks(self.setup.options.x_tick_count);
        let y_ticks = value_ticks(self.y, self.setup.options.y_tick_count);
        frame.extend(CanvasLayerKind::Axis, bottom_axis(plot, &x_ticks, style));
        frame.extend(CanvasLayerKind::Axis, left_axis(plot, &y_ticks, style));
    }

    fn draw_marks(&self, hovered: Option<MarkHit>) -> Vec<Primitive> {
        let options = &self.setup.options;
        let filter = self.setup.filter.marks();
        let mut out = Vec::new();
        if options.show_line {
            for dataset in 0..self.positions.len() {
                let points: Vec<Point> = (0..self.positions[dataset].len())
                    .filter_map(|index| self.dot_center(dataset, index))
                    .collect();
                out.push(
                    PathPrimitive::new(monotone_x(&points))
                        .with_stroke(options.color(dataset), ROOT_STROKE_WIDTH)
                        .with_filter(filter)
                        .into(),
                );
            }
        }
        for (dataset, index, center) in self.dots() {
            let radius = if hovered == Some(MarkHit::new(dataset, index)) {
                self.hover_radius()
            } else {
                self.dot_radius()
            };
            out.push(
                CirclePrimitive::new(center, radius)
                    .with_color(options.color(dataset), ROOT_STROKE_WIDTH)
                    .with_filter(filter)
                    .into(),
            );
        }
        out
    }

    // Later datasets paint on top, so they win overlapping hits.
    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        let radius = self.dot_radius();
        self.dots()
            .filter(|(_, _, center)| center.distance_to(root) <= radius)
            .last()
            .map(|(dataset, index, _)| MarkHit::new(dataset, index))
    }

    fn hover(&self, hit: MarkHit, _root: Point) -> HoverFeedback {
        let center = self
            .dot_center(hit.dataset, hit.index)
            .unwrap_or(Point::new(self.setup.plot.left, self.setup.plot.top));
        let anchor = center.translated(SCATTER_TOOLTIP_OFFSET, SCATTER_TOOLTIP_OFFSET);
        let dataset = self.setup.spec.datasets().get(hit.dataset);
        let point = dataset
            .and_then(|dataset| dataset.data.get(hit.index))
            .and_then(|value| value.as_point());
        let title = match (point, self.setup.options.time_format.as_deref()) {
            (Some((x, _)), Some(pattern)) => format_timestamp(x.as_time_ms(), pattern),
            (Some((x, _)), None) => x.to_string(),
            (None, _) => String::new(),
        };
        let y = point.map_or(f64::NAN, |(_, y)| y);
        HoverFeedback {
            title,
            items: vec![SwatchItem::new(
                self.setup.options.color(hit.dataset),
                MarkSetup::row_text(dataset.and_then(|dataset| dataset.label.as_deref()), y),
            )],
            anchor,
            quadrant: self.setup.quadrant_at(anchor),
            guide: Vec::new(),
        }
    }

    fn click_payload(&self, hit: MarkHit) -> Option<SelectionItem> {
        self.point_item(hit.dataset, hit.index)
    }

    fn legend_items(&self) -> Vec<SwatchItem> {
        self.setup
            .spec
            .datasets()
            .iter()
            .enumerate()
            .map(|(index, dataset)| {
                SwatchItem::new(self.setup.options.color(index), dataset.label_text())
            })
            .collect()
    }

    fn legend_bounds(&self) -> Bounds {
        self.setup.plot_bounds()
    }

    fn supports_box_select(&self) -> bool {
        self.setup.options.on_select.is_some()
    }

    // The drag overlay sits beneath the dots: presses on a dot stay clicks.
    fn drag_surface(&self, root: Point) -> bool {
        let plot = self.setup.plot;
        self.supports_box_select()
            && plot.contains_local(plot.to_local(root))
            && self.hit_test(root).is_none()
    }

    fn box_select(&self, start: Point, end: Point) -> Vec<SelectionItem> {
        if !exceeds_drag_threshold(start, end) {
            return Vec::new();
        }
        // pixel y grows downward, so the data rect flips vertically
        let rect = DataRect::new(
            self.x.invert(start.x),
            self.x.invert(end.x),
            self.y.invert(start.y),
            self.y.invert(end.y),
        );
        self.positions
            .iter()
            .enumerate()
            .flat_map(|(dataset, points)| {
                points
                    .iter()
                    .enumerate()
                    .filter(|(_, position)| {
                        position.is_some_and(|(x, y)| rect.contains(x, y))
                    })
                    .map(move |(index, _)| (dataset, index))
            })
            .filter_map(|(dataset, index)| self.point_item(dataset, index))
            .collect()
    }
}
