use crate::api::axis::{ROOT_STROKE_WIDTH, bottom_axis, category_ticks, left_axis, value_ticks};
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::core::curve::monotone_x;
use crate::core::{Bounds, ChartKind, LinearScale, PlotArea, Point, PointScale};
use crate::interaction::{LabeledValue, MarkHit, SelectionItem};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive,
    Primitive, RenderFrame,
};

pub const GUIDE_COLOR: Color = Color::from_rgb8(0xaa, 0xaa, 0xaa);
pub const GUIDE_STROKE_WIDTH: f64 = 1.5;
pub const GUIDE_DASH: LineStrokeStyle = LineStrokeStyle::Dashed { dash: 7.0, gap: 7.0 };
pub const HOVER_DOT_RADIUS: f64 = 3.5;

/// One smoothed line per dataset over evenly spaced labels.
///
/// The whole plot is the hover target: the pointer snaps to the nearest
/// label and the tooltip lists every dataset there.
#[derive(Debug, Clone)]
pub struct LineMarks {
    setup: MarkSetup,
    x: PointScale,
    y: LinearScale,
}

impl LineMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let plot = setup.plot;
        let x = PointScale::new(setup.spec.labels().len(), (0.0, plot.width));
        let y = LinearScale::from_extent(
            setup.spec.datasets().iter().flat_map(|dataset| dataset.values()),
            (plot.height, 0.0),
        );
        Self { setup, x, y }
    }

    #[must_use]
    pub fn label_scale(&self) -> PointScale {
        self.x
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.y
    }

    /// Label nearest to a root x coordinate.
    #[must_use]
    pub fn snap(&self, root_x: f64) -> Option<usize> {
        self.x.nearest_index(root_x - self.setup.plot.left)
    }

    fn point(&self, label: usize, value: f64) -> Point {
        self.setup
            .plot
            .to_root(Point::new(self.x.position(label), self.y.map(value)))
    }
}

impl MarkRenderer for LineMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn plot(&self) -> PlotArea {
        self.setup.plot
    }

    fn draw_static(&self, frame: &mut RenderFrame) {
        let plot = self.setup.plot;
        let style = self.setup.axis_style();
        let x_ticks = category_ticks(self.setup.spec.labels(), |index| self.x.position(index));
        let y_ticks = value_ticks(self.y, self.setup.options.y_tick_count);
        frame.extend(CanvasLayerKind::Axis, bottom_axis(plot, &x_ticks, style));
        frame.extend(CanvasLayerKind::Axis, left_axis(plot, &y_ticks, style));
    }

    fn draw_marks(&self, _hovered: Option<MarkHit>) -> Vec<Primitive> {
        let labels = self.x.len();
        self.setup
            .spec
            .datasets()
            .iter()
            .enumerate()
            .map(|(index, dataset)| {
                let points: Vec<Point> = dataset
                    .values()
                    .take(labels)
                    .enumerate()
                    .map(|(label, value)| self.point(label, value))
                    .collect();
                PathPrimitive::new(monotone_x(&points))
                    .with_stroke(self.setup.options.color(index), ROOT_STROKE_WIDTH)
                    .with_filter(self.setup.filter.marks())
                    .into()
            })
            .collect()
    }

    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        let plot = self.setup.plot;
        if !plot.contains_local(plot.to_local(root)) {
            return None;
        }
        self.snap(root.x).map(|index| MarkHit::new(0, index))
    }

    fn hover(&self, hit: MarkHit, root: Point) -> HoverFeedback {
        let (anchor, quadrant) = self.setup.pointer_anchor(root);
        let plot = self.setup.plot;
        let guide_x = plot.left + self.x.position(hit.index);
        let mut guide: Vec<Primitive> = vec![
            LinePrimitive::new(
                guide_x,
                plot.top,
                guide_x,
                plot.bottom(),
                GUIDE_STROKE_WIDTH,
                GUIDE_COLOR,
            )
            .with_stroke_style(GUIDE_DASH)
            .into(),
        ];
        let mut items = Vec::with_capacity(self.setup.spec.datasets().len());
        for (index, dataset) in self.setup.spec.datasets().iter().enumerate() {
            let color = self.setup.options.color(index);
            let value = dataset.value_at(hit.index);
            let center = self.point(hit.index, value);
            if center.is_finite() {
                guide.push(
                    CirclePrimitive::new(center, HOVER_DOT_RADIUS)
                        .with_color(color, ROOT_STROKE_WIDTH)
                        .into(),
                );
            }
            items.push(SwatchItem::new(
                color,
                MarkSetup::row_text(dataset.label.as_deref(), value),
            ));
        }
        HoverFeedback {
            title: self.setup.spec.label(hit.index).to_owned(),
            items,
            anchor,
            quadrant,
            guide,
        }
    }

    fn click_payload(&self, hit: MarkHit) -> Option<SelectionItem> {
        Some(SelectionItem::Column {
            index: hit.index,
            label: self.setup.spec.label(hit.index).to_owned(),
            values: self
                .setup
                .spec
                .datasets()
                .iter()
                .map(|dataset| LabeledValue {
                    label: dataset.label.clone(),
                    value: dataset.value_at(hit.index),
                })
                .collect(),
        })
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
}
