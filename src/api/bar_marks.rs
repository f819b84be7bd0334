use crate::api::axis::{bottom_axis, category_ticks, left_axis, value_ticks};
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::core::{BAND_PADDING, BandScale, Bounds, ChartKind, LinearScale, PlotArea, Point};
use crate::interaction::{MarkHit, SelectionItem};
use crate::render::{CanvasLayerKind, Primitive, RectPrimitive, RenderFrame};

pub const BAR_STROKE_WIDTH: f64 = 3.0;
pub const BAR_CORNER_RADIUS: f64 = 2.0;

/// One outlined bar per label, filled only while hovered.
#[derive(Debug, Clone)]
pub struct BarMarks {
    setup: MarkSetup,
    x: BandScale,
    y: LinearScale,
}

impl BarMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let plot = setup.plot;
        let x = BandScale::new(setup.spec.labels().len(), (0.0, plot.width), BAND_PADDING);
        let y = LinearScale::zero_based(
            setup.spec.datasets().iter().flat_map(|dataset| dataset.values()),
            (plot.height, 0.0),
        );
        Self { setup, x, y }
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.y
    }

    fn value(&self, index: usize) -> f64 {
        self.setup
            .spec
            .datasets()
            .first()
            .map_or(f64::NAN, |dataset| dataset.value_at(index))
    }

    fn bar_count(&self) -> usize {
        let values = self
            .setup
            .spec
            .datasets()
            .first()
            .map_or(0, |dataset| dataset.data.len());
        values.min(self.x.len())
    }

    /// Bar rectangle in root coordinates; `None` for non-numeric values.
    #[must_use]
    pub fn bar_bounds(&self, index: usize) -> Option<Bounds> {
        let value = self.value(index);
        if !value.is_finite() || index >= self.bar_count() {
            return None;
        }
        let plot = self.setup.plot;
        let top = self.y.map(value);
        let base = self.y.map(0.0);
        Some(Bounds::new(
            plot.left + self.x.position(index),
            plot.top + top.min(base),
            self.x.bandwidth(),
            (base - top).abs(),
        ))
    }
}

impl MarkRenderer for BarMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn plot(&self) -> PlotArea {
        self.setup.plot
    }

    fn draw_static(&self, frame: &mut RenderFrame) {
        let plot = self.setup.plot;
        let style = self.setup.axis_style();
        let x_ticks = category_ticks(self.setup.spec.labels(), |index| self.x.center(index));
        let y_ticks = value_ticks(self.y, self.setup.options.y_tick_count);
        frame.extend(CanvasLayerKind::Axis, bottom_axis(plot, &x_ticks, style));
        frame.extend(CanvasLayerKind::Axis, left_axis(plot, &y_ticks, style));
    }

    fn draw_marks(&self, hovered: Option<MarkHit>) -> Vec<Primitive> {
        let options = &self.setup.options;
        (0..self.bar_count())
            .filter_map(|index| {
                let bounds = self.bar_bounds(index)?;
                let fill = (hovered.map(|hit| hit.index) == Some(index))
                    .then(|| options.color(index));
                Some(
                    RectPrimitive::from_bounds(bounds)
                        .with_fill(fill)
                        .with_border(options.stroke_color, BAR_STROKE_WIDTH)
                        .with_corner_radius(BAR_CORNER_RADIUS)
                        .with_filter(self.setup.filter.marks())
                        .into(),
                )
            })
            .collect()
    }

    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        (0..self.bar_count())
            .find(|index| {
                self.bar_bounds(*index)
                    .is_some_and(|bounds| bounds.contains(root))
            })
            .map(|index| MarkHit::new(0, index))
    }

    fn hover(&self, hit: MarkHit, root: Point) -> HoverFeedback {
        let (anchor, quadrant) = self.setup.pointer_anchor(root);
        let label = self
            .setup
            .spec
            .datasets()
            .first()
            .and_then(|dataset| dataset.label.as_deref());
        HoverFeedback {
            title: self.setup.spec.label(hit.index).to_owned(),
            items: vec![SwatchItem::new(
                self.setup.options.color(hit.index),
                MarkSetup::row_text(label, self.value(hit.index)),
            )],
            anchor,
            quadrant,
            guide: Vec::new(),
        }
    }

    fn click_payload(&self, hit: MarkHit) -> Option<SelectionItem> {
        Some(SelectionItem::Category {
            index: hit.index,
            label: self.setup.spec.label(hit.index).to_owned(),
            value: self.value(hit.index),
        })
    }

    fn legend_items(&self) -> Vec<SwatchItem> {
        Vec::new()
    }

    fn legend_bounds(&self) -> Bounds {
        self.setup.plot_bounds()
    }
}
