use crate::api::axis::{bottom_axis, category_ticks, left_axis, value_ticks};
use crate::api::bar_marks::{BAR_CORNER_RADIUS, BAR_STROKE_WIDTH};
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::core::{
    BAND_PADDING, BandScale, Bounds, ChartKind, LinearScale, PlotArea, Point, StackLayout,
};
use crate::interaction::{MarkHit, SelectionItem};
use crate::render::{CanvasLayerKind, Primitive, RectPrimitive, RenderFrame};

/// Bars split into one segment per dataset, stacked bottom-up in dataset
/// order.
#[derive(Debug, Clone)]
pub struct StackedBarMarks {
    setup: MarkSetup,
    stack: StackLayout,
    x: BandScale,
    y: LinearScale,
}

impl StackedBarMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let plot = setup.plot;
        let categories = setup.spec.labels().len();
        let stack = StackLayout::from_datasets(setup.spec.datasets(), categories);
        let x = BandScale::new(categories, (0.0, plot.width), BAND_PADDING);
        let y = LinearScale::zero_based(stack.totals().iter().copied(), (plot.height, 0.0));
        Self { setup, stack, x, y }
    }

    #[must_use]
    pub fn stack(&self) -> &StackLayout {
        &self.stack
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.y
    }

    /// Segment of `dataset` at `category` in root coordinates.
    #[must_use]
    pub fn segment_bounds(&self, dataset: usize, category: usize) -> Bounds {
        let plot = self.setup.plot;
        let (bottom, top) = self.stack.segment(dataset, category);
        let y_top = self.y.map(top);
        let y_bottom = self.y.map(bottom);
        Bounds::new(
            plot.left + self.x.position(category),
            plot.top + y_top.min(y_bottom),
            self.x.bandwidth(),
            (y_bottom - y_top).abs(),
        )
    }

    fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.stack.dataset_count()).flat_map(move |dataset| {
            (0..self.stack.category_count()).map(move |category| (dataset, category))
        })
    }
}

impl MarkRenderer for StackedBarMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::StackedBar
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

    // Segments keep their dataset color; hovering only drives the tooltip.
    fn draw_marks(&self, _hovered: Option<MarkHit>) -> Vec<Primitive> {
        let options = &self.setup.options;
        self.segments()
            .map(|(dataset, category)| {
                RectPrimitive::from_bounds(self.segment_bounds(dataset, category))
                    .with_fill(Some(options.color(dataset)))
                    .with_border(options.stroke_color, BAR_STROKE_WIDTH)
                    .with_corner_radius(BAR_CORNER_RADIUS)
                    .with_filter(self.setup.filter.marks())
                    .into()
            })
            .collect()
    }

    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        self.segments()
            .find(|(dataset, category)| {
                let bounds = self.segment_bounds(*dataset, *category);
                bounds.height > 0.0 && bounds.contains(root)
            })
            .map(|(dataset, category)| MarkHit::new(dataset, category))
    }

    fn hover(&self, hit: MarkHit, root: Point) -> HoverFeedback {
        let (anchor, quadrant) = self.setup.pointer_anchor(root);
        let items = self
            .setup
            .spec
            .datasets()
            .iter()
            .enumerate()
            .rev()
            .map(|(dataset, data)| {
                SwatchItem::new(
                    self.setup.options.color(dataset),
                    MarkSetup::row_text(data.label.as_deref(), data.value_at(hit.index)),
                )
            })
            .collect();
        HoverFeedback {
            title: self.setup.spec.label(hit.index).to_owned(),
            items,
            anchor,
            quadrant,
            guide: Vec::new(),
        }
    }

    fn click_payload(&self, hit: MarkHit) -> Option<SelectionItem> {
        let dataset = self.setup.spec.datasets().get(hit.dataset)?;
        Some(SelectionItem::Segment {
            index: hit.index,
            label: self.setup.spec.label(hit.index).to_owned(),
            dataset: dataset.label.clone(),
            value: dataset.value_at(hit.index),
        })
    }

    fn legend_items(&self) -> Vec<SwatchItem> {
        self.setup
            .spec
            .datasets()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, dataset)| {
                SwatchItem::new(self.setup.options.color(index), dataset.label_text())
            })
            .collect()
    }

    fn legend_bounds(&self) -> Bounds {
        self.setup.plot_bounds()
    }
}
