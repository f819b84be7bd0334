use crate::api::legend::RADIAL_LEGEND_OFFSET_Y;
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::core::pie::{arc_path, sector_contains};
use crate::core::{Bounds, ChartKind, PieSlice, PlotArea, Point, pie_layout, radial_radius};
use crate::interaction::{MarkHit, SelectionItem};
use crate::render::{PathPrimitive, Primitive, RenderFrame};

pub const PIE_STROKE_WIDTH: f64 = 2.0;
pub const HOVER_FILL_OPACITY: f64 = 0.6;

/// Pie or donut over the first dataset, one colored slice per label.
#[derive(Debug, Clone)]
pub struct PieMarks {
    setup: MarkSetup,
    slices: Vec<PieSlice>,
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
}

impl PieMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let values: Vec<f64> = setup
            .spec
            .datasets()
            .first()
            .map(|dataset| dataset.values().collect())
            .unwrap_or_default();
        let outer_radius = radial_radius(setup.viewport);
        let inner_radius = outer_radius * setup.options.inner_radius.clamp(0.0, 1.0);
        Self {
            slices: pie_layout(&values),
            center: setup.viewport.center(),
            outer_radius,
            inner_radius,
            setup,
        }
    }

    #[must_use]
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// `(inner, outer)` radius in pixels.
    #[must_use]
    pub fn radii(&self) -> (f64, f64) {
        (self.inner_radius, self.outer_radius)
    }

    fn value(&self, index: usize) -> f64 {
        self.slices.get(index).map_or(f64::NAN, |slice| slice.value)
    }
}

impl MarkRenderer for PieMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn plot(&self) -> PlotArea {
        self.setup.plot
    }

    fn draw_static(&self, _frame: &mut RenderFrame) {}

    fn draw_marks(&self, hovered: Option<MarkHit>) -> Vec<Primitive> {
        let options = &self.setup.options;
        self.slices
            .iter()
            .map(|slice| {
                let opacity = if hovered.map(|hit| hit.index) == Some(slice.index) {
                    HOVER_FILL_OPACITY
                } else {
                    1.0
                };
                PathPrimitive::new(arc_path(
                    self.center,
                    self.inner_radius,
                    self.outer_radius,
                    slice.start_angle,
                    slice.end_angle,
                ))
                .with_fill(Some(options.color(slice.index)), opacity)
                .with_stroke(options.stroke_color, PIE_STROKE_WIDTH)
                .with_filter(self.setup.filter.marks())
                .into()
            })
            .collect()
    }

    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        let offset = Point::new(root.x - self.center.x, root.y - self.center.y);
        self.slices
            .iter()
            .find(|slice| sector_contains(**slice, self.inner_radius, self.outer_radius, offset))
            .map(|slice| MarkHit::new(0, slice.index))
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
        self.slices
            .iter()
            .map(|slice| {
                SwatchItem::new(
                    self.setup.options.color(slice.index),
                    self.setup.spec.label(slice.index),
                )
            })
            .collect()
    }

    fn legend_bounds(&self) -> Bounds {
        Bounds::new(
            0.0,
            RADIAL_LEGEND_OFFSET_Y,
            self.setup.viewport.width_px(),
            self.setup.viewport.height_px(),
        )
    }
}
