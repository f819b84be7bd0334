use crate::api::axis::{ROOT_STROKE_WIDTH, TICK_FONT_SIZE};
use crate::api::legend::RADIAL_LEGEND_OFFSET_Y;
use crate::api::mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup};
use crate::api::overlay::SwatchItem;
use crate::api::scatter_marks::{DOT_HOVER_RADIUS, DOT_RADIUS};
use crate::core::curve::linear_closed;
use crate::core::scale::extent;
use crate::core::ticks::format_number;
use crate::core::{Bounds, ChartKind, PlotArea, Point, RadarGeometry, radial_radius};
use crate::interaction::{LabeledValue, MarkHit, SelectionItem};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LinePrimitive, LineStrokeStyle, PathPrimitive, Primitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

pub const GRID_STROKE_WIDTH: f64 = 1.0;
pub const AREA_FILL_OPACITY: f64 = 0.2;
/// Gap between the outer ring and the spoke labels.
pub const LABEL_GAP: f64 = 10.0;

const RING_DASH: LineStrokeStyle = LineStrokeStyle::Dashed { dash: 7.0, gap: 7.0 };
const TEXT_DY_EM: f64 = 0.35;
const TICK_DX_EM: f64 = -0.125;

/// One filled polygon per dataset over spokes radiating from the viewport
/// center, on top of dashed rings at the magnitude ticks.
#[derive(Debug, Clone)]
pub struct RadarMarks {
    setup: MarkSetup,
    geometry: RadarGeometry,
}

impl RadarMarks {
    #[must_use]
    pub fn new(setup: MarkSetup) -> Self {
        let max_value = extent(setup.spec.datasets().iter().flat_map(|dataset| dataset.values()))
            .map_or(0.0, |(_, max)| max);
        // spokes follow the first dataset; labels only name them
        let direction_count = setup
            .spec
            .datasets()
            .first()
            .map_or(setup.spec.labels().len(), |dataset| dataset.data.len());
        let geometry = RadarGeometry::new(
            setup.viewport.center(),
            radial_radius(setup.viewport),
            max_value,
            direction_count,
        );
        Self { setup, geometry }
    }

    #[must_use]
    pub fn geometry(&self) -> RadarGeometry {
        self.geometry
    }

    /// Vertex of `dataset` on spoke `index`, in root coordinates.
    #[must_use]
    pub fn vertex(&self, dataset: usize, index: usize) -> Option<Point> {
        let value = self.setup.spec.datasets().get(dataset)?.value_at(index);
        let point = self.geometry.point(value, index);
        point.is_finite().then_some(point)
    }

    fn vertices(&self) -> impl Iterator<Item = (usize, usize, Point)> + '_ {
        let spokes = self.geometry.direction_count;
        (0..self.setup.spec.datasets().len()).flat_map(move |dataset| {
            (0..spokes).filter_map(move |index| {
                self.vertex(dataset, index)
                    .map(|point| (dataset, index, point))
            })
        })
    }

    fn dot_radius(&self) -> f64 {
        DOT_RADIUS * self.setup.options.dot_size
    }

    fn grid(&self) -> Vec<Primitive> {
        let stroke = self.setup.options.stroke_color;
        let filter = self.setup.filter.marks();
        let ticks = self.geometry.ticks(self.setup.options.ticks_count);
        let mut out = Vec::new();

        for tick in &ticks {
            out.push(
                PathPrimitive::new(linear_closed(&self.geometry.ring(*tick)))
                    .with_stroke(stroke, GRID_STROKE_WIDTH)
                    .with_stroke_style(RING_DASH)
                    .with_filter(filter)
                    .into(),
            );
        }

        let center = self.geometry.center;
        let max_radius = self.geometry.radius;
        for index in 0..self.geometry.direction_count {
            let end = self.geometry.point_at_radius(max_radius, index);
            out.push(
                LinePrimitive::new(center.x, center.y, end.x, end.y, GRID_STROKE_WIDTH, stroke)
                    .with_filter(filter)
                    .into(),
            );
        }

        for tick in &ticks {
            let at = self.geometry.point(*tick, 0);
            out.push(
                TextPrimitive::new(
                    format_number(*tick),
                    at.x + TICK_DX_EM * TICK_FONT_SIZE,
                    at.y,
                    TICK_FONT_SIZE,
                    stroke,
                    TextHAlign::Right,
                )
                .with_dy_em(TEXT_DY_EM)
                .into(),
            );
        }

        if self.setup.options.show_labels {
            for (index, label) in self.setup.spec.labels().iter().enumerate() {
                if label.is_empty() || index >= self.geometry.direction_count {
                    continue;
                }
                let at = self
                    .geometry
                    .point_at_radius(max_radius + LABEL_GAP, index);
                let align = if at.x < center.x {
                    TextHAlign::Right
                } else {
                    TextHAlign::Left
                };
                out.push(
                    TextPrimitive::new(label.clone(), at.x, at.y, TICK_FONT_SIZE, stroke, align)
                        .with_dy_em(TEXT_DY_EM)
                        .into(),
                );
            }
        }
        out
    }
}

impl MarkRenderer for RadarMarks {
    fn kind(&self) -> ChartKind {
        ChartKind::Radar
    }

    fn plot(&self) -> PlotArea {
        self.setup.plot
    }

    fn draw_static(&self, frame: &mut RenderFrame) {
        frame.extend(CanvasLayerKind::Grid, self.grid());
    }

    fn draw_marks(&self, hovered: Option<MarkHit>) -> Vec<Primitive> {
        let options = &self.setup.options;
        let filter = self.setup.filter.marks();
        let mut out = Vec::new();
        for dataset in 0..self.setup.spec.datasets().len() {
            let color = options.color(dataset);
            let points: Vec<Point> = (0..self.geometry.direction_count)
                .filter_map(|index| self.vertex(dataset, index))
                .collect();
            out.push(
                PathPrimitive::new(linear_closed(&points))
                    .with_fill(Some(color), AREA_FILL_OPACITY)
                    .with_stroke(color, ROOT_STROKE_WIDTH)
                    .with_filter(filter)
                    .into(),
            );
        }
        for (dataset, index, point) in self.vertices() {
            let radius = if hovered == Some(MarkHit::new(dataset, index)) {
                DOT_HOVER_RADIUS * options.dot_size
            } else {
                self.dot_radius()
            };
            out.push(
                CirclePrimitive::new(point, radius)
                    .with_color(options.color(dataset), ROOT_STROKE_WIDTH)
                    .with_filter(filter)
                    .into(),
            );
        }
        out
    }

    fn hit_test(&self, root: Point) -> Option<MarkHit> {
        let radius = self.dot_radius();
        self.vertices()
            .filter(|(_, _, point)| point.distance_to(root) <= radius)
            .last()
            .map(|(dataset, index, _)| MarkHit::new(dataset, index))
    }

    fn hover(&self, hit: MarkHit, root: Point) -> HoverFeedback {
        let anchor = self.vertex(hit.dataset, hit.index).unwrap_or(root);
        let items = self
            .setup
            .spec
            .datasets()
            .iter()
            .enumerate()
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
            quadrant: self.setup.quadrant_at(anchor),
            guide: Vec::new(),
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
        Bounds::new(
            0.0,
            RADIAL_LEGEND_OFFSET_Y,
            self.setup.viewport.width_px(),
            self.setup.viewport.height_px(),
        )
    }
}
