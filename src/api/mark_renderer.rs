use crate::api::axis::AxisStyle;
use crate::api::bar_marks::BarMarks;
use crate::api::line_marks::LineMarks;
use crate::api::overlay::SwatchItem;
use crate::api::pie_marks::PieMarks;
use crate::api::radar_marks::RadarMarks;
use crate::api::scatter_marks::ScatterMarks;
use crate::api::stacked_bar_marks::StackedBarMarks;
use crate::api::tooltip::TOOLTIP_MOUSE_OFFSET;
use crate::core::{
    Bounds, ChartKind, ChartSpec, PlotArea, Point, Quadrant, ResolvedOptions, Viewport,
    tooltip_quadrant,
};
use crate::interaction::{MarkHit, SelectionItem};
use crate::render::{DistortionFilter, Primitive, RenderFrame};

/// Everything a mark renderer needs, fixed at chart construction.
#[derive(Debug, Clone)]
pub struct MarkSetup {
    pub spec: ChartSpec,
    pub options: ResolvedOptions,
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub filter: DistortionFilter,
}

impl MarkSetup {
    #[must_use]
    pub fn axis_style(&self) -> AxisStyle {
        AxisStyle {
            stroke: self.options.stroke_color,
            filter: self.filter.chrome(),
        }
    }

    /// Quadrant for a tooltip anchored at `root`, judged inside the plot.
    #[must_use]
    pub fn quadrant_at(&self, root: Point) -> Quadrant {
        let local = self.plot.to_local(root);
        tooltip_quadrant(local.x, local.y, self.plot.width, self.plot.height)
    }

    /// Tooltip anchor offset from the pointer, with its quadrant.
    #[must_use]
    pub fn pointer_anchor(&self, root: Point) -> (Point, Quadrant) {
        let anchor = root.translated(TOOLTIP_MOUSE_OFFSET, TOOLTIP_MOUSE_OFFSET);
        (anchor, self.quadrant_at(anchor))
    }

    /// Legend area of axis charts: the plot itself.
    #[must_use]
    pub fn plot_bounds(&self) -> Bounds {
        Bounds::new(
            self.plot.left,
            self.plot.top,
            self.plot.width,
            self.plot.height,
        )
    }

    /// `"{label}: {value}"` as shown in tooltip rows.
    #[must_use]
    pub fn row_text(label: Option<&str>, value: f64) -> String {
        format!(
            "{}: {}",
            label.unwrap_or(""),
            crate::core::ticks::format_number(value)
        )
    }
}

/// Tooltip content and guide overlay for a hovered mark.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverFeedback {
    pub title: String,
    pub items: Vec<SwatchItem>,
    /// Tooltip anchor in root coordinates.
    pub anchor: Point,
    pub quadrant: Quadrant,
    /// Extra primitives drawn while hovering (guide line, hover dots).
    pub guide: Vec<Primitive>,
}

/// Behavior each chart kind plugs into the shared chart engine.
///
/// Coordinates passed in are root pixels unless a name says otherwise.
pub trait MarkRenderer {
    fn kind(&self) -> ChartKind;

    fn plot(&self) -> PlotArea;

    /// Axes, grids and other non-interactive parts.
    fn draw_static(&self, frame: &mut RenderFrame);

    /// Data marks, with `hovered` drawn in its highlighted state.
    fn draw_marks(&self, hovered: Option<MarkHit>) -> Vec<Primitive>;

    fn hit_test(&self, root: Point) -> Option<MarkHit>;

    fn hover(&self, hit: MarkHit, root: Point) -> HoverFeedback;

    fn click_payload(&self, hit: MarkHit) -> Option<SelectionItem>;

    fn legend_items(&self) -> Vec<SwatchItem>;

    /// Area, in root coordinates, the legend is cornered into.
    fn legend_bounds(&self) -> Bounds;

    fn supports_box_select(&self) -> bool {
        false
    }

    /// Whether a press at `root` may start a box selection.
    fn drag_surface(&self, _root: Point) -> bool {
        false
    }

    /// Items inside the drag spanned by two plot-local points.
    fn box_select(&self, _start: Point, _end: Point) -> Vec<SelectionItem> {
        Vec::new()
    }
}

type MarkFactory = fn(MarkSetup) -> Box<dyn MarkRenderer>;

const MARK_FACTORIES: [(ChartKind, MarkFactory); 6] = [
    (ChartKind::Bar, bar),
    (ChartKind::StackedBar, stacked_bar),
    (ChartKind::Line, line),
    (ChartKind::Scatter, scatter),
    (ChartKind::Pie, pie),
    (ChartKind::Radar, radar),
];

fn bar(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(BarMarks::new(setup))
}

fn stacked_bar(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(StackedBarMarks::new(setup))
}

fn line(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(LineMarks::new(setup))
}

fn scatter(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(ScatterMarks::new(setup))
}

fn pie(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(PieMarks::new(setup))
}

fn radar(setup: MarkSetup) -> Box<dyn MarkRenderer> {
    Box::new(RadarMarks::new(setup))
}

/// Builds the mark renderer registered for `kind`.
#[must_use]
pub fn build_mark_renderer(kind: ChartKind, setup: MarkSetup) -> Option<Box<dyn MarkRenderer>> {
    MARK_FACTORIES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, factory)| factory(setup))
}
