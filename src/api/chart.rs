use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::context::ChartContext;
use crate::api::labels::chart_labels;
use crate::api::legend::LegendLayout;
use crate::api::mark_renderer::{MarkRenderer, MarkSetup, build_mark_renderer};
use crate::api::overlay::OverlayStyle;
use crate::api::tooltip::Tooltip;
use crate::core::{
    ChartKind, ChartSpec, PlotArea, ResolvedOptions, compute_margins, resolve_for,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartId, DragSession, InteractionMode, MarkHit};
use crate::render::{CanvasLayerKind, DistortionFilter, RenderFrame, Renderer};

/// Lifecycle of a chart handle. Construction ends in `Rendered`; there is
/// no re-render API, only `dispose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartState {
    Constructed,
    Rendered,
    Disposed,
}

/// One chart instance bound to a rendering backend.
///
/// The handle owns a private copy of its spec, draws once at construction
/// and afterwards only reacts to pointer events forwarded by the host.
pub struct Chart<R: Renderer> {
    pub(crate) id: ChartId,
    pub(crate) kind: ChartKind,
    pub(crate) renderer: R,
    pub(crate) context: ChartContext,
    pub(crate) options: ResolvedOptions,
    pub(crate) marks: Box<dyn MarkRenderer>,
    pub(crate) frame: RenderFrame,
    pub(crate) tooltip: Tooltip,
    pub(crate) legend: Option<LegendLayout>,
    pub(crate) hovered: Option<MarkHit>,
    pub(crate) drag: Option<DragSession>,
    pub(crate) state: ChartState,
}

impl<R: Renderer> Chart<R> {
    /// Builds and draws a chart of `kind`.
    ///
    /// Only a zero-sized viewport or a renderer failure is an error;
    /// malformed data draws a degenerate chart.
    pub fn new(
        kind: ChartKind,
        renderer: R,
        spec: ChartSpec,
        context: &ChartContext,
    ) -> ChartResult<Self> {
        let viewport = context.viewport;
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let options = resolve_for(kind, &spec);
        let plot = if kind.has_axes() {
            PlotArea::with_margin(
                viewport,
                compute_margins(
                    has_text(spec.title.as_deref()),
                    has_text(spec.x_label.as_deref()),
                    has_text(spec.y_label.as_deref()),
                ),
            )
        } else {
            PlotArea::full(viewport)
        };
        let filter = DistortionFilter::new(options.unxkcdify, kind.is_radial());

        let mut frame = RenderFrame::new(viewport);
        frame.background = options.background_color;
        frame.font_family = options.font_family.clone();
        frame.distortion = filter.params();
        if !options.unxkcdify {
            frame.font_face = context.fonts.registered_face();
            frame.text_deferred = context.fonts.is_pending();
        }

        // radial charts only carry a title
        let labels = {
            let label_source = if kind.has_axes() {
                Cow::Borrowed(&spec)
            } else {
                Cow::Owned(ChartSpec {
                    x_label: None,
                    y_label: None,
                    ..spec.clone()
                })
            };
            chart_labels(
                &label_source,
                viewport,
                options.stroke_color,
                context.text_measurer.as_ref(),
            )
        };
        frame.extend(CanvasLayerKind::Labels, labels);

        let dataset_count = spec.datasets().len();
        let label_count = spec.labels().len();
        let setup = MarkSetup {
            spec,
            options: options.clone(),
            viewport,
            plot,
            filter,
        };
        let marks = build_mark_renderer(kind, setup)
            .ok_or_else(|| ChartError::UnknownChartKind(kind.to_string()))?;
        marks.draw_static(&mut frame);
        frame.replace_layer(CanvasLayerKind::Series, marks.draw_marks(None));

        let style = OverlayStyle {
            background: options.background_color,
            stroke: options.stroke_color,
            filter: filter.chrome(),
        };
        let legend = options
            .show_legend
            .then(|| marks.legend_items())
            .filter(|items| !items.is_empty())
            .map(|items| {
                LegendLayout::measure(
                    items,
                    options.legend_position,
                    marks.legend_bounds(),
                    style,
                    context.text_measurer.as_ref(),
                )
            });
        if let Some(legend) = &legend {
            frame.replace_layer(CanvasLayerKind::Legend, legend.primitives());
        }

        let id = context.listeners.allocate_chart_id();
        debug!(
            chart = %id,
            %kind,
            datasets = dataset_count,
            labels = label_count,
            width = viewport.width,
            height = viewport.height,
            text_deferred = frame.text_deferred,
            "chart constructed"
        );

        let mut chart = Self {
            id,
            kind,
            renderer,
            context: context.clone(),
            options,
            marks,
            frame,
            tooltip: Tooltip::new(style),
            legend,
            hovered: None,
            drag: None,
            state: ChartState::Constructed,
        };
        chart.renderer.render(&chart.frame)?;
        chart.state = ChartState::Rendered;
        Ok(chart)
    }

    pub fn bar(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::Bar, renderer, spec, context)
    }

    pub fn stacked_bar(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::StackedBar, renderer, spec, context)
    }

    pub fn line(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::Line, renderer, spec, context)
    }

    pub fn scatter(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::Scatter, renderer, spec, context)
    }

    pub fn pie(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::Pie, renderer, spec, context)
    }

    pub fn radar(renderer: R, spec: ChartSpec, context: &ChartContext) -> ChartResult<Self> {
        Self::new(ChartKind::Radar, renderer, spec, context)
    }

    #[must_use]
    pub fn id(&self) -> ChartId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    /// Whether input is still processed: rendered, not disposed, and the
    /// surface is still attached.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state == ChartState::Rendered && self.renderer.is_attached()
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn marks(&self) -> &dyn MarkRenderer {
        self.marks.as_ref()
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    #[must_use]
    pub fn legend(&self) -> Option<&LegendLayout> {
        self.legend.as_ref()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<MarkHit> {
        self.hovered
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else if self.hovered.is_some() {
            InteractionMode::Hovering
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.marks.plot()
    }

    /// Guard used by every input entry point.
    pub(crate) fn accepts_input(&self, event: &'static str) -> bool {
        if self.is_live() {
            return true;
        }
        debug!(
            chart = %self.id,
            event,
            state = ?self.state,
            attached = self.renderer.is_attached(),
            "input ignored, chart not live"
        );
        false
    }
}

fn has_text(text: Option<&str>) -> bool {
    text.is_some_and(|text| !text.is_empty())
}
