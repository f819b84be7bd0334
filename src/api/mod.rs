mod axis;
mod bar_marks;
mod bridge;
mod chart;
mod chart_interaction;
mod context;
mod document;
mod labels;
mod legend;
mod line_marks;
mod mark_renderer;
mod overlay;
mod pie_marks;
mod radar_marks;
mod scatter_marks;
mod stacked_bar_marks;
mod tooltip;

pub use axis::{
    AxisStyle, AxisTick, ROOT_STROKE_WIDTH, TICK_FONT_SIZE, bottom_axis, category_ticks,
    left_axis, linear_ticks, time_ticks, value_ticks,
};
pub use bar_marks::{BAR_CORNER_RADIUS, BAR_STROKE_WIDTH, BarMarks};
pub use bridge::{
    DEFAULT_WIDGET_HEIGHT, DEFAULT_WIDGET_WIDTH, HostModel, SELECTION_KEY, WidgetSession,
    selection_writer,
};
pub use chart::{Chart, ChartState};
pub use context::ChartContext;
pub use document::{DocumentFormat, render_html_document, render_svg_document, write_document};
pub use labels::{LABEL_FONT_SIZE, TITLE_FONT_SIZE, chart_labels};
pub use legend::{LEGEND_BACKGROUND_OPACITY, LegendLayout, LegendPlacement, RADIAL_LEGEND_OFFSET_Y};
pub use line_marks::{GUIDE_COLOR, GUIDE_DASH, GUIDE_STROKE_WIDTH, HOVER_DOT_RADIUS, LineMarks};
pub use mark_renderer::{HoverFeedback, MarkRenderer, MarkSetup, build_mark_renderer};
pub use overlay::{
    BACKGROUND_CORNER_RADIUS, BACKGROUND_STROKE_WIDTH, ITEM_TEXT_OFFSET, ITEM_X_OFFSET,
    OVERLAY_FONT_SIZE, OverlayStyle, ROW_HEIGHT, SWATCH_CORNER_RADIUS, SWATCH_SIZE, SwatchItem,
};
pub use pie_marks::{HOVER_FILL_OPACITY, PIE_STROKE_WIDTH, PieMarks};
pub use radar_marks::{AREA_FILL_OPACITY, GRID_STROKE_WIDTH, LABEL_GAP, RadarMarks};
pub use scatter_marks::{DOT_HOVER_RADIUS, DOT_RADIUS, ScatterMarks, ScatterXScale};
pub use stacked_bar_marks::StackedBarMarks;
pub use tooltip::{
    SCATTER_TOOLTIP_OFFSET, TOOLTIP_BACKGROUND_OPACITY, TOOLTIP_MOUSE_OFFSET, Tooltip,
    TooltipPosition, TooltipState, TooltipUpdate,
};
