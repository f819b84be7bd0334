use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, FontWeight, LinePrimitive, LineStrokeStyle, PathCommand,
    PathPrimitive, Primitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo raster backend.
///
/// Displacement filters have no Cairo equivalent; shapes are drawn clean.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last rendered surface as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background, 1.0);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in frame.primitives() {
            match primitive {
                Primitive::Line(line) => {
                    draw_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    draw_rect(context, rect)?;
                    stats.rects_drawn += 1;
                }
                Primitive::Circle(circle) => {
                    draw_circle(context, circle)?;
                    stats.circles_drawn += 1;
                }
                Primitive::Path(path) => {
                    draw_path(context, path)?;
                    stats.paths_drawn += 1;
                }
                Primitive::Text(text) => {
                    if frame.text_deferred {
                        continue;
                    }
                    draw_text(context, &frame.font_family, text)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        trace!(?stats, "cairo frame rendered");
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn apply_dash(context: &Context, style: LineStrokeStyle) {
    match style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed { dash, gap } => context.set_dash(&[dash, gap], 0.0),
    }
}

fn fill_and_stroke(
    context: &Context,
    fill: Option<Color>,
    fill_opacity: f64,
    stroke: Option<Color>,
    stroke_width: f64,
    style: LineStrokeStyle,
) -> ChartResult<()> {
    if let Some(fill) = fill {
        apply_color(context, fill, fill_opacity);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill shape", err))?;
    }
    if let Some(stroke) = stroke.filter(|_| stroke_width > 0.0) {
        apply_color(context, stroke, 1.0);
        context.set_line_width(stroke_width);
        apply_dash(context, style);
        context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke shape", err))?;
        apply_dash(context, LineStrokeStyle::Solid);
    }
    context.new_path();
    Ok(())
}

fn draw_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color, 1.0);
    context.set_line_width(line.stroke_width);
    apply_dash(context, line.stroke_style);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))?;
    apply_dash(context, LineStrokeStyle::Solid);
    Ok(())
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    fill_and_stroke(
        context,
        rect.fill_color,
        rect.fill_opacity,
        rect.border_color,
        rect.border_width,
        rect.stroke_style,
    )
}

fn draw_circle(context: &Context, circle: &CirclePrimitive) -> ChartResult<()> {
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
    fill_and_stroke(
        context,
        circle.fill_color,
        1.0,
        circle.border_color,
        circle.border_width,
        LineStrokeStyle::Solid,
    )
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    let mut current = (0.0, 0.0);
    for command in &path.commands {
        match *command {
            PathCommand::MoveTo { x, y } => context.move_to(x, y),
            PathCommand::LineTo { x, y } => context.line_to(x, y),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => context.curve_to(x1, y1, x2, y2, x, y),
            PathCommand::ArcTo {
                rx,
                large_arc,
                sweep,
                x,
                y,
                ..
            } => append_circular_arc(context, current, (x, y), rx, large_arc, sweep),
            PathCommand::Close => context.close_path(),
        }
        if let Some(end) = command.end_point() {
            current = (end.x, end.y);
        }
    }
    fill_and_stroke(
        context,
        path.fill_color,
        path.fill_opacity,
        path.stroke_color,
        path.stroke_width,
        path.stroke_style,
    )
}

/// Converts an SVG endpoint arc with equal radii to a Cairo center arc.
fn append_circular_arc(
    context: &Context,
    from: (f64, f64),
    to: (f64, f64),
    radius: f64,
    large_arc: bool,
    sweep: bool,
) {
    let half_dx = (from.0 - to.0) / 2.0;
    let half_dy = (from.1 - to.1) / 2.0;
    let half_chord_sq = half_dx * half_dx + half_dy * half_dy;
    if half_chord_sq == 0.0 || radius <= 0.0 {
        context.line_to(to.0, to.1);
        return;
    }
    let radius = radius.max(half_chord_sq.sqrt());
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coefficient = sign * ((radius * radius - half_chord_sq).max(0.0) / half_chord_sq).sqrt();
    let cx = coefficient * half_dy + (from.0 + to.0) / 2.0;
    let cy = -coefficient * half_dx + (from.1 + to.1) / 2.0;
    let start = (from.1 - cy).atan2(from.0 - cx);
    let end = (to.1 - cy).atan2(to.0 - cx);
    if sweep {
        context.arc(cx, cy, radius, start, end);
    } else {
        context.arc_negative(cx, cy, radius, start, end);
    }
}

fn draw_text(context: &Context, family: &str, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let weight = match text.weight {
        FontWeight::Normal => "",
        FontWeight::Bold => " Bold",
    };
    let font_description =
        FontDescription::from_string(&format!("{family}{weight} {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.x, text.y);
    if text.rotation_deg != 0.0 {
        context.rotate(text.rotation_deg.to_radians());
    }
    apply_color(context, text.color, 1.0);
    context.move_to(offset_x, text.dy_em * text.font_size_px - baseline);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn append_rect_path(context: &Context, rect: &RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
