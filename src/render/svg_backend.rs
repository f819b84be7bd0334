use std::fmt::Write;

use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DistortionParams, FilterRef, FontFace, FontWeight, LinePrimitive,
    LineStrokeStyle, PathCommand, PathPrimitive, Primitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

/// Serializes frames to standalone SVG markup.
#[derive(Debug)]
pub struct SvgRenderer {
    document: String,
    render_count: usize,
    attached: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: String::new(),
            render_count: 0,
            attached: true,
        }
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Renders one frame to a fresh string without touching renderer state.
    pub fn render_to_string(frame: &RenderFrame) -> ChartResult<String> {
        frame.validate()?;
        let mut out = String::with_capacity(4096);
        write_frame(&mut out, frame).map_err(map_fmt_error)?;
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.document = Self::render_to_string(frame)?;
        self.render_count += 1;
        debug!(
            bytes = self.document.len(),
            primitives = frame.primitive_count(),
            "svg frame rendered"
        );
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

fn map_fmt_error(err: std::fmt::Error) -> ChartError {
    ChartError::Backend(format!("failed to write svg: {err}"))
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
#[must_use]
pub fn format_svg_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

fn num(value: f64) -> String {
    format_svg_number(value)
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn write_frame(out: &mut String, frame: &RenderFrame) -> std::fmt::Result {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{}">"#,
        escape_xml(&frame.font_family)
    )?;

    if frame.distortion.is_some() || frame.font_face.is_some() {
        out.push_str("<defs>\n");
        if let Some(face) = &frame.font_face {
            write_font_face(out, face)?;
        }
        if let Some(params) = frame.distortion {
            write_filter(out, FilterRef::Xkcdify, params)?;
            write_filter(out, FilterRef::XkcdifyPie, params)?;
        }
        out.push_str("</defs>\n");
    }

    writeln!(
        out,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
        frame.background.to_css()
    )?;

    for layer in frame.layers.iter().filter(|layer| layer.visible) {
        if layer.primitives.is_empty() {
            continue;
        }
        writeln!(out, r#"<g class="{}">"#, layer_class(layer.kind))?;
        for primitive in &layer.primitives {
            match primitive {
                Primitive::Line(line) => write_line(out, line)?,
                Primitive::Rect(rect) => write_rect(out, rect)?,
                Primitive::Circle(circle) => write_circle(out, circle)?,
                Primitive::Path(path) => write_path(out, path)?,
                Primitive::Text(text) => {
                    if frame.text_deferred {
                        trace!(text = %text.text, "text withheld until font is ready");
                        continue;
                    }
                    write_text(out, text)?;
                }
            }
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    Ok(())
}

fn layer_class(kind: crate::render::CanvasLayerKind) -> &'static str {
    use crate::render::CanvasLayerKind as Kind;
    match kind {
        Kind::Background => "background",
        Kind::Labels => "labels",
        Kind::Grid => "grid",
        Kind::Axis => "axis",
        Kind::Series => "series",
        Kind::Guide => "guide",
        Kind::Selection => "selection",
        Kind::Legend => "legend",
        Kind::Tooltip => "tooltip",
    }
}

fn write_font_face(out: &mut String, face: &FontFace) -> std::fmt::Result {
    writeln!(
        out,
        r#"<style>@font-face {{ font-family: "{}"; src: url("{}") format("truetype"); }}</style>"#,
        escape_xml(&face.family),
        escape_xml(&face.source_url)
    )
}

fn write_filter(out: &mut String, filter: FilterRef, params: DistortionParams) -> std::fmt::Result {
    match filter {
        FilterRef::Xkcdify => write!(
            out,
            r#"<filter id="{}" filterUnits="userSpaceOnUse" x="-5" y="-5" width="100%" height="100%">"#,
            filter.id()
        )?,
        FilterRef::XkcdifyPie => write!(out, r#"<filter id="{}">"#, filter.id())?,
    }
    writeln!(
        out,
        r#"<feTurbulence type="fractalNoise" baseFrequency="{}" result="noise"/><feDisplacementMap scale="{}" xChannelSelector="R" yChannelSelector="G" in="SourceGraphic" in2="noise"/></filter>"#,
        num(params.base_frequency),
        num(params.scale)
    )
}

fn filter_attr(filter: Option<FilterRef>) -> String {
    filter.map_or_else(String::new, |filter| format!(r#" filter="{}""#, filter.url()))
}

fn dash_attr(style: LineStrokeStyle) -> String {
    match style {
        LineStrokeStyle::Solid => String::new(),
        LineStrokeStyle::Dashed { dash, gap } => {
            format!(r#" stroke-dasharray="{},{}""#, num(dash), num(gap))
        }
    }
}

fn paint(color: Option<Color>) -> String {
    color.map_or_else(|| "none".to_owned(), Color::to_css)
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}{}/>"#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        line.color.to_css(),
        num(line.stroke_width),
        dash_attr(line.stroke_style),
        filter_attr(line.filter)
    )
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height)
    )?;
    if rect.corner_radius > 0.0 {
        write!(out, r#" rx="{}""#, num(rect.corner_radius))?;
    }
    write!(out, r#" fill="{}""#, paint(rect.fill_color))?;
    if rect.fill_color.is_some() && rect.fill_opacity < 1.0 {
        write!(out, r#" fill-opacity="{}""#, num(rect.fill_opacity))?;
    }
    if let Some(border) = rect.border_color.filter(|_| rect.border_width > 0.0) {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            border.to_css(),
            num(rect.border_width)
        )?;
    }
    writeln!(
        out,
        "{}{}/>",
        dash_attr(rect.stroke_style),
        filter_attr(rect.filter)
    )
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
        num(circle.cx),
        num(circle.cy),
        num(circle.radius),
        paint(circle.fill_color)
    )?;
    if let Some(border) = circle.border_color.filter(|_| circle.border_width > 0.0) {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            border.to_css(),
            num(circle.border_width)
        )?;
    }
    writeln!(out, "{}/>", filter_attr(circle.filter))
}

/// SVG path data for a command list.
fn path_data(commands: &[PathCommand]) -> String {
    let mut data = String::new();
    for command in commands {
        if !data.is_empty() {
            data.push(' ');
        }
        match *command {
            PathCommand::MoveTo { x, y } => {
                let _ = write!(data, "M{},{}", num(x), num(y));
            }
            PathCommand::LineTo { x, y } => {
                let _ = write!(data, "L{},{}", num(x), num(y));
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let _ = write!(
                    data,
                    "C{},{},{},{},{},{}",
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2),
                    num(x),
                    num(y)
                );
            }
            PathCommand::ArcTo {
                rx,
                ry,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let _ = write!(
                    data,
                    "A{},{},0,{},{},{},{}",
                    num(rx),
                    num(ry),
                    u8::from(large_arc),
                    u8::from(sweep),
                    num(x),
                    num(y)
                );
            }
            PathCommand::Close => data.push('Z'),
        }
    }
    data
}

fn write_path(out: &mut String, path: &PathPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<path d="{}" fill="{}""#,
        path_data(&path.commands),
        paint(path.fill_color)
    )?;
    if path.fill_color.is_some() && path.fill_opacity < 1.0 {
        write!(out, r#" fill-opacity="{}""#, num(path.fill_opacity))?;
    }
    if let Some(stroke) = path.stroke_color.filter(|_| path.stroke_width > 0.0) {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.to_css(),
            num(path.stroke_width)
        )?;
    }
    writeln!(
        out,
        "{}{}/>",
        dash_attr(path.stroke_style),
        filter_attr(path.filter)
    )
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}""#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        text.color.to_css()
    )?;
    if text.weight == FontWeight::Bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if text.dy_em != 0.0 {
        write!(out, r#" dy="{}em""#, num(text.dy_em))?;
    }
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(text.rotation_deg),
            num(text.x),
            num(text.y)
        )?;
    }
    writeln!(out, ">{}</text>", escape_xml(&text.text))
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, format_svg_number, path_data};
    use crate::render::PathCommand;

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_svg_number(12.0), "12");
        assert_eq!(format_svg_number(0.1 + 0.2), "0.3");
        assert_eq!(format_svg_number(-0.0), "0");
        assert_eq!(format_svg_number(2.125), "2.125");
        assert_eq!(format_svg_number(f64::NAN), "0");
    }

    #[test]
    fn path_data_uses_absolute_commands() {
        let data = path_data(&[
            PathCommand::MoveTo { x: 0.0, y: 1.5 },
            PathCommand::LineTo { x: 10.0, y: 1.5 },
            PathCommand::Close,
        ]);
        assert_eq!(data, "M0,1.5 L10,1.5 Z");
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
