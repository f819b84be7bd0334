use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Bounds, Point};
use crate::error::{ChartError, ChartResult};
use crate::render::FilterRef;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = [self.red, self.green, self.blue].map(channel_to_u8);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            let alpha = (self.alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("rgba({red},{green},{blue},{alpha})")
        }
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` and a
    /// small set of named colors.
    pub fn parse_css(text: &str) -> ChartResult<Self> {
        let trimmed = text.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(text));
        }
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let body = body.strip_suffix(')').ok_or_else(|| invalid_color(text))?;
            return parse_functional(body).ok_or_else(|| invalid_color(text));
        }
        named_color(&lower).ok_or_else(|| invalid_color(text))
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn invalid_color(text: &str) -> ChartError {
    ChartError::InvalidData(format!("unrecognized color `{text}`"))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let byte = |hi: u8, lo: u8| f64::from(hi * 16 + lo) / 255.0;
    match digits.as_slice() {
        [r, g, b] => Some(Color::rgb(byte(*r, *r), byte(*g, *g), byte(*b, *b))),
        [r1, r2, g1, g2, b1, b2] => Some(Color::rgb(
            byte(*r1, *r2),
            byte(*g1, *g2),
            byte(*b1, *b2),
        )),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Some(Color::rgba(
            byte(*r1, *r2),
            byte(*g1, *g2),
            byte(*b1, *b2),
            byte(*a1, *a2),
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let channel = |part: &str| -> Option<f64> {
        let value = match part.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => part.parse::<f64>().ok()? / 255.0,
        };
        value.is_finite().then(|| value.clamp(0.0, 1.0))
    };
    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(*r)?, channel(*g)?, channel(*b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().ok().filter(|a| a.is_finite())?;
            Some(Color::rgba(
                channel(*r)?,
                channel(*g)?,
                channel(*b)?,
                alpha.clamp(0.0, 1.0),
            ))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "transparent" => Color::rgba(0.0, 0.0, 0.0, 0.0),
        "red" => Color::from_rgb8(255, 0, 0),
        "green" => Color::from_rgb8(0, 128, 0),
        "blue" => Color::from_rgb8(0, 0, 255),
        "yellow" => Color::from_rgb8(255, 255, 0),
        "orange" => Color::from_rgb8(255, 165, 0),
        "purple" => Color::from_rgb8(128, 0, 128),
        "pink" => Color::from_rgb8(255, 192, 203),
        "brown" => Color::from_rgb8(165, 42, 42),
        "gray" | "grey" => Color::from_rgb8(128, 128, 128),
        "lightgray" | "lightgrey" => Color::from_rgb8(211, 211, 211),
        "darkgray" | "darkgrey" => Color::from_rgb8(169, 169, 169),
        "navy" => Color::from_rgb8(0, 0, 128),
        "teal" => Color::from_rgb8(0, 128, 128),
        "cyan" | "aqua" => Color::from_rgb8(0, 255, 255),
        "magenta" | "fuchsia" => Color::from_rgb8(255, 0, 255),
        "lime" => Color::from_rgb8(0, 255, 0),
        "maroon" => Color::from_rgb8(128, 0, 0),
        "olive" => Color::from_rgb8(128, 128, 0),
        "silver" => Color::from_rgb8(192, 192, 192),
        _ => return None,
    };
    Some(color)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Color::parse_css(text)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse_css(&text).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStrokeStyle {
    Solid,
    Dashed { dash: f64, gap: f64 },
}

impl LineStrokeStyle {
    fn validate(self) -> ChartResult<()> {
        if let LineStrokeStyle::Dashed { dash, gap } = self {
            if !dash.is_finite() || !gap.is_finite() || dash <= 0.0 || gap < 0.0 {
                return Err(ChartError::InvalidData(
                    "dash pattern must be finite with dash > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
    pub filter: Option<FilterRef>,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<FilterRef>) -> Self {
        self.filter = filter;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke_style.validate()?;
        self.color.validate()
    }
}

/// Axis-aligned rectangle; `fill_color: None` leaves the interior empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Option<Color>,
    pub fill_opacity: f64,
    pub border_color: Option<Color>,
    pub border_width: f64,
    pub corner_radius: f64,
    pub stroke_style: LineStrokeStyle,
    pub filter: Option<FilterRef>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color: None,
            fill_opacity: 1.0,
            border_color: None,
            border_width: 0.0,
            corner_radius: 0.0,
            stroke_style: LineStrokeStyle::Solid,
            filter: None,
        }
    }

    #[must_use]
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }

    #[must_use]
    pub fn with_fill(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_border(mut self, color: Color, width: f64) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<FilterRef>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn bounds(self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity)?;
        self.stroke_style.validate()?;
        validate_optional_color(self.fill_color)?;
        validate_optional_color(self.border_color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: f64,
    pub filter: Option<FilterRef>,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self {
            cx: center.x,
            cy: center.y,
            radius,
            fill_color: None,
            border_color: None,
            border_width: 0.0,
            filter: None,
        }
    }

    /// Filled and stroked with the same color.
    #[must_use]
    pub fn with_color(mut self, color: Color, border_width: f64) -> Self {
        self.fill_color = Some(color);
        self.border_color = Some(color);
        self.border_width = border_width;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<FilterRef>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.cx, self.cy)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_optional_color(self.fill_color)?;
        validate_optional_color(self.border_color)
    }
}

/// One segment of a path outline, absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// Elliptical arc in SVG semantics (`sweep = true` is clockwise on screen).
    ArcTo {
        rx: f64,
        ry: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    /// End point of the command, if it has one.
    #[must_use]
    pub fn end_point(self) -> Option<Point> {
        match self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::CubicTo { x, y, .. }
            | PathCommand::ArcTo { x, y, .. } => Some(Point::new(x, y)),
            PathCommand::Close => None,
        }
    }

    fn is_finite(self) -> bool {
        match self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y].iter().all(|v| v.is_finite()),
            PathCommand::ArcTo { rx, ry, x, y, .. } => {
                [rx, ry, x, y].iter().all(|v| v.is_finite())
            }
            PathCommand::Close => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub fill_color: Option<Color>,
    pub fill_opacity: f64,
    pub stroke_color: Option<Color>,
    pub stroke_width: f64,
    pub stroke_style: LineStrokeStyle,
    pub filter: Option<FilterRef>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill_color: None,
            fill_opacity: 1.0,
            stroke_color: None,
            stroke_width: 0.0,
            stroke_style: LineStrokeStyle::Solid,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, color: Option<Color>, opacity: f64) -> Self {
        self.fill_color = color;
        self.fill_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<FilterRef>) -> Self {
        self.filter = filter;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.commands.iter().all(|command| command.is_finite()) {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "path stroke width must be finite and >= 0".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity)?;
        self.stroke_style.validate()?;
        validate_optional_color(self.fill_color)?;
        validate_optional_color(self.stroke_color)
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Draw command for one label in pixel space.
///
/// `y` is the baseline. `dy_em` shifts the baseline by a multiple of the
/// font size and `rotation_deg` rotates around `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub weight: FontWeight,
    pub rotation_deg: f64,
    pub dy_em: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            weight: FontWeight::Normal,
            rotation_deg: 0.0,
            dy_em: 0.0,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation_deg = degrees;
        self
    }

    #[must_use]
    pub fn with_dy_em(mut self, dy_em: f64) -> Self {
        self.dy_em = dy_em;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.rotation_deg.is_finite()
            || !self.dy_em.is_finite()
        {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Any drawable element of a frame layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Primitive::Line(line) => line.validate(),
            Primitive::Rect(rect) => rect.validate(),
            Primitive::Circle(circle) => circle.validate(),
            Primitive::Path(path) => path.validate(),
            Primitive::Text(text) => text.validate(),
        }
    }

    #[must_use]
    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Primitive::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_circle(&self) -> Option<&CirclePrimitive> {
        match self {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&PathPrimitive> {
        match self {
            Primitive::Path(path) => Some(path),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match self {
            Primitive::Line(line) => Some(line),
            _ => None,
        }
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(line: LinePrimitive) -> Self {
        Primitive::Line(line)
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(rect: RectPrimitive) -> Self {
        Primitive::Rect(rect)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(circle: CirclePrimitive) -> Self {
        Primitive::Circle(circle)
    }
}

impl From<PathPrimitive> for Primitive {
    fn from(path: PathPrimitive) -> Self {
        Primitive::Path(path)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(text: TextPrimitive) -> Self {
        Primitive::Text(text)
    }
}

fn validate_opacity(opacity: f64) -> ChartResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(ChartError::InvalidData(
            "opacity must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

fn validate_optional_color(color: Option<Color>) -> ChartResult<()> {
    color.map_or(Ok(()), Color::validate)
}

#[cfg(test)]
mod tests {
    use super::{Color, RectPrimitive};

    #[test]
    fn css_colors_round_trip_through_hex() {
        let color = Color::parse_css("#dd4528").expect("hex");
        assert_eq!(color.to_css(), "#dd4528");
        assert_eq!(Color::parse_css("#fff").expect("short"), Color::WHITE);
        assert_eq!(Color::parse_css(" Black ").expect("named"), Color::BLACK);
        assert_eq!(
            Color::parse_css("rgba(0, 0, 0, 0.1)").expect("rgba").to_css(),
            "rgba(0,0,0,0.1)"
        );
        assert!(Color::parse_css("#12").is_err());
        assert!(Color::parse_css("sparkly").is_err());
    }

    #[test]
    fn negative_rect_size_is_rejected() {
        assert!(RectPrimitive::new(0.0, 0.0, -1.0, 2.0).validate().is_err());
        assert!(RectPrimitive::new(0.0, 0.0, 0.0, 2.0).validate().is_ok());
    }
}
