use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::core::dataset::{ChartSpec, Dataset};
use crate::core::kind::ChartKind;
use crate::core::quadrant::Quadrant;
use crate::interaction::SelectionPayload;
use crate::render::{Color, FALLBACK_FONT_FAMILY};

/// Hand-drawn font family requested when no override is given.
pub const DEFAULT_FONT_FAMILY: &str = "xkcd";
pub const DEFAULT_TICK_COUNT: usize = 3;

/// Palette cycled through when datasets carry no explicit color.
pub const DEFAULT_PALETTE: [Color; 9] = [
    Color::from_rgb8(0xdd, 0x45, 0x28),
    Color::from_rgb8(0x28, 0xa3, 0xdd),
    Color::from_rgb8(0xf3, 0xdb, 0x52),
    Color::from_rgb8(0xed, 0x84, 0xb5),
    Color::from_rgb8(0x4a, 0xb7, 0x4e),
    Color::from_rgb8(0x91, 0x79, 0xc0),
    Color::from_rgb8(0x8e, 0x6d, 0x5a),
    Color::from_rgb8(0xf1, 0x98, 0x39),
    Color::from_rgb8(0x94, 0x94, 0x94),
];

/// Selection callback: `(payload, additive)`.
#[derive(Clone)]
pub struct SelectHandler(Rc<dyn Fn(&SelectionPayload, bool)>);

impl SelectHandler {
    pub fn new(handler: impl Fn(&SelectionPayload, bool) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, payload: &SelectionPayload, additive: bool) {
        (self.0)(payload, additive);
    }
}

impl fmt::Debug for SelectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectHandler(..)")
    }
}

impl PartialEq for SelectHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Caller-facing option record; every field is optional.
///
/// Unknown keys survive deserialization in `extra` and are never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unxkcdify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_colors: Option<Vec<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(
        deserialize_with = "deserialize_legend_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub legend_position: Option<Quadrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_tick_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_tick_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks_count: Option<usize>,
    #[serde(skip)]
    pub on_select: Option<SelectHandler>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unxkcdify(mut self, unxkcdify: bool) -> Self {
        self.unxkcdify = Some(unxkcdify);
        self
    }

    #[must_use]
    pub fn with_data_colors(mut self, colors: Vec<Color>) -> Self {
        self.data_colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = Some(show);
        self
    }

    #[must_use]
    pub fn with_legend_position(mut self, position: Quadrant) -> Self {
        self.legend_position = Some(position);
        self
    }

    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    #[must_use]
    pub fn with_dot_size(mut self, dot_size: f64) -> Self {
        self.dot_size = Some(dot_size);
        self
    }

    #[must_use]
    pub fn with_show_line(mut self, show: bool) -> Self {
        self.show_line = Some(show);
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_show_labels(mut self, show: bool) -> Self {
        self.show_labels = Some(show);
        self
    }

    #[must_use]
    pub fn with_ticks_count(mut self, count: usize) -> Self {
        self.ticks_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_on_select(mut self, handler: SelectHandler) -> Self {
        self.on_select = Some(handler);
        self
    }

    /// Field-wise merge where values set in `higher` win.
    #[must_use]
    pub fn overlay(&self, higher: &Options) -> Options {
        let mut extra = self.extra.clone();
        for (key, value) in &higher.extra {
            extra.insert(key.clone(), value.clone());
        }
        Options {
            unxkcdify: higher.unxkcdify.or(self.unxkcdify),
            data_colors: higher.data_colors.clone().or_else(|| self.data_colors.clone()),
            font_family: higher.font_family.clone().or_else(|| self.font_family.clone()),
            stroke_color: higher.stroke_color.or(self.stroke_color),
            background_color: higher.background_color.or(self.background_color),
            show_legend: higher.show_legend.or(self.show_legend),
            legend_position: higher.legend_position.or(self.legend_position),
            x_tick_count: higher.x_tick_count.or(self.x_tick_count),
            y_tick_count: higher.y_tick_count.or(self.y_tick_count),
            inner_radius: higher.inner_radius.or(self.inner_radius),
            dot_size: higher.dot_size.or(self.dot_size),
            show_line: higher.show_line.or(self.show_line),
            time_format: higher.time_format.clone().or_else(|| self.time_format.clone()),
            show_labels: higher.show_labels.or(self.show_labels),
            ticks_count: higher.ticks_count.or(self.ticks_count),
            on_select: higher.on_select.clone().or_else(|| self.on_select.clone()),
            extra,
        }
    }
}

fn deserialize_legend_position<'de, D>(deserializer: D) -> Result<Option<Quadrant>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &raw {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(number) => number.as_i64().and_then(Quadrant::from_code),
        serde_json::Value::String(name) => Quadrant::from_name(name),
        _ => None,
    };
    Ok(Some(parsed.unwrap_or_else(|| {
        warn!(value = %raw, "unrecognized legend position, falling back to upLeft");
        Quadrant::UpLeft
    })))
}

/// Fully resolved configuration, every field populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub unxkcdify: bool,
    /// One color per slot (dataset or label, depending on chart kind).
    pub data_colors: Vec<Color>,
    pub font_family: String,
    pub stroke_color: Color,
    pub background_color: Color,
    pub show_legend: bool,
    pub legend_position: Quadrant,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub inner_radius: f64,
    pub dot_size: f64,
    pub show_line: bool,
    pub time_format: Option<String>,
    pub show_labels: bool,
    pub ticks_count: usize,
    pub on_select: Option<SelectHandler>,
    pub extra: IndexMap<String, serde_json::Value>,
    palette: Vec<Color>,
}

impl ResolvedOptions {
    /// Color for slot `index`; slots past the resolved list keep cycling the palette.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        if let Some(color) = self.data_colors.get(index) {
            return *color;
        }
        if self.palette.is_empty() {
            return self.stroke_color;
        }
        self.palette[index % self.palette.len()]
    }
}

/// Built-in defaults shared by every chart kind.
#[must_use]
pub fn global_defaults() -> Options {
    Options {
        unxkcdify: Some(false),
        data_colors: Some(DEFAULT_PALETTE.to_vec()),
        font_family: Some(DEFAULT_FONT_FAMILY.to_owned()),
        stroke_color: Some(Color::BLACK),
        background_color: Some(Color::WHITE),
        show_legend: Some(false),
        legend_position: Some(Quadrant::UpLeft),
        x_tick_count: Some(DEFAULT_TICK_COUNT),
        y_tick_count: Some(DEFAULT_TICK_COUNT),
        dot_size: Some(1.0),
        show_line: Some(false),
        ..Options::default()
    }
}

/// Defaults specific to one chart kind, layered above [`global_defaults`].
#[must_use]
pub fn chart_defaults(kind: ChartKind) -> Options {
    let options = Options::new();
    match kind {
        ChartKind::Bar => Options {
            y_tick_count: Some(DEFAULT_TICK_COUNT),
            ..options
        },
        ChartKind::StackedBar | ChartKind::Line => Options {
            y_tick_count: Some(DEFAULT_TICK_COUNT),
            legend_position: Some(Quadrant::UpLeft),
            show_legend: Some(true),
            ..options
        },
        ChartKind::Scatter => Options {
            dot_size: Some(1.0),
            show_line: Some(false),
            x_tick_count: Some(DEFAULT_TICK_COUNT),
            y_tick_count: Some(DEFAULT_TICK_COUNT),
            show_legend: Some(true),
            ..options
        },
        ChartKind::Pie => Options {
            inner_radius: Some(0.5),
            show_legend: Some(true),
            ..options
        },
        ChartKind::Radar => Options {
            show_labels: Some(false),
            ticks_count: Some(DEFAULT_TICK_COUNT),
            show_legend: Some(false),
            dot_size: Some(1.0),
            ..options
        },
    }
}

/// Explicit per-slot colors for `kind`: dataset colors for per-dataset
/// kinds, all `None` for per-label kinds.
#[must_use]
pub fn color_slots(kind: ChartKind, spec: &ChartSpec) -> Vec<Option<Color>> {
    if kind.colors_per_label() {
        vec![None; spec.labels().len()]
    } else {
        spec.datasets().iter().map(|dataset: &Dataset| dataset.color).collect()
    }
}

/// Merges global defaults, chart defaults and user options (lowest to
/// highest precedence), then resolves one color per slot.
#[must_use]
pub fn resolve(
    chart_defaults: &Options,
    global_defaults: &Options,
    slots: &[Option<Color>],
    user: &Options,
) -> ResolvedOptions {
    let merged = global_defaults.overlay(chart_defaults).overlay(user);

    let palette = match merged.data_colors {
        Some(colors) if !colors.is_empty() => colors,
        Some(_) => {
            warn!("empty dataColors palette, using the default palette");
            DEFAULT_PALETTE.to_vec()
        }
        None => DEFAULT_PALETTE.to_vec(),
    };
    let data_colors = slots
        .iter()
        .enumerate()
        .map(|(index, explicit)| explicit.unwrap_or(palette[index % palette.len()]))
        .collect();

    let unxkcdify = merged.unxkcdify.unwrap_or(false);
    let font_family = if unxkcdify {
        FALLBACK_FONT_FAMILY.to_owned()
    } else {
        merged
            .font_family
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned())
    };
    let inner_radius = merged
        .inner_radius
        .filter(|radius| radius.is_finite())
        .map_or(0.5, |radius| radius.clamp(0.0, 1.0));
    let dot_size = merged
        .dot_size
        .filter(|size| size.is_finite() && *size >= 0.0)
        .unwrap_or(1.0);

    ResolvedOptions {
        unxkcdify,
        data_colors,
        font_family,
        stroke_color: merged.stroke_color.unwrap_or(Color::BLACK),
        background_color: merged.background_color.unwrap_or(Color::WHITE),
        show_legend: merged.show_legend.unwrap_or(false),
        legend_position: merged.legend_position.unwrap_or_default(),
        x_tick_count: merged.x_tick_count.unwrap_or(DEFAULT_TICK_COUNT),
        y_tick_count: merged.y_tick_count.unwrap_or(DEFAULT_TICK_COUNT),
        inner_radius,
        dot_size,
        show_line: merged.show_line.unwrap_or(false),
        time_format: merged.time_format.filter(|format| !format.is_empty()),
        show_labels: merged.show_labels.unwrap_or(false),
        ticks_count: merged.ticks_count.unwrap_or(DEFAULT_TICK_COUNT),
        on_select: merged.on_select,
        extra: merged.extra,
        palette,
    }
}

/// Resolves `spec.options` for a chart of `kind`.
#[must_use]
pub fn resolve_for(kind: ChartKind, spec: &ChartSpec) -> ResolvedOptions {
    let resolved = resolve(
        &chart_defaults(kind),
        &global_defaults(),
        &color_slots(kind, spec),
        &spec.options,
    );
    debug!(
        kind = %kind,
        slots = resolved.data_colors.len(),
        unxkcdify = resolved.unxkcdify,
        show_legend = resolved.show_legend,
        "resolved chart options"
    );
    resolved
}
