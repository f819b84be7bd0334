use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::kind::ChartKind;
use crate::core::options::Options;
use crate::core::ticks::format_number;
use crate::core::time_scale::parse_timestamp_ms;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Horizontal coordinate of a scatter point: a number, or a timestamp string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl XValue {
    /// Numeric position on a linear axis; unparseable text is `NaN`.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            XValue::Number(value) => *value,
            XValue::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Epoch milliseconds on a time axis.
    #[must_use]
    pub fn as_time_ms(&self) -> f64 {
        match self {
            XValue::Number(value) => *value,
            XValue::Text(text) => parse_timestamp_ms(text).unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(value) => f.write_str(&format_number(*value)),
            XValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        XValue::Number(value)
    }
}

impl From<&str> for XValue {
    fn from(value: &str) -> Self {
        XValue::Text(value.to_owned())
    }
}

/// One datum: a bare number, or an `{x, y}` pair for scatter charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Point { x: XValue, y: f64 },
}

impl Value {
    #[must_use]
    pub fn point(x: impl Into<XValue>, y: f64) -> Self {
        Value::Point { x: x.into(), y }
    }

    /// The plotted magnitude: the number itself, or `y` of a pair.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(value) => *value,
            Value::Point { y, .. } => *y,
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<(&XValue, f64)> {
        match self {
            Value::Number(_) => None,
            Value::Point { x, y } => Some((x, *y)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: impl IntoIterator<Item = f64>) -> Self {
        Self {
            label: Some(label.into()),
            color: None,
            data: data.into_iter().map(Value::Number).collect(),
        }
    }

    #[must_use]
    pub fn unlabeled(data: impl IntoIterator<Item = f64>) -> Self {
        Self {
            label: None,
            color: None,
            data: data.into_iter().map(Value::Number).collect(),
        }
    }

    #[must_use]
    pub fn points(label: impl Into<String>, points: impl IntoIterator<Item = Value>) -> Self {
        Self {
            label: Some(label.into()),
            color: None,
            data: points.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Display label, empty when the dataset has none.
    #[must_use]
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Value at `index`, `NaN` past the end.
    #[must_use]
    pub fn value_at(&self, index: usize) -> f64 {
        self.data.get(index).map_or(f64::NAN, Value::as_number)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(Value::as_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default)]
    pub options: Options,
}

impl ChartSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> ChartResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.data.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.data.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.data.datasets
    }

    /// Label at `index`, empty past the end.
    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        self.data.labels.get(index).map_or("", String::as_str)
    }

    /// Strict shape check for hosts that want to reject malformed input.
    ///
    /// Charts never call this themselves; they draw whatever they are given.
    pub fn validate(&self, kind: ChartKind) -> ChartResult<()> {
        let datasets = self.datasets();
        if datasets.is_empty() {
            return Err(ChartError::InvalidSpec(format!(
                "{kind}: datasets must be a non-empty list"
            )));
        }

        if kind == ChartKind::Scatter {
            for (dataset_index, dataset) in datasets.iter().enumerate() {
                if let Some(point_index) = dataset.data.iter().position(|v| v.as_point().is_none())
                {
                    return Err(ChartError::InvalidSpec(format!(
                        "{kind}: datasets[{dataset_index}].data[{point_index}] must be an {{x, y}} point"
                    )));
                }
            }
            return Ok(());
        }

        let labels = self.labels().len();
        for (index, dataset) in datasets.iter().enumerate() {
            if dataset.data.len() != labels {
                return Err(ChartError::InvalidSpec(format!(
                    "{kind}: datasets[{index}] has {} values but there are {labels} labels",
                    dataset.data.len()
                )));
            }
        }
        Ok(())
    }
}
