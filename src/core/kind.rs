use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Closed set of chart types the engine can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    StackedBar,
    Line,
    Scatter,
    Pie,
    Radar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::StackedBar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Radar,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::StackedBar => "StackedBar",
            ChartKind::Line => "Line",
            ChartKind::Scatter => "Scatter",
            ChartKind::Pie => "Pie",
            ChartKind::Radar => "Radar",
        }
    }

    /// Whether the chart draws x/y axes and uses four-sided margins.
    #[must_use]
    pub const fn has_axes(self) -> bool {
        !self.is_radial()
    }

    #[must_use]
    pub const fn is_radial(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Radar)
    }

    /// Bar and Pie color one slot per label instead of one per dataset.
    #[must_use]
    pub const fn colors_per_label(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ChartError::UnknownChartKind(value.to_owned()))
    }
}
