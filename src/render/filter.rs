use serde::{Deserialize, Serialize};

/// Font family substituted when the hand-drawn style is switched off.
pub const FALLBACK_FONT_FAMILY: &str = "Arial, sans-serif";

/// Reference to one of the two distortion filters a frame may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterRef {
    /// Bounded to the drawing's user space; used by axes, overlays and
    /// axis-chart marks.
    Xkcdify,
    /// Default filter region; used by pie slices and radar shapes.
    XkcdifyPie,
}

impl FilterRef {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            FilterRef::Xkcdify => "xkcdify",
            FilterRef::XkcdifyPie => "xkcdify-pie",
        }
    }

    #[must_use]
    pub fn url(self) -> String {
        format!("url(#{})", self.id())
    }
}

/// Noise parameters of the displacement filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionParams {
    pub base_frequency: f64,
    pub scale: f64,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.05,
            scale: 5.0,
        }
    }
}

/// Hands out filter references for a chart; every shape-drawing path asks
/// this instead of deciding on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistortionFilter {
    enabled: bool,
    radial: bool,
}

impl DistortionFilter {
    #[must_use]
    pub const fn new(unxkcdify: bool, radial: bool) -> Self {
        Self {
            enabled: !unxkcdify,
            radial,
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Filter for data marks (bars, lines, dots, slices).
    #[must_use]
    pub const fn marks(self) -> Option<FilterRef> {
        if !self.enabled {
            None
        } else if self.radial {
            Some(FilterRef::XkcdifyPie)
        } else {
            Some(FilterRef::Xkcdify)
        }
    }

    /// Filter for axes, tooltip and legend chrome.
    #[must_use]
    pub const fn chrome(self) -> Option<FilterRef> {
        if self.enabled {
            Some(FilterRef::Xkcdify)
        } else {
            None
        }
    }

    /// Filter definitions a frame must carry, if any.
    #[must_use]
    pub fn params(self) -> Option<DistortionParams> {
        self.enabled.then(DistortionParams::default)
    }
}
