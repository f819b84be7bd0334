use crate::core::Bounds;
use crate::render::{FontWeight, TextHAlign};

/// Extent of a run of text: advance width plus ascent/descent around the
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtent {
    #[must_use]
    pub fn height(self) -> f64 {
        self.ascent + self.descent
    }

    /// Bounding box of text anchored at `(x, baseline)` with `align`.
    #[must_use]
    pub fn bounds_at(self, x: f64, baseline: f64, align: TextHAlign) -> Bounds {
        let left = match align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - self.width / 2.0,
            TextHAlign::Right => x - self.width,
        };
        Bounds::new(left, baseline - self.ascent, self.width, self.height())
    }
}

/// Measures rendered text without a layout engine.
///
/// Hosts with real font metrics (a browser, pango) can plug in their own.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, weight: FontWeight) -> TextExtent;
}

/// Fixed-advance approximation of a proportional font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    /// Average glyph advance in ems.
    pub average_advance_em: f64,
    /// Extra advance applied to bold text.
    pub bold_factor: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            average_advance_em: 0.5,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, weight: FontWeight) -> TextExtent {
        let glyphs = text.chars().count() as f64;
        let factor = match weight {
            FontWeight::Normal => 1.0,
            FontWeight::Bold => self.bold_factor,
        };
        TextExtent {
            width: glyphs * font_size_px * self.average_advance_em * factor,
            ascent: font_size_px * 0.8,
            descent: font_size_px * 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeuristicTextMeasurer, TextMeasurer};
    use crate::render::{FontWeight, TextHAlign};

    #[test]
    fn heuristic_width_scales_with_length_and_size() {
        let measurer = HeuristicTextMeasurer::default();
        let extent = measurer.measure("abcd", 10.0, FontWeight::Normal);
        assert_eq!(extent.width, 20.0);
        assert_eq!(extent.height(), 10.0);
        let bounds = extent.bounds_at(30.0, 50.0, TextHAlign::Right);
        assert_eq!(bounds.x, 10.0);
        assert_eq!(bounds.y, 42.0);
    }
}
