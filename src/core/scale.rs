use crate::core::ticks::nice_ticks;

/// Continuous `domain -> range` mapping used by value axes and radial radii.
///
/// Construction never fails: non-finite bounds collapse to `0`, and a
/// degenerate domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: finite_or_zero(domain.0),
            domain_end: finite_or_zero(domain.1),
            range_start: finite_or_zero(range.0),
            range_end: finite_or_zero(range.1),
        }
    }

    /// Domain spanning the actual minimum and maximum of `values`.
    #[must_use]
    pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let domain = extent(values).unwrap_or((0.0, 0.0));
        Self::new(domain, range)
    }

    /// Domain `[0, max(values)]`, used by bar value axes.
    #[must_use]
    pub fn zero_based(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let max = extent(values).map_or(0.0, |(_, max)| max);
        Self::new((0.0, max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Inverse of [`LinearScale::map`]. A degenerate domain inverts to its
    /// single value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 || self.is_degenerate() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain_start, self.domain_end, count)
    }
}

/// Minimum and maximum of the finite values, if any.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, extent};

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new((4.0, 4.0), (300.0, 0.0));
        assert_eq!(scale.map(4.0), 150.0);
        assert_eq!(scale.map(100.0), 150.0);
        assert_eq!(scale.invert(10.0), 4.0);
    }

    #[test]
    fn empty_values_clamp_to_zero_domain() {
        assert_eq!(extent(Vec::<f64>::new()), None);
        let scale = LinearScale::zero_based(Vec::new(), (100.0, 0.0));
        assert_eq!(scale.domain(), (0.0, 0.0));
        let scale = LinearScale::from_extent([f64::NAN], (100.0, 0.0));
        assert_eq!(scale.domain(), (0.0, 0.0));
    }
}
