use ordered_float::OrderedFloat;

/// Padding fraction between and around bands.
pub const BAND_PADDING: f64 = 0.4;

/// Categorical scale giving each label an equal-width band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Centered bands with the same fraction used for inner and outer padding.
    #[must_use]
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    /// Leading edge of band `index`.
    #[must_use]
    pub fn position(self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    #[must_use]
    pub fn center(self, index: usize) -> f64 {
        self.position(index) + self.bandwidth / 2.0
    }
}

/// Categorical scale placing labels at evenly spaced points, no padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    start: f64,
    step: f64,
}

impl PointScale {
    #[must_use]
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - 1.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - 1.0).max(0.0)) * 0.5;
        Self { count, start, step }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn position(self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    #[must_use]
    pub fn positions(self) -> Vec<f64> {
        (0..self.count).map(|index| self.position(index)).collect()
    }

    #[must_use]
    pub fn nearest_index(self, pixel: f64) -> Option<usize> {
        nearest_index(&self.positions(), pixel)
    }
}

/// Index of the position closest to `pixel`; ties resolve to the first match.
#[must_use]
pub fn nearest_index(positions: &[f64], pixel: f64) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .min_by_key(|(_, position)| OrderedFloat((*position - pixel).abs()))
        .map(|(index, _)| index)
}
