use crate::core::dataset::Dataset;

/// Running totals for stacked bars.
///
/// `offset(k, j)` is the sum of datasets `0..k` at category `j`; segment
/// `k` spans `offset(k, j) ..= offset(k, j) + value(k, j)`. Missing or
/// non-finite values stack as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    values: Vec<Vec<f64>>,
    offsets: Vec<Vec<f64>>,
    totals: Vec<f64>,
}

impl StackLayout {
    #[must_use]
    pub fn from_datasets(datasets: &[Dataset], categories: usize) -> Self {
        let values: Vec<Vec<f64>> = datasets
            .iter()
            .map(|dataset| {
                (0..categories)
                    .map(|category| {
                        let value = dataset.value_at(category);
                        if value.is_finite() { value } else { 0.0 }
                    })
                    .collect()
            })
            .collect();
        Self::from_values(values, categories)
    }

    #[must_use]
    pub fn from_values(values: Vec<Vec<f64>>, categories: usize) -> Self {
        let mut running = vec![0.0; categories];
        let mut offsets = Vec::with_capacity(values.len());
        for row in &values {
            offsets.push(running.clone());
            for (category, total) in running.iter_mut().enumerate() {
                *total += row.get(category).copied().unwrap_or(0.0);
            }
        }
        Self {
            values,
            offsets,
            totals: running,
        }
    }

    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn value(&self, dataset: usize, category: usize) -> f64 {
        lookup(&self.values, dataset, category)
    }

    #[must_use]
    pub fn offset(&self, dataset: usize, category: usize) -> f64 {
        lookup(&self.offsets, dataset, category)
    }

    /// `(bottom, top)` of one segment in value units.
    #[must_use]
    pub fn segment(&self, dataset: usize, category: usize) -> (f64, f64) {
        let bottom = self.offset(dataset, category);
        (bottom, bottom + self.value(dataset, category))
    }

    #[must_use]
    pub fn total(&self, category: usize) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }
}

fn lookup(rows: &[Vec<f64>], dataset: usize, category: usize) -> f64 {
    rows.get(dataset)
        .and_then(|row| row.get(category))
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::StackLayout;
    use crate::core::Dataset;

    #[test]
    fn offsets_are_running_totals() {
        let datasets = vec![
            Dataset::new("a", [1.0, 2.0]),
            Dataset::new("b", [3.0, 4.0]),
            Dataset::new("c", [5.0]),
        ];
        let stack = StackLayout::from_datasets(&datasets, 2);
        assert_eq!(stack.offset(0, 1), 0.0);
        assert_eq!(stack.offset(2, 0), 4.0);
        assert_eq!(stack.segment(2, 1), (6.0, 6.0));
        assert_eq!(stack.totals(), &[9.0, 6.0]);
    }
}
