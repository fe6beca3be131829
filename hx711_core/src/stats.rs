//! Descriptive statistics over completed timing collections.
//!
//! Pure projections over immutable snapshots; there is no incremental or
//! streaming form.

/// Min, max, median, and population standard deviation of a value set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl Stats {
    /// Compute descriptive statistics over `values`.
    ///
    /// The standard deviation is the population form (sum of squared
    /// deviations over N): these runs are complete measurements, not a
    /// sample of a larger population. `values` must be non-empty; an
    /// empty slice yields all-zero stats.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(values: &[f64]) -> Self {
        debug_assert!(!values.is_empty(), "stats over empty value set");
        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                median: 0.0,
                std_dev: 0.0,
            };
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = sum / values.len() as f64;
        let variance = values
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / values.len() as f64;
        Self {
            min,
            max,
            median: median(values),
            std_dev: variance.sqrt(),
        }
    }

    /// Whether `value` lies within `band` standard deviations of the
    /// median. Used to annotate report rows, never to filter samples.
    #[inline]
    pub fn in_range(&self, value: f64, band: f64) -> bool {
        (value - self.median).abs() <= band * self.std_dev
    }
}

/// Median of `values`: middle element of a sorted copy, or the average
/// of the two middle elements on even counts.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
