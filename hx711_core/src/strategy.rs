//! Batch-reduction strategies for raw sample batches.

/// Reduces a batch of raw samples to one representative value.
///
/// Calibration math only ever sees the reduced value, so strategies can
/// be swapped without touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// Arithmetic mean of the batch.
    #[default]
    Mean,
    /// Median of the batch; a single spiked sample cannot move it.
    Median,
}

impl ReadStrategy {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn reduce(self, samples: &[i32]) -> f64 {
        debug_assert!(!samples.is_empty(), "reducing an empty batch");
        if samples.is_empty() {
            return 0.0;
        }
        match self {
            ReadStrategy::Mean => {
                let sum: i64 = samples.iter().map(|&v| i64::from(v)).sum();
                sum as f64 / samples.len() as f64
            }
            ReadStrategy::Median => {
                let mut sorted = samples.to_vec();
                sorted.sort_unstable();
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
                } else {
                    f64::from(sorted[mid])
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_batch() {
        assert_eq!(ReadStrategy::Mean.reduce(&[1000, 1002, 998, 1001, 999]), 1000.0);
        assert_eq!(ReadStrategy::Mean.reduce(&[-3, 3]), 0.0);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(ReadStrategy::Median.reduce(&[9, 1, 5]), 5.0);
        assert_eq!(ReadStrategy::Median.reduce(&[4, 1, 3, 2]), 2.5);
    }

    #[test]
    fn median_rejects_single_spike() {
        let batch = [1000, 1001, 9000, 999, 1000];
        assert_eq!(ReadStrategy::Median.reduce(&batch), 1000.0);
        assert!(ReadStrategy::Mean.reduce(&batch) > 2000.0);
    }

    #[test]
    fn mean_does_not_overflow_on_extremes() {
        let batch = [i32::MAX, i32::MAX, i32::MAX];
        assert_eq!(ReadStrategy::Mean.reduce(&batch), f64::from(i32::MAX));
    }
}
