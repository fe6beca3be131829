//! Per-cycle timing records and discovery-run collections.

use std::time::Duration;

use crate::stats::Stats;

/// Microseconds as f64, the unit used wherever durations enter
/// statistics or reports.
#[inline]
pub fn duration_us(d: Duration) -> f64 {
    d.as_secs_f64() * 1e6
}

/// Phase durations of one complete read cycle.
///
/// wait covers polling for data-ready, conversion covers shifting the
/// 24 bits plus the trailing mode pulses. total is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTiming {
    wait: Duration,
    conversion: Duration,
    total: Duration,
}

impl ReadTiming {
    pub fn new(wait: Duration, conversion: Duration) -> Self {
        Self {
            wait,
            conversion,
            total: wait + conversion,
        }
    }

    #[inline]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    #[inline]
    pub fn conversion(&self) -> Duration {
        self.conversion
    }

    #[inline]
    pub fn total(&self) -> Duration {
        self.total
    }

    #[inline]
    pub fn wait_us(&self) -> f64 {
        duration_us(self.wait)
    }

    #[inline]
    pub fn conversion_us(&self) -> f64 {
        duration_us(self.conversion)
    }

    #[inline]
    pub fn total_us(&self) -> f64 {
        duration_us(self.total)
    }
}

/// One raw sample together with the timing of the cycle that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    pub raw: i32,
    pub timing: ReadTiming,
}

/// Ordered samples from one discovery run.
///
/// Length always equals the requested sample count; a failed read aborts
/// collection instead of leaving a short collection behind. Immutable
/// once built.
#[derive(Debug, Clone)]
pub struct TimingCollection {
    samples: Vec<TimedSample>,
}

impl TimingCollection {
    pub fn from_samples(samples: Vec<TimedSample>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[TimedSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedSample> {
        self.samples.iter()
    }

    /// Statistics over the wait phase, in microseconds.
    pub fn wait_stats(&self) -> Stats {
        Stats::compute(&self.field_us(|t| t.wait_us()))
    }

    /// Statistics over the conversion phase, in microseconds.
    pub fn conversion_stats(&self) -> Stats {
        Stats::compute(&self.field_us(|t| t.conversion_us()))
    }

    /// Statistics over whole cycles, in microseconds.
    pub fn total_stats(&self) -> Stats {
        Stats::compute(&self.field_us(|t| t.total_us()))
    }

    fn field_us(&self, f: impl Fn(&ReadTiming) -> f64) -> Vec<f64> {
        self.samples.iter().map(|s| f(&s.timing)).collect()
    }
}

impl<'a> IntoIterator for &'a TimingCollection {
    type Item = &'a TimedSample;
    type IntoIter = std::slice::Iter<'a, TimedSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
