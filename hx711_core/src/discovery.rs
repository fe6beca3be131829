//! Timing discovery: back-to-back read runs with per-cycle capture.

use tracing::debug;

use hx711_traits::{Clock, ClockLine, DataLine};

use crate::driver::Hx711;
use crate::error::{Error, Result};
use crate::timing::TimingCollection;

/// Read `sample_count` cycles strictly in sequence, capturing the raw
/// value and phase timings of each.
///
/// Fail-fast: any read error aborts the whole run, so a returned
/// collection always holds exactly `sample_count` entries. The bus is
/// half-duplex and single-owner; there is no concurrent variant.
pub fn collect_timings<D, S, C>(
    hx: &mut Hx711<D, S, C>,
    sample_count: usize,
) -> Result<TimingCollection>
where
    D: DataLine,
    S: ClockLine,
    C: Clock,
{
    if sample_count == 0 {
        return Err(Error::InvalidArgument("sample count must be positive"));
    }
    let mut samples = Vec::with_capacity(sample_count);
    for n in 0..sample_count {
        samples.push(hx.read_timed()?);
        if (n + 1) % 100 == 0 {
            debug!(collected = n + 1, total = sample_count, "discovery progress");
        }
    }
    Ok(TimingCollection::from_samples(samples))
}
