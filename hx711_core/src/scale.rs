//! Weight pipeline: batch acquisition, reduction, calibration, units.

use tracing::trace;

use hx711_traits::{Clock, ClockLine, DataLine};

use crate::calibration::Calibration;
use crate::driver::Hx711;
use crate::error::{Error, Result};
use crate::strategy::ReadStrategy;
use crate::weight::{Unit, Weight};

/// Samples per reading unless configured otherwise.
pub const DEFAULT_SAMPLES_PER_READ: usize = 3;

/// Calibrated weight pipeline over a protocol driver.
///
/// Owns the driver, and through it the pin pair. Every reading takes a
/// fresh batch of raw samples; nothing is cached between calls.
pub struct Scale<D, S, C> {
    hx: Hx711<D, S, C>,
    calibration: Calibration,
    samples_per_read: usize,
    strategy: ReadStrategy,
}

impl<D: DataLine, S: ClockLine, C: Clock> Scale<D, S, C> {
    /// Wrap a driver with the given reference unit (raw counts per
    /// gram). Fails if the reference unit is zero or non-finite.
    pub fn new(hx: Hx711<D, S, C>, reference_unit: f64) -> Result<Self> {
        Ok(Self {
            hx,
            calibration: Calibration::new(reference_unit, 0.0)?,
            samples_per_read: DEFAULT_SAMPLES_PER_READ,
            strategy: ReadStrategy::default(),
        })
    }

    /// One calibrated reading in `unit`: acquire a batch, reduce it,
    /// subtract the offset, divide by the reference unit, convert.
    /// Blocks for the whole batch.
    pub fn weight(&mut self, unit: Unit) -> Result<Weight> {
        let raw = self.representative_raw()?;
        let grams = self.calibration.to_grams(raw);
        Ok(Weight::from_grams(grams, unit))
    }

    /// Record the current batch-reduced raw value as the new zero-load
    /// offset.
    pub fn tare(&mut self) -> Result<()> {
        let raw = self.representative_raw()?;
        self.calibration.set_offset(raw)?;
        trace!(offset = raw, "tared");
        Ok(())
    }

    /// Acquire and reduce one batch. Fail-fast: a reading reflects
    /// exactly `samples_per_read` samples or errors out.
    fn representative_raw(&mut self) -> Result<f64> {
        let mut batch = Vec::with_capacity(self.samples_per_read);
        for _ in 0..self.samples_per_read {
            batch.push(self.hx.read_raw()?);
        }
        Ok(self.strategy.reduce(&batch))
    }

    pub fn set_reference_unit(&mut self, reference_unit: f64) -> Result<()> {
        self.calibration.set_reference_unit(reference_unit)
    }

    pub fn set_offset(&mut self, offset: f64) -> Result<()> {
        self.calibration.set_offset(offset)
    }

    /// Samples per reading; at least one.
    pub fn set_samples_per_read(&mut self, samples: usize) -> Result<()> {
        if samples == 0 {
            return Err(Error::InvalidArgument("samples per read must be positive"));
        }
        self.samples_per_read = samples;
        Ok(())
    }

    pub fn set_strategy(&mut self, strategy: ReadStrategy) {
        self.strategy = strategy;
    }

    #[inline]
    pub fn reference_unit(&self) -> f64 {
        self.calibration.reference_unit()
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.calibration.offset()
    }

    #[inline]
    pub fn samples_per_read(&self) -> usize {
        self.samples_per_read
    }

    #[inline]
    pub fn strategy(&self) -> ReadStrategy {
        self.strategy
    }

    /// The underlying driver, for mode and power control.
    pub fn driver_mut(&mut self) -> &mut Hx711<D, S, C> {
        &mut self.hx
    }

    pub fn driver(&self) -> &Hx711<D, S, C> {
        &self.hx
    }
}
