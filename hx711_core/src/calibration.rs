//! Linear raw-to-grams calibration.

use crate::error::{Error, Result};

/// Reference-unit calibration: raw counts per gram, plus the raw offset
/// corresponding to zero load.
///
/// The reference unit is typically derived offline by placing a known
/// mass and solving for counts per gram; this type only applies a
/// supplied factor. The offset is what `tare` re-zeroes at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    reference_unit: f64,
    offset: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            reference_unit: 1.0,
            offset: 0.0,
        }
    }
}

impl Calibration {
    pub fn new(reference_unit: f64, offset: f64) -> Result<Self> {
        let mut c = Self::default();
        c.set_reference_unit(reference_unit)?;
        c.set_offset(offset)?;
        Ok(c)
    }

    /// Raw counts per gram. Every reading divides by this, so zero and
    /// non-finite values are rejected.
    pub fn set_reference_unit(&mut self, reference_unit: f64) -> Result<()> {
        if reference_unit == 0.0 || !reference_unit.is_finite() {
            return Err(Error::InvalidArgument(
                "reference unit must be a non-zero finite number",
            ));
        }
        self.reference_unit = reference_unit;
        Ok(())
    }

    pub fn set_offset(&mut self, offset: f64) -> Result<()> {
        if !offset.is_finite() {
            return Err(Error::InvalidArgument("offset must be finite"));
        }
        self.offset = offset;
        Ok(())
    }

    #[inline]
    pub fn reference_unit(&self) -> f64 {
        self.reference_unit
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Convert a representative raw value to grams.
    #[inline]
    pub fn to_grams(&self, raw: f64) -> f64 {
        (raw - self.offset) / self.reference_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_raw_to_grams() {
        let c = Calibration::new(100.0, 500.0).unwrap();
        assert_eq!(c.to_grams(1500.0), 10.0);
        assert_eq!(c.to_grams(500.0), 0.0);
        assert_eq!(c.to_grams(400.0), -1.0);
    }

    #[test]
    fn negative_reference_unit_is_allowed() {
        // Inverted wiring yields falling counts under load.
        let c = Calibration::new(-100.0, 0.0).unwrap();
        assert_eq!(c.to_grams(-1000.0), 10.0);
    }

    #[test]
    fn zero_and_non_finite_reference_units_are_rejected() {
        assert!(matches!(
            Calibration::new(0.0, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Calibration::new(f64::NAN, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Calibration::new(f64::INFINITY, 0.0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_finite_offset_is_rejected() {
        let mut c = Calibration::default();
        assert!(c.set_offset(f64::NAN).is_err());
        assert!(c.set_offset(12.5).is_ok());
    }
}
