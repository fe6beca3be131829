//! Mass units and tagged weight values.

use std::fmt;

/// Mass units supported by the pipeline.
///
/// Conversion factors are exact definitions relative to the gram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Micrograms,
    Milligrams,
    #[default]
    Grams,
    Kilograms,
    Tonnes,
    ImperialTons,
    UsTons,
    Stones,
    Pounds,
    Ounces,
}

impl Unit {
    /// Grams per one of this unit.
    pub fn grams_per_unit(self) -> f64 {
        match self {
            Unit::Micrograms => 1e-6,
            Unit::Milligrams => 1e-3,
            Unit::Grams => 1.0,
            Unit::Kilograms => 1_000.0,
            Unit::Tonnes => 1_000_000.0,
            Unit::ImperialTons => 1_016_046.908_8,
            Unit::UsTons => 907_184.74,
            Unit::Stones => 6_350.293_18,
            Unit::Pounds => 453.592_37,
            Unit::Ounces => 28.349_523_125,
        }
    }

    /// Abbreviation used in printed readings.
    pub fn abbrev(self) -> &'static str {
        match self {
            Unit::Micrograms => "ug",
            Unit::Milligrams => "mg",
            Unit::Grams => "g",
            Unit::Kilograms => "kg",
            Unit::Tonnes => "t",
            Unit::ImperialTons => "t (imp)",
            Unit::UsTons => "t (US)",
            Unit::Stones => "st",
            Unit::Pounds => "lb",
            Unit::Ounces => "oz",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Signed weight magnitude tagged with its unit.
///
/// Derived at the moment of construction; converting between units is a
/// pure linear transform and never re-reads the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    value: f64,
    unit: Unit,
}

impl Weight {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn from_grams(grams: f64, unit: Unit) -> Self {
        Self {
            value: grams / unit.grams_per_unit(),
            unit,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Grams equivalent of this weight.
    #[inline]
    pub fn to_grams(&self) -> f64 {
        self.value * self.unit.grams_per_unit()
    }

    /// The same weight expressed in `unit`.
    pub fn to(&self, unit: Unit) -> Weight {
        Weight::from_grams(self.to_grams(), unit)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}
