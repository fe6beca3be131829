//! CLI argument definitions shared by both binaries.

use clap::builder::PossibleValue;
use clap::{Parser, ValueEnum};

use hx711_core::{Rate, ReadStrategy, Unit};

/// Parse the command line, or exit.
///
/// Usage problems exit with code 1 before any pin is touched; `--help` and
/// `--version` exit 0.
pub fn parse_or_exit1<T: Parser>() -> T {
    use clap::error::ErrorKind;
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Memory locking mode for real-time operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum RtLock {
    /// Do not lock memory
    None,
    /// Lock currently resident pages
    Current,
    /// Lock current and future pages
    All,
}

impl RtLock {
    #[inline]
    pub fn os_default() -> Self {
        #[cfg(target_os = "linux")]
        {
            return RtLock::Current;
        }
        #[allow(unreachable_code)]
        RtLock::None
    }
}

/// Output data rate of the converter board. Set by the RATE pin strap,
/// not over the bus; the tools need it to size settle waits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum RateArg {
    /// 10 samples per second (RATE strapped low)
    #[value(name = "10")]
    Hz10,
    /// 80 samples per second (RATE strapped high)
    #[value(name = "80")]
    Hz80,
}

impl From<RateArg> for Rate {
    fn from(arg: RateArg) -> Self {
        match arg {
            RateArg::Hz10 => Rate::Hz10,
            RateArg::Hz80 => Rate::Hz80,
        }
    }
}

/// Display unit for weight readings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnitArg(pub Unit);

impl ValueEnum for UnitArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            UnitArg(Unit::Micrograms),
            UnitArg(Unit::Milligrams),
            UnitArg(Unit::Grams),
            UnitArg(Unit::Kilograms),
            UnitArg(Unit::Tonnes),
            UnitArg(Unit::ImperialTons),
            UnitArg(Unit::UsTons),
            UnitArg(Unit::Stones),
            UnitArg(Unit::Pounds),
            UnitArg(Unit::Ounces),
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let v = match self.0 {
            Unit::Micrograms => PossibleValue::new("ug").help("micrograms"),
            Unit::Milligrams => PossibleValue::new("mg").help("milligrams"),
            Unit::Grams => PossibleValue::new("g").help("grams"),
            Unit::Kilograms => PossibleValue::new("kg").help("kilograms"),
            Unit::Tonnes => PossibleValue::new("t").help("metric tonnes"),
            Unit::ImperialTons => PossibleValue::new("imp-ton").help("imperial tons"),
            Unit::UsTons => PossibleValue::new("us-ton").help("US tons"),
            Unit::Stones => PossibleValue::new("st").help("stones"),
            Unit::Pounds => PossibleValue::new("lb").help("pounds"),
            Unit::Ounces => PossibleValue::new("oz").help("ounces"),
        };
        Some(v)
    }
}

/// Batch reduction strategy for weight readings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Arithmetic mean of the batch
    Mean,
    /// Middle value of the sorted batch
    Median,
}

impl From<StrategyArg> for ReadStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Mean => ReadStrategy::Mean,
            StrategyArg::Median => ReadStrategy::Median,
        }
    }
}
