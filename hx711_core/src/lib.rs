#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Hardware-agnostic core for HX711-class load-cell converters.
//!
//! All pin access goes through the `hx711_traits` capability traits, so
//! the same driver runs against Raspberry Pi GPIO or the simulated
//! converter in `hx711_hardware::sim`.
//!
//! ## Architecture
//!
//! - **Driver**: bit-banged read cycles with per-phase timing (`driver`)
//! - **Mode**: {channel, gain} ↔ pulse-count mapping, rate strap (`mode`)
//! - **Discovery**: sequential timing capture (`discovery`, `timing`)
//! - **Statistics**: pure min/max/median/std projections (`stats`)
//! - **Weight**: batch reduction, calibration, mass units (`scale`,
//!   `strategy`, `calibration`, `weight`)

pub mod calibration;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod mode;
pub mod scale;
pub mod stats;
pub mod strategy;
pub mod timing;
pub mod weight;

pub use calibration::Calibration;
pub use discovery::collect_timings;
pub use driver::{DEFAULT_READY_TIMEOUT, Hx711, RAW_MAX, RAW_MIN, extend_sign_24};
pub use error::{Error, Result};
pub use mode::{Channel, Gain, Mode, Rate};
pub use scale::{DEFAULT_SAMPLES_PER_READ, Scale};
pub use stats::Stats;
pub use strategy::ReadStrategy;
pub use timing::{ReadTiming, TimedSample, TimingCollection, duration_us};
pub use weight::{Unit, Weight};
