#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Converter backends: Raspberry Pi GPIO lines and an in-process
//! simulator.
//!
//! The `hardware` feature gates everything that needs `rppal`; the
//! simulator is always available so the driver and tools stay testable
//! off-target.

pub mod error;
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub mod gpio;
pub mod sim;

pub use error::{HwError, Result};
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use gpio::{open_pins, RppalClockLine, RppalDataLine};
pub use sim::{SimClockLine, SimDataLine, SimulatedConverter};
