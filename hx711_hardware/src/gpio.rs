//! Raspberry Pi GPIO adapters backed by `rppal`.
//!
//! Pin numbers follow the BCM numbering scheme, not the physical header
//! layout.

use hx711_traits::{ClockLine, DataLine};
use rppal::gpio::{Gpio, InputPin, OutputPin};
use tracing::debug;

use crate::error::{HwError, Result};

/// DOUT wired to a GPIO input.
pub struct RppalDataLine {
    pin: InputPin,
}

impl DataLine for RppalDataLine {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// PD_SCK wired to a GPIO output.
pub struct RppalClockLine {
    pin: OutputPin,
}

impl ClockLine for RppalClockLine {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}

/// Claims the two converter pins and returns them as line adapters.
///
/// The clock output is driven low before returning so the converter is
/// awake no matter what state the pin was left in.
pub fn open_pins(data_pin: u8, clock_pin: u8) -> Result<(RppalDataLine, RppalClockLine)> {
    let gpio = Gpio::new().map_err(|e| HwError::Gpio(format!("open gpio: {e}")))?;
    let dt = gpio
        .get(data_pin)
        .map_err(|e| HwError::Gpio(format!("data pin {data_pin}: {e}")))?
        .into_input();
    let mut sck = gpio
        .get(clock_pin)
        .map_err(|e| HwError::Gpio(format!("clock pin {clock_pin}: {e}")))?
        .into_output();
    sck.set_low();
    debug!(data_pin, clock_pin, "gpio lines claimed");
    Ok((RppalDataLine { pin: dt }, RppalClockLine { pin: sck }))
}
