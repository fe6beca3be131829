//! Input selection and rate strap for the converter.
//!
//! {channel, gain} is selected purely by the number of clock pulses
//! terminating a read cycle. The output rate is a board-level pin strap
//! and cannot be changed over the serial interface.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Differential input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    A,
    B,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::A => f.write_str("A"),
            Channel::B => f.write_str("B"),
        }
    }
}

/// Programmable amplifier gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    G32,
    G64,
    G128,
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gain::G32 => f.write_str("32"),
            Gain::G64 => f.write_str("64"),
            Gain::G128 => f.write_str("128"),
        }
    }
}

/// A valid {channel, gain} pair, encoded as total pulse count per read
/// cycle (25, 26, or 27).
///
/// Channel A amplifies at gain 128 or 64; channel B is fixed at gain 32.
/// The remaining pairs do not exist in hardware and are unrepresentable
/// here. A mode latched by one read applies to the *next* conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Channel A, gain 128. Power-on default of the converter.
    #[default]
    A128,
    /// Channel B, gain 32.
    B32,
    /// Channel A, gain 64.
    A64,
}

impl Mode {
    pub fn new(channel: Channel, gain: Gain) -> Result<Self> {
        match (channel, gain) {
            (Channel::A, Gain::G128) => Ok(Mode::A128),
            (Channel::B, Gain::G32) => Ok(Mode::B32),
            (Channel::A, Gain::G64) => Ok(Mode::A64),
            (channel, gain) => Err(Error::InvalidMode(format!(
                "unsupported combination: channel {channel}, gain {gain}"
            ))),
        }
    }

    /// Inverse of [`Mode::pulses`]; anything outside 25..=27 is invalid.
    pub fn from_pulses(pulses: u8) -> Result<Self> {
        match pulses {
            25 => Ok(Mode::A128),
            26 => Ok(Mode::B32),
            27 => Ok(Mode::A64),
            other => Err(Error::InvalidMode(format!("pulse count {other}"))),
        }
    }

    /// Total clock pulses in a read cycle that selects this mode: 24
    /// data bits plus the trailing pulses.
    #[inline]
    pub fn pulses(self) -> u8 {
        24 + self.extra_pulses()
    }

    /// Trailing pulses issued after the 24 data bits.
    #[inline]
    pub fn extra_pulses(self) -> u8 {
        match self {
            Mode::A128 => 1,
            Mode::B32 => 2,
            Mode::A64 => 3,
        }
    }

    #[inline]
    pub fn channel(self) -> Channel {
        match self {
            Mode::A128 | Mode::A64 => Channel::A,
            Mode::B32 => Channel::B,
        }
    }

    #[inline]
    pub fn gain(self) -> Gain {
        match self {
            Mode::A128 => Gain::G128,
            Mode::B32 => Gain::G32,
            Mode::A64 => Gain::G64,
        }
    }
}

/// Output data rate, fixed by the RATE pin strap on the board.
///
/// The driver records it only to derive conversion periods and power-up
/// settle times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    Hz10,
    Hz80,
}

impl Rate {
    /// Nominal duration of one conversion.
    #[inline]
    pub fn period(self) -> Duration {
        match self {
            Rate::Hz10 => Duration::from_millis(100),
            Rate::Hz80 => Duration::from_micros(12_500),
        }
    }

    /// Output settling time after power-up.
    #[inline]
    pub fn settle_time(self) -> Duration {
        match self {
            Rate::Hz10 => Duration::from_millis(400),
            Rate::Hz80 => Duration::from_millis(50),
        }
    }
}
