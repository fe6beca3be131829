pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Converter data line (DOUT). Input, read-only.
///
/// The converter holds this line high while a conversion is in progress
/// and drops it low when a sample is ready to be shifted out.
pub trait DataLine {
    fn is_high(&self) -> bool;
}

/// Converter clock line (PD_SCK). Output, owned exclusively by one driver.
///
/// Idles low between cycles. Holding it high for 60 µs or longer powers
/// the converter down.
pub trait ClockLine {
    fn set_high(&mut self);
    fn set_low(&mut self);
}
