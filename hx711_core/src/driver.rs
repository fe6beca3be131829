//! Bit-banged protocol driver for the converter's two-wire interface.
//!
//! One driver instance exclusively owns its pin pair; all reads go
//! through `&mut self`, so single-thread access is upheld by
//! construction rather than by locking.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use hx711_traits::{Clock, ClockLine, DataLine};

use crate::error::{Error, Result};
use crate::mode::{Mode, Rate};
use crate::timing::{ReadTiming, TimedSample};

/// Data bits shifted out per conversion.
const SAMPLE_BITS: u32 = 24;

/// Full-scale bounds of the 24-bit two's-complement sample.
pub const RAW_MIN: i32 = -(1 << 23);
pub const RAW_MAX: i32 = (1 << 23) - 1;

/// Hold time for each clock phase. The converter wants the clock high
/// for 0.2-50 µs per pulse; 1 µs keeps slow hosts inside the window
/// while staying far from the 60 µs power-down threshold.
const PULSE_HOLD: Duration = Duration::from_micros(1);

/// Clock held high at least this long powers the converter down.
const POWER_DOWN_HOLD: Duration = Duration::from_micros(80);

/// Default bound on the data-ready wait: covers a full 10 Hz conversion
/// plus the worst-case power-up settle, with margin.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(1);

/// Protocol driver for one converter on a data/clock pin pair.
pub struct Hx711<D, S, C> {
    dt: D,
    sck: S,
    clock: C,
    mode: Mode,
    rate: Rate,
    ready_timeout: Duration,
    powered: bool,
}

impl<D: DataLine, S: ClockLine, C: Clock> Hx711<D, S, C> {
    /// Take exclusive ownership of the pin pair and leave the bus idle
    /// (clock low, converter powered).
    pub fn new(dt: D, mut sck: S, clock: C, rate: Rate) -> Self {
        sck.set_low(); // clock idle low
        Self {
            dt,
            sck,
            clock,
            mode: Mode::default(),
            rate,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            powered: true,
        }
    }

    /// Select the {channel, gain} latched by the next read cycle.
    ///
    /// The converter reacts one cycle late: the first sample read after
    /// a change is still converted with the previous mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(?mode, "mode change, applies to the conversion after next read");
        }
        self.mode = mode;
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Bound on the data-ready wait phase of a read.
    pub fn set_ready_timeout(&mut self, timeout: Duration) {
        self.ready_timeout = timeout;
    }

    #[inline]
    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    /// Whether a conversion is waiting to be shifted out (data line low).
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.dt.is_high()
    }

    /// One complete bus transaction: wait for data-ready, shift in 24
    /// bits MSB-first, issue the trailing mode pulses, and timestamp the
    /// phase boundaries.
    ///
    /// Fails with [`Error::Timeout`] if the converter never signals
    /// ready within the configured bound. The clock line is left low
    /// either way, so the next cycle starts clean; a timed-out cycle
    /// cannot be resumed.
    pub fn read_timed(&mut self) -> Result<TimedSample> {
        if !self.powered {
            self.power_up();
        }

        let started = self.clock.now();
        self.wait_ready(started)?;
        let ready_at = self.clock.now();

        // Nothing below may sleep, allocate, or log: a stretched clock
        // pulse corrupts the bit stream.
        let mut value: u32 = 0;
        for _ in 0..SAMPLE_BITS {
            self.sck.set_high();
            self.clock.spin_for(PULSE_HOLD);
            value = (value << 1) | u32::from(self.dt.is_high());
            self.sck.set_low();
            self.clock.spin_for(PULSE_HOLD);
        }

        // Trailing pulses latch {channel, gain} for the next conversion.
        for _ in 0..self.mode.extra_pulses() {
            self.sck.set_high();
            self.clock.spin_for(PULSE_HOLD);
            self.sck.set_low();
            self.clock.spin_for(PULSE_HOLD);
        }
        let finished = self.clock.now();

        let raw = extend_sign_24(value);
        trace!(raw, pulses = self.mode.pulses(), "read cycle complete");
        Ok(TimedSample {
            raw,
            timing: ReadTiming::new(ready_at - started, finished - ready_at),
        })
    }

    /// [`Hx711::read_timed`] without the timing marks.
    pub fn read_raw(&mut self) -> Result<i32> {
        Ok(self.read_timed()?.raw)
    }

    /// Hold the clock line high until the converter enters power-down.
    ///
    /// Power-down resets the converter to channel A gain 128. The
    /// configured mode is re-latched by the trailing pulses of the first
    /// read after power-up, so that first sample still reflects the
    /// reset mode.
    pub fn power_down(&mut self) {
        self.sck.set_high();
        self.clock.spin_for(POWER_DOWN_HOLD);
        self.powered = false;
        debug!("converter powered down");
    }

    /// Release the clock line and wait out the rate-dependent output
    /// settle time.
    pub fn power_up(&mut self) {
        self.sck.set_low();
        self.clock.sleep(self.rate.settle_time());
        self.powered = true;
        debug!(rate = ?self.rate, "converter powered up");
    }

    /// Bounded spin until the data line goes low, checking the deadline
    /// every iteration. No sleeps: a scheduler snooze here would show up
    /// as phantom wait-time jitter in discovery runs.
    fn wait_ready(&mut self, started: Instant) -> Result<()> {
        self.sck.set_low();
        let deadline = started + self.ready_timeout;
        while self.dt.is_high() {
            if self.clock.now() >= deadline {
                return Err(Error::Timeout);
            }
            std::hint::spin_loop();
        }
        Ok(())
    }
}

/// Reinterpret the low 24 bits of `value` as a two's-complement i32.
#[inline]
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn extend_sign_24(value: u32) -> i32 {
    let mut v = (value & 0xFFFFFF) as i32;
    if (v & 0x800000) != 0 {
        v |= !0xFFFFFF;
    }
    v
}
