//! In-process stand-in for the converter, wired at the pin level.
//!
//! The simulator speaks the same two-line protocol as the real part: DOUT
//! stays high while a conversion is pending, drops low when a sample is
//! ready, and shifts the sample out MSB-first on PD_SCK rising edges. After
//! the 24th data bit the line goes high again on the next rising edge and
//! the cycle ends on the first DOUT poll that follows the trailing pulses.
//!
//! Every completed cycle records its total rising-edge count, so tests can
//! assert how many pulses a driver actually issued. Power state is not
//! modelled; clock activity outside a cycle is ignored.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use hx711_traits::{ClockLine, DataLine};

const SAMPLE_MASK: u32 = 0xFF_FFFF;

#[allow(clippy::cast_sign_loss)]
fn to_wire(raw: i32) -> u32 {
    raw as u32 & SAMPLE_MASK
}

enum Source {
    Script(VecDeque<u32>),
    Generator(Box<dyn FnMut() -> i32>),
    Stalled,
}

impl Source {
    fn next_sample(&mut self) -> Option<u32> {
        match self {
            Self::Script(queue) => queue.pop_front(),
            Self::Generator(f) => Some(to_wire(f())),
            Self::Stalled => None,
        }
    }
}

struct SimState {
    source: Source,
    busy_polls: u32,
    poll_delay: Duration,
    polls_left: u32,
    stalled: bool,
    shifting: bool,
    shift: u32,
    bits_out: u8,
    dt_high: bool,
    sck_high: bool,
    recorded: bool,
    pulse_counts: Vec<u8>,
}

impl SimState {
    fn new(source: Source, busy_polls: u32) -> Self {
        Self {
            source,
            busy_polls,
            poll_delay: Duration::ZERO,
            polls_left: busy_polls,
            stalled: false,
            shifting: false,
            shift: 0,
            bits_out: 0,
            dt_high: true,
            sck_high: false,
            recorded: false,
            pulse_counts: Vec::new(),
        }
    }

    fn poll(&mut self) -> bool {
        if self.stalled {
            self.busy_wait();
            return true;
        }
        // A finished cycle closes out on the first poll after its trailing
        // pulses, never while the clock is still held high.
        if self.shifting && self.bits_out >= 25 && !self.sck_high {
            self.shifting = false;
            self.recorded = false;
            self.bits_out = 0;
            self.dt_high = true;
            self.polls_left = self.busy_polls;
        }
        if self.shifting {
            return self.dt_high;
        }
        if self.polls_left > 0 {
            self.polls_left -= 1;
            self.busy_wait();
            return true;
        }
        self.begin_cycle()
    }

    fn begin_cycle(&mut self) -> bool {
        match self.source.next_sample() {
            Some(raw) => {
                self.shift = raw & SAMPLE_MASK;
                self.shifting = true;
                self.bits_out = 0;
                self.dt_high = false;
                false
            }
            None => {
                self.stalled = true;
                true
            }
        }
    }

    fn rising_edge(&mut self) {
        self.sck_high = true;
        if !self.shifting {
            return;
        }
        self.bits_out += 1;
        if self.bits_out <= 24 {
            self.dt_high = (self.shift >> (24 - self.bits_out)) & 1 == 1;
        } else {
            // 25th edge and beyond: data line reports busy again.
            self.dt_high = true;
        }
    }

    fn falling_edge(&mut self) {
        self.sck_high = false;
        // Record eagerly so the count is visible before the next poll;
        // later trailing edges in the same cycle overwrite it.
        if self.shifting && self.bits_out >= 25 {
            if self.recorded {
                if let Some(last) = self.pulse_counts.last_mut() {
                    *last = self.bits_out;
                }
            } else {
                self.pulse_counts.push(self.bits_out);
                self.recorded = true;
            }
        }
    }

    fn busy_wait(&self) {
        if !self.poll_delay.is_zero() {
            std::thread::sleep(self.poll_delay);
        }
    }
}

/// Handle that owns the simulated converter state.
///
/// [`split`](Self::split) yields the two line endpoints a driver plugs into.
pub struct SimulatedConverter {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedConverter {
    /// Serves the given samples in order, then stalls the data line.
    pub fn scripted(samples: impl IntoIterator<Item = i32>) -> Self {
        let queue = samples.into_iter().map(to_wire).collect();
        Self::with_source(Source::Script(queue))
    }

    /// Draws one sample from `f` per conversion, indefinitely.
    pub fn generator(f: impl FnMut() -> i32 + 'static) -> Self {
        Self::with_source(Source::Generator(Box::new(f)))
    }

    /// Never signals data ready.
    pub fn stalled() -> Self {
        Self::with_source(Source::Stalled)
    }

    fn with_source(source: Source) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState::new(source, 2))),
        }
    }

    /// Number of DOUT polls that report busy before each sample is ready.
    #[must_use]
    pub fn busy_polls(self, polls: u32) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.busy_polls = polls;
            state.polls_left = polls;
        }
        self
    }

    /// Wall-clock delay applied to every busy poll.
    #[must_use]
    pub fn poll_delay(self, delay: Duration) -> Self {
        self.state.borrow_mut().poll_delay = delay;
        self
    }

    /// The two protocol endpoints, sharing this converter's state.
    #[must_use]
    pub fn split(&self) -> (SimDataLine, SimClockLine) {
        (
            SimDataLine {
                state: Rc::clone(&self.state),
            },
            SimClockLine {
                state: Rc::clone(&self.state),
            },
        )
    }

    /// Rising-edge totals of every completed cycle, oldest first.
    #[must_use]
    pub fn completed_pulse_counts(&self) -> Vec<u8> {
        self.state.borrow().pulse_counts.clone()
    }
}

/// Simulated DOUT endpoint.
pub struct SimDataLine {
    state: Rc<RefCell<SimState>>,
}

impl DataLine for SimDataLine {
    fn is_high(&self) -> bool {
        self.state.borrow_mut().poll()
    }
}

/// Simulated PD_SCK endpoint.
pub struct SimClockLine {
    state: Rc<RefCell<SimState>>,
}

impl ClockLine for SimClockLine {
    fn set_high(&mut self) {
        self.state.borrow_mut().rising_edge();
    }

    fn set_low(&mut self) {
        self.state.borrow_mut().falling_edge();
    }
}
