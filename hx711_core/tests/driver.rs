//! Driver protocol tests against the simulated converter.

use std::time::Duration;

use hx711_core::{collect_timings, Error, Hx711, Mode, Rate, RAW_MIN};
use hx711_hardware::SimulatedConverter;
use hx711_traits::clock::test_clock::TestClock;
use hx711_traits::{Clock, MonotonicClock};

#[test]
fn reads_scripted_samples_bit_exact() {
    let sim = SimulatedConverter::scripted([0x12_3456, -1, RAW_MIN]).busy_polls(1);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);

    assert_eq!(hx.read_raw().unwrap(), 0x12_3456);
    assert_eq!(hx.read_raw().unwrap(), -1);
    assert_eq!(hx.read_raw().unwrap(), RAW_MIN);
}

#[test]
fn readiness_follows_the_data_line() {
    let sim = SimulatedConverter::scripted([42]).busy_polls(2);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);

    // Busy until the scripted sample lands, then ready until it is
    // shifted out.
    assert!(!hx.is_ready());
    assert!(!hx.is_ready());
    assert!(hx.is_ready());
    assert!(hx.is_ready());
    assert_eq!(hx.read_raw().unwrap(), 42);
}

#[test]
fn trailing_pulses_track_the_selected_mode() {
    let sim = SimulatedConverter::scripted([0, 0, 0]).busy_polls(1);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz10);

    hx.read_raw().unwrap();
    hx.set_mode(Mode::B32);
    hx.read_raw().unwrap();
    hx.set_mode(Mode::A64);
    hx.read_raw().unwrap();

    assert_eq!(sim.completed_pulse_counts(), vec![25, 26, 27]);
}

#[test]
fn read_times_out_when_data_never_goes_ready() {
    let sim = SimulatedConverter::stalled().poll_delay(Duration::from_micros(50));
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, MonotonicClock::new(), Rate::Hz10);
    hx.set_ready_timeout(Duration::from_millis(5));

    assert!(matches!(hx.read_raw(), Err(Error::Timeout)));
}

#[test]
fn timing_phases_are_exact_under_a_test_clock() {
    let sim = SimulatedConverter::scripted([42]).busy_polls(0);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);

    let sample = hx.read_timed().unwrap();
    assert_eq!(sample.raw, 42);
    // Polls consume no test-clock time, so the wait phase is empty and
    // the conversion phase is 25 pulses at two 1 µs holds each.
    assert_eq!(sample.timing.wait(), Duration::ZERO);
    assert_eq!(sample.timing.conversion(), Duration::from_micros(50));
    assert_eq!(
        sample.timing.total(),
        sample.timing.wait() + sample.timing.conversion()
    );
}

#[test]
fn conversion_phase_grows_with_extra_mode_pulses() {
    let sim = SimulatedConverter::scripted([0, 0]).busy_polls(0);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);
    hx.set_mode(Mode::A64);

    let sample = hx.read_timed().unwrap();
    // 24 data pulses plus 3 trailing ones, 2 µs per pulse.
    assert_eq!(sample.timing.conversion(), Duration::from_micros(54));
}

#[test]
fn recovers_after_power_down() {
    let sim = SimulatedConverter::scripted([7, 9]).busy_polls(0);
    let (dt, sck) = sim.split();
    let clock = TestClock::new();
    let mut hx = Hx711::new(dt, sck, clock.clone(), Rate::Hz10);

    assert_eq!(hx.read_raw().unwrap(), 7);
    let before = clock.now();
    hx.power_down();
    // The next read powers the converter back up on its own.
    assert_eq!(hx.read_raw().unwrap(), 9);
    // Power-up waited out the 10 Hz settle time on the shared clock.
    assert!(clock.now() - before >= Duration::from_millis(400));
}

#[test]
fn collect_timings_returns_exactly_the_requested_count() {
    let sim = SimulatedConverter::generator(|| 42).busy_polls(1);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);

    let timings = collect_timings(&mut hx, 10).unwrap();
    assert_eq!(timings.len(), 10);
    assert!(timings.iter().all(|s| s.raw == 42));
}

#[test]
fn collect_timings_rejects_a_zero_sample_count() {
    let sim = SimulatedConverter::generator(|| 0);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, TestClock::new(), Rate::Hz80);

    assert!(matches!(
        collect_timings(&mut hx, 0),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn collect_timings_fails_fast_when_the_source_stalls() {
    let sim = SimulatedConverter::scripted([1, 2, 3]).busy_polls(0);
    let (dt, sck) = sim.split();
    let mut hx = Hx711::new(dt, sck, MonotonicClock::new(), Rate::Hz80);
    hx.set_ready_timeout(Duration::from_millis(5));

    // Three samples succeed, the fourth stalls: no partial collection.
    assert!(matches!(collect_timings(&mut hx, 5), Err(Error::Timeout)));
}
