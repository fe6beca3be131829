//! Pin acquisition: real GPIO lines when built with the `hardware`
//! feature, the simulated converter otherwise.

#[cfg(all(target_os = "linux", feature = "hardware"))]
pub fn open(
    data_pin: u8,
    clock_pin: u8,
) -> eyre::Result<(hx711_hardware::RppalDataLine, hx711_hardware::RppalClockLine)> {
    use eyre::WrapErr;
    hx711_hardware::open_pins(data_pin, clock_pin)
        .wrap_err_with(|| format!("open converter pins (data {data_pin}, clock {clock_pin})"))
}

#[cfg(not(all(target_os = "linux", feature = "hardware")))]
pub fn open(
    data_pin: u8,
    clock_pin: u8,
) -> eyre::Result<(hx711_hardware::SimDataLine, hx711_hardware::SimClockLine)> {
    use std::time::Duration;

    use hx711_hardware::SimulatedConverter;
    use tracing::warn;

    warn!(
        data_pin,
        clock_pin, "built without the `hardware` feature; using a simulated converter"
    );

    // Deterministic noisy source around a plausible tare point, paced
    // near the 80 Hz conversion period so the tools behave realistically
    // off-target.
    let mut state: u32 = 0x02F6_E2B1;
    let sim = SimulatedConverter::generator(move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        200_000 + (state % 2048) as i32 - 1024
    })
    .busy_polls(60)
    .poll_delay(Duration::from_micros(200));
    Ok(sim.split())
}
