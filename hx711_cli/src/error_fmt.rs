//! Human-readable error descriptions and structured JSON error formatting.

use hx711_core::Error;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(e) = err.downcast_ref::<Error>() {
        return match e {
            Error::Timeout => {
                "What happened: The converter never signalled data-ready.\nLikely causes: DOUT/PD_SCK swapped or miswired, no power/ground, or the timeout is too low for the strapped rate.\nHow to fix: Verify the pin numbers and wiring, check supply and GND, and consider raising --timeout-ms (a 10 Hz part needs about 500 ms for its first sample after power-up).".to_string()
            }
            Error::InvalidMode(msg) => format!(
                "What happened: Unsupported channel/gain selection ({msg}).\nLikely causes: Requested a combination the converter cannot latch.\nHow to fix: Use channel A at gain 128 or 64, or channel B at gain 32."
            ),
            Error::InvalidArgument(msg) => format!(
                "What happened: Invalid argument ({msg}).\nLikely causes: A flag value outside the supported range.\nHow to fix: Re-run with --help to see accepted values."
            ),
        };
    }

    // GPIO init failures arrive wrapped from the hardware layer.
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();
    if lower.contains("gpio") {
        return "What happened: Failed to claim the GPIO lines.\nLikely causes: Wrong pin numbers, pins already claimed by another process, or insufficient GPIO permissions.\nHow to fix: Check the BCM pin numbers and make sure the process may access /dev/gpiomem.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = match err.downcast_ref::<Error>() {
        Some(Error::Timeout) => "Timeout",
        Some(Error::InvalidMode(_)) => "InvalidMode",
        Some(Error::InvalidArgument(_)) => "InvalidArgument",
        None => "Error",
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
