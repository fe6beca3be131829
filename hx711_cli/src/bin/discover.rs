//! Timing discovery tool: collects a run of samples and reports
//! wait/conversion statistics plus one CSV row per sample.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::info;

use hx711_cli::opts::{RateArg, RtLock, parse_or_exit1};
use hx711_cli::{backend, error_fmt, logging, report, rt};
use hx711_core::{Hx711, Rate, collect_timings};
use hx711_traits::MonotonicClock;

/// Measure converter timing behaviour over a run of samples.
#[derive(Parser, Debug)]
#[command(name = "hx711-discover", version, about = "HX711 timing discovery")]
struct Args {
    /// Data line (DOUT) GPIO pin, BCM numbering
    data_pin: u8,

    /// Clock line (PD_SCK) GPIO pin, BCM numbering
    clock_pin: u8,

    /// Number of samples to collect
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    samples: u64,

    /// Converter output data rate (must match the RATE pin strap)
    #[arg(long, value_enum, default_value = "80")]
    rate: RateArg,

    /// Data-ready timeout per sample, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// In-range band width, in standard deviations from the median
    #[arg(long, value_name = "SIGMAS", default_value_t = 3.0)]
    band: f64,

    /// Run without real-time scheduling
    #[arg(
        long,
        action = ArgAction::SetTrue,
        long_help = "Skip SCHED_FIFO priority and memory locking. Discovery runs real-time by default because scheduler preemption shows up directly in the measured wait times; disable it only when the host cannot grant the privileges."
    )]
    no_rt: bool,

    /// SCHED_FIFO priority (Linux); defaults to the platform maximum
    #[arg(
        long,
        value_name = "PRIO",
        long_help = "SCHED_FIFO priority when real-time mode is active (Linux only). Higher values run before lower ones. Range is platform-defined (usually 1..=99); out-of-range values are clamped. Use with care; very high priorities can impact system stability."
    )]
    rt_prio: Option<i32>,

    /// Memory locking mode: none, current, or all
    #[arg(
        long,
        value_enum,
        value_name = "MODE",
        long_help = "Select memory locking mode when real-time mode is active.\n- none: do not lock memory.\n- current: lock currently resident pages (mlockall(MCL_CURRENT)).\n- all: lock current and future pages (mlockall(MCL_CURRENT|MCL_FUTURE)).\nDefault: current on Linux, none elsewhere."
    )]
    lock_memory: Option<RtLock>,

    /// Emit the report as a single JSON object instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Mirror logs into this file as JSON lines
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = parse_or_exit1::<Args>();

    let _ = color_eyre::install();
    let _file_guard = match logging::init(&args.log_level, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    // Discovery measures jitter, so real-time is the default here.
    rt::setup_rt_once(
        !args.no_rt,
        args.rt_prio,
        args.lock_memory.unwrap_or_else(RtLock::os_default),
    );

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if args.json {
                eprintln!("{}", error_fmt::format_error_json(&e));
            } else {
                eprintln!("Error: {}", error_fmt::humanize(&e));
            }
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> eyre::Result<()> {
    let (dt, sck) = backend::open(args.data_pin, args.clock_pin)?;
    let mut hx = Hx711::new(dt, sck, MonotonicClock::new(), Rate::from(args.rate));
    hx.set_ready_timeout(Duration::from_millis(args.timeout_ms));

    info!(samples = args.samples, rate = ?hx.rate(), "starting timing discovery");
    let timings = collect_timings(&mut hx, usize::try_from(args.samples)?)?;

    let rendered = if args.json {
        report::render_json(&timings, args.band)
    } else {
        report::render_text(&timings, args.band)
    };
    print!("{rendered}");
    Ok(())
}
