//! Continuous weight readout: tare, then print calibrated readings until
//! interrupted or a count is reached.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::info;

use hx711_cli::opts::{RateArg, RtLock, StrategyArg, UnitArg, parse_or_exit1};
use hx711_cli::{backend, error_fmt, logging, rt};
use hx711_core::{DEFAULT_SAMPLES_PER_READ, Hx711, Rate, Scale};
use hx711_traits::{Clock, MonotonicClock};

/// Print calibrated weight readings at a fixed cadence.
#[derive(Parser, Debug)]
#[command(name = "hx711-watch", version, about = "HX711 weight readout")]
struct Args {
    /// Data line (DOUT) GPIO pin, BCM numbering
    data_pin: u8,

    /// Clock line (PD_SCK) GPIO pin, BCM numbering
    clock_pin: u8,

    /// Raw counts per gram, from a prior calibration
    reference_unit: f64,

    /// Display unit for readings
    #[arg(long, value_enum, default_value = "g")]
    unit: UnitArg,

    /// Delay between readings, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    interval_ms: u64,

    /// Samples averaged into each reading
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_SAMPLES_PER_READ as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    samples: u64,

    /// Batch reduction strategy
    #[arg(long, value_enum, default_value = "mean")]
    strategy: StrategyArg,

    /// Tare before the first reading
    #[arg(long, action = ArgAction::SetTrue)]
    tare: bool,

    /// Stop after this many readings instead of running until Ctrl-C
    /// (0 keeps reading forever)
    #[arg(long, value_name = "N")]
    count: Option<u64>,

    /// Converter output data rate (must match the RATE pin strap)
    #[arg(long, value_enum, default_value = "10")]
    rate: RateArg,

    /// Data-ready timeout per sample, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// Enable real-time mode (SCHED_FIFO, mlockall)
    #[arg(
        long,
        action = ArgAction::SetTrue,
        long_help = "Enable real-time mode on supported OSes.\n\nLinux: Attempts SCHED_FIFO priority and calls mlockall to lock the process address space into RAM. This reduces page faults and jitter but can impact overall system performance and may require elevated privileges or ulimits (e.g., memlock). Use with care on shared systems."
    )]
    rt: bool,

    /// SCHED_FIFO priority (Linux); defaults to the platform maximum
    #[arg(
        long,
        value_name = "PRIO",
        long_help = "SCHED_FIFO priority when --rt is enabled (Linux only). Higher values run before lower ones. Range is platform-defined (usually 1..=99); out-of-range values are clamped."
    )]
    rt_prio: Option<i32>,

    /// Memory locking mode: none, current, or all
    #[arg(
        long,
        value_enum,
        value_name = "MODE",
        long_help = "Select memory locking mode when --rt is enabled.\n- none: do not lock memory.\n- current: lock currently resident pages (mlockall(MCL_CURRENT)).\n- all: lock current and future pages (mlockall(MCL_CURRENT|MCL_FUTURE)).\nDefault: current on Linux, none elsewhere."
    )]
    lock_memory: Option<RtLock>,

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

    rt::setup_rt_once(
        args.rt,
        args.rt_prio,
        args.lock_memory.unwrap_or_else(RtLock::os_default),
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            eprintln!("Warning: Ctrl-C handler not installed: {e}");
        }
    }

    match run(&args, &shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error_fmt::humanize(&e));
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args, shutdown: &AtomicBool) -> eyre::Result<()> {
    let (dt, sck) = backend::open(args.data_pin, args.clock_pin)?;
    let clock = MonotonicClock::new();
    let mut hx = Hx711::new(dt, sck, clock, Rate::from(args.rate));
    hx.set_ready_timeout(Duration::from_millis(args.timeout_ms));

    let mut scale = Scale::new(hx, args.reference_unit)?;
    scale.set_samples_per_read(usize::try_from(args.samples)?)?;
    scale.set_strategy(args.strategy.into());

    if args.tare {
        info!("taring");
        scale.tare()?;
    }

    let interval = Duration::from_millis(args.interval_ms);
    // --count 0 keeps the unbounded default.
    let count = args.count.filter(|&c| c > 0);
    let mut printed: u64 = 0;
    while !shutdown.load(Ordering::SeqCst) {
        let w = scale.weight(args.unit.0)?;
        println!("{w}");
        printed += 1;
        if let Some(count) = count
            && printed >= count
        {
            break;
        }
        clock.sleep(interval);
    }
    Ok(())
}
