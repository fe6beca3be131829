//! Tracing setup: human-readable console on stderr, optional JSON file sink.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `--log-level` when set. Readings and reports go to
/// stdout untouched; all diagnostics stay on stderr so output remains
/// machine-consumable. With a log file, the returned guard must stay alive
/// until exit or buffered lines are lost.
pub fn init(log_level: &str, log_file: Option<&Path>) -> eyre::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| eyre::eyre!("invalid log level {log_level:?}: {e}"))?;

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter).with(console);

    if let Some(path) = log_file {
        let file = std::fs::File::create(path)
            .map_err(|e| eyre::eyre!("cannot open log file {}: {e}", path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
            .map_err(|e| eyre::eyre!("tracing init: {e}"))?;
        Ok(Some(guard))
    } else {
        registry
            .try_init()
            .map_err(|e| eyre::eyre!("tracing init: {e}"))?;
        Ok(None)
    }
}
