use std::fs;
use std::io;
use std::path::Path;

use time::macros::format_description;
use time::UtcOffset;
use tracing_subscriber::{self, fmt, prelude::*};
use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logger with stderr output and an optional log file
/// Returns a WorkerGuard that must be kept alive for the duration of the program
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `log_file` - Also append DEBUG-level logs to this file
///
/// Calling this more than once is harmless: the first subscriber stays installed.
pub fn init_logger(no_color: bool, log_level: Option<&str>, log_file: Option<&Path>) -> io::Result<WorkerGuard> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    let (result, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_timer(timer)
                .with_ansi(false)
                .with_filter(tracing_subscriber::EnvFilter::new("debug"));

            let result = tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init();
            (result, guard)
        }
        None => {
            // Dummy guard so callers hold the same type either way
            let (_, guard) = tracing_appender::non_blocking(std::io::sink());
            let result = tracing_subscriber::registry()
                .with(stderr_layer)
                .try_init();
            (result, guard)
        }
    };

    match result {
        Ok(()) => Ok(guard),
        Err(e) => {
            // Ignore errors due to the subscriber or logger already being set
            if e.to_string().contains("already been set") || e.to_string().contains("SetLoggerError") {
                Ok(guard)
            } else {
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}
