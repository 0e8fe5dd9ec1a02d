//! Logging infrastructure for the block generator.
//!
//! Library code logs through `tracing` macros only. The functions here
//! install a global subscriber for whoever drives the pipeline:
//! - stderr output filtered by `RUST_LOG` or a default level
//! - optional daily log files via `tracing-appender`
//!
//! # Example
//!
//! ```no_run
//! use brg_core::logging::{init_tracing, LogLevel};
//!
//! init_tracing(LogLevel::Debug);
//! tracing::info!("ready");
//! ```

mod types;

pub use types::LogLevel;

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;

/// Prefix of daily log files.
const LOG_FILE_PREFIX: &str = "brg";

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(env_filter(default_level))
        .init();
}

/// Initialize tracing with stderr output plus a daily log file in `logs_dir`.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the program.
pub fn init_tracing_with_file(
    default_level: LogLevel,
    logs_dir: &Path,
) -> Result<WorkerGuard, InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(env_filter(default_level))
        .init();

    Ok(guard)
}

/// Initialize tracing as described by the `[logging]` config section.
///
/// Falls back to stderr-only logging if the log directory cannot be used.
pub fn init_from_settings(settings: &Settings) -> Option<WorkerGuard> {
    let level = settings.logging.level;
    if !settings.logging.log_to_file {
        init_tracing(level);
        return None;
    }

    let logs_dir = Path::new(&settings.paths.logs_folder);
    match init_tracing_with_file(level, logs_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            init_tracing(level);
            tracing::warn!("File logging disabled, cannot use '{}': {}", logs_dir.display(), e);
            None
        }
    }
}

/// Initialize tracing for tests (only logs warnings and above).
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()))
}
