//! File logging via `tracing`.
//!
//! The terminal belongs to the TUI, so events go to a daily rolling file
//! instead of stderr. `RUST_LOG` overrides the configured filter.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global subscriber. Keep the returned guard alive for the
/// whole process or buffered lines are lost on exit.
pub fn init(settings: &LoggingSettings, directory: &Path) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(directory, "playlog.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(guard)
}
