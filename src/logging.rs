//! File logging for rqw.
//!
//! The alternate screen owns stdout and stderr while the dashboard runs, so
//! every event goes to `<data_local_dir>/rqw/logs/rqw.log.<date>`, one file
//! per day. `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].

use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Our own events at info, everything else (reqwest, hyper) at warn.
const DEFAULT_LOG_FILTER: &str = "rqw=info,warn";

/// The appender appends `.<date>` to this.
const LOG_FILE_PREFIX: &str = "rqw.log";

/// Install the global subscriber.
///
/// `RUST_LOG=rqw=debug` adds every fetch, page and key event.
///
/// # Errors
///
/// Fails if the data directory is unknown, the log directory cannot be
/// created or a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = default_log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    tracing::subscriber::set_global_default(file_subscriber(&log_dir, env_filter()))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rqw starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Subscriber writing plain-text lines with source locations to daily files in `log_dir`.
fn file_subscriber(log_dir: &Path, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn default_log_dir() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("rqw").join("logs"))
}

/// Where the log files are, for the exit diagnostic.
pub fn log_directory() -> Option<PathBuf> {
    default_log_dir().ok()
}

pub fn shutdown() {
    tracing::info!("rqw shutting down");
}
