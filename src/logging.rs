//! Logging setup on top of `tracing`.
//!
//! The terminal is owned by the table UI, so log lines go to a daily rotated
//! file instead of stderr. Writes are handed to a background worker through
//! `tracing_appender::non_blocking`; keep the returned [`LogGuard`] alive for
//! the lifetime of the program or buffered lines are lost on exit.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "artgrid=info,warn";

/// Log file prefix; the appender adds the date suffix.
const LOG_FILE_PREFIX: &str = "artgrid.log";

/// Flushes pending log lines when dropped.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Install the global tracing subscriber.
///
/// Logs go to `dir` when given, otherwise to `artgrid/logs` under the
/// platform's local data directory (`~/.local/share/artgrid/logs` on Linux).
/// Verbosity follows `RUST_LOG`, e.g. `RUST_LOG=artgrid=debug`.
///
/// # Errors
///
/// Fails if no log directory can be determined or created, or if a global
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// let _guard = artgrid::logging::init(None).expect("logging");
/// tracing::info!("ready");
/// ```
pub fn init(dir: Option<&Path>) -> anyhow::Result<LogGuard> {
    let log_dir = resolve_log_directory(dir)?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "artgrid starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(LogGuard { _worker: worker })
}

/// Pick the log directory, preferring an explicit override.
fn resolve_log_directory(dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.to_path_buf());
    }

    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("artgrid").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("artgrid shutting down");
}
