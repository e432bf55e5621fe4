//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file so they never draw over the terminal UI.
//! In `--dump` mode they can go to stderr instead.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "datagrid=info,warn";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rotating file in the local data directory.
    File,
    /// Standard error.
    Stderr,
}

/// Initialize the logging system.
///
/// # Log Directory
///
/// File logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/datagrid/logs/`
/// - macOS: `~/Library/Application Support/datagrid/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\datagrid\logs\`
///
/// # Log Levels
///
/// Configure via `RUST_LOG`, e.g. `RUST_LOG=datagrid=debug` to trace every
/// grid operation, or `datagrid=trace` for per-stage pipeline counts.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init(target: LogTarget) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match target {
        LogTarget::File => {
            let log_dir = get_log_directory()?;
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "datagrid.log");

            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
            tracing::debug!(log_dir = %log_dir.display(), "Log directory");
        }
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "datagrid starting up");
    Ok(())
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("datagrid").join("logs"))
}

/// Get the path where logs are stored.
///
/// This is useful for displaying to users where they can find log files.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("datagrid shutting down");
}
