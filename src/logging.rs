//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file so they never corrupt the TUI. The level
//! is taken from `RUST_LOG` when set:
//! - `RUST_LOG=student_feedback=debug` for state transitions and requests
//! - `RUST_LOG=student_feedback=trace` for every key and resize event

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "student_feedback=info,warn";

const APP_DIR: &str = "student-feedback";
const LOG_FILE_PREFIX: &str = "student-feedback.log";

/// Initialize the logging system.
///
/// Logs are written under the platform's local data directory, e.g.
/// `~/.local/share/student-feedback/logs/` on Linux.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Student feedback starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join(APP_DIR).join("logs"))
}

/// Where log files are written, for telling the user.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

pub fn shutdown() {
    tracing::info!("Student feedback shutting down");
}
