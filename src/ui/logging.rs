//! Logging utilities
//!
//! The terminal belongs to the UI, so log records go to a file in the user's
//! cache directory instead.

use anyhow::{Context, Result};
use directories::BaseDirs;
use env_logger::{Builder, Target, fmt::TimestampPrecision};
use log::LevelFilter;
use std::fs::{File, remove_file};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the log file inside the cache directory.
const LOG_FILE_NAME: &str = "album_viewer.log";

// Static log file path that can be accessed from other modules
static LOG_FILE: LazyLock<PathBuf> = LazyLock::new(|| {
    BaseDirs::new()
        .map_or_else(std::env::temp_dir, |dirs| dirs.cache_dir().to_path_buf())
        .join(LOG_FILE_NAME)
});

/// Path of the log file.
#[must_use]
pub fn log_file_path() -> &'static Path
{
    LOG_FILE.as_path()
}

/// Initializes the logging system for the application.
///
/// Records are appended to [`log_file_path`] with millisecond timestamps,
/// `Info` for dependencies and `Debug` for this crate.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or created.
pub fn init_logging() -> Result<()>
{
    let log_file = File::options()
        .append(true)
        .create(true)
        .open(log_file_path())
        .with_context(|| {
            format!("Failed to open log file {}", log_file_path().display())
        })?;

    // Initialize the logger
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("album_viewer", LevelFilter::Debug)
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("A logger is already installed")
}

/// Removes the log file. A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_log_file() -> Result<()>
{
    let path = log_file_path();

    if !path.exists()
    {
        return Ok(());
    }

    remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))
}
