//! Logging utilities
//!
//! The terminal belongs to the UI, so log records go to a size-rotated file
//! in the user cache directory instead of stderr.
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use env_logger::{Builder, Env, Target, fmt::TimestampPrecision};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::LevelFilter;

/// Name of the active log file.
const LOG_FILE_NAME: &str = "devhub.log";

/// Size at which the log file is rotated.
const MAX_LOG_BYTES: usize = 1024 * 1024;

/// Number of rotated files kept next to the active one.
const KEPT_LOG_FILES: usize = 3;

/// Path of the active log file.
///
/// # Errors
///
/// Returns an error if the user cache directory cannot be determined.
pub fn log_file_path() -> Result<PathBuf>
{
    let dirs = BaseDirs::new().context("Failed to determine the user cache directory")?;

    Ok(dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Initializes the logging system for the application.
///
/// Info and above is logged by default, debug for this crate. `RUST_LOG`
/// overrides both.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the logger
/// was already initialized.
pub fn init_logging() -> Result<()>
{
    let log_path = log_file_path()?;

    if let Some(parent) = log_path.parent()
    {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }

    let log_file = FileRotate::new(
        &log_path,
        AppendCount::new(KEPT_LOG_FILES),
        ContentLimit::Bytes(MAX_LOG_BYTES),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("devhub", LevelFilter::Debug)
        .parse_env(Env::default())
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("Failed to initialize logger")
}

/// Removes the active log file.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_log_file() -> Result<()>
{
    let log_path = log_file_path()?;

    if !log_path.exists()
    {
        return Ok(());
    }

    // Truncate first so a logger still holding the file stops growing it.
    File::create(&log_path).context("Failed to truncate log file")?;
    fs::remove_file(&log_path)
        .with_context(|| format!("Failed to remove log file: {}", log_path.display()))
}
