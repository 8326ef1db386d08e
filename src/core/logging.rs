//! File-backed logging.
//!
//! The terminal belongs to the game screen, so log records are written to
//! a file in the data directory instead of stderr.

use super::config::data_dir;
use super::constants::LOG_FILE_NAME;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

/// Install the global logger. `RUST_LOG` controls the filter (default `info`).
///
/// Returns the log file path so it can be reported to the user.
pub fn init() -> io::Result<PathBuf> {
    let path = data_dir()?.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
