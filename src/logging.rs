//! Logger setup. The terminal belongs to the UI, so records go to
//! ~/.lane-runner/lane-runner.log.

use crate::utils::persistence;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "lane-runner.log";

/// Build a logger that appends to `path`. `RUST_LOG` overrides `default_filter`.
pub fn file_logger(path: &Path, default_filter: &str) -> io::Result<Builder> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis();
    Ok(builder)
}

/// Install the file logger. Returns where it writes.
///
/// Fails if the file cannot be opened. A logger that was already installed
/// is left in place.
pub fn init(default_filter: &str) -> io::Result<PathBuf> {
    let path = persistence::data_path(LOG_FILE)?;
    let mut builder = file_logger(&path, default_filter)?;
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
    Ok(path)
}

/// Stderr logger for the headless tools.
pub fn init_stderr(default_filter: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(Target::Stderr)
        .try_init();
}
