use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Sends log records to `path`, honouring `RUST_LOG` with an `info` default.
///
/// The terminal belongs to the UI while it runs, so nothing is written to stderr.
///
/// # Errors
/// Returns an error if the file cannot be opened or a logger is already installed.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialised")
}
