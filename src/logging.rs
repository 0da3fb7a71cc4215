//! File-backed logging.
//!
//! The terminal belongs to the UI, so log records never go to stderr. Without
//! `--log-file` no logger is installed and the `log` macros are no-ops.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};
use log::info;

use crate::error::{Error, Result};

pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    info!("phonecade {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}
