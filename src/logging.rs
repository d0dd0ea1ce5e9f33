//! Log output setup.
//!
//! Records go to stderr unless `--log` names a file, in which case each run
//! appends to it. `RUST_LOG` overrides the level chosen from `--verbose`.

use crate::error::{Result, VersegrepError};
use anyhow::Context;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "versegrep=debug" } else { "warn" }
}

/// Opens the log destination, creating the file and its directory if needed.
pub fn target(log_path: Option<&Path>) -> Result<Target> {
    let Some(path) = log_path else {
        return Ok(Target::Stderr);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(Target::Pipe(Box::new(file)))
}

pub fn init(verbose: bool, log_path: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)));

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(target(log_path)?);

    builder
        .try_init()
        .map_err(|e| VersegrepError::Other(format!("logger already initialised: {e}")))
}
