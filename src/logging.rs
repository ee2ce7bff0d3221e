//! Tracing setup for the terminal binary.
//!
//! The terminal is in raw mode while playing, so log lines go to a file.
//! `RUST_LOG` overrides the default filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Append tracing output to `path`.
///
/// Idempotent: only the first call installs a subscriber. Returns whether
/// this call was the one that did.
pub fn init_file_logging(path: &Path) -> Result<bool> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    });
    Ok(installed)
}
