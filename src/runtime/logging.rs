use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Where log output goes, or `None` when logging is switched off or no
/// location can be derived.
pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    if !settings.enabled {
        return None;
    }
    settings.file.clone().or_else(default_log_path)
}

/// `RUST_LOG` wins over the configured directive; a directive that does not
/// parse falls back to `info`.
pub fn env_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the log file.
///
/// The terminal is in raw mode on the alternate screen for the whole run,
/// so nothing is ever written to stdout or stderr. Returns the file in use.
pub fn init(settings: &LogSettings) -> Result<Option<PathBuf>> {
    let Some(path) = log_path(settings) else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(env_filter(settings))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}
