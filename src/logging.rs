//! Log setup
//!
//! The terminal belongs to the view, so logs always go to a file. The filter
//! is read from `NOTEBOARD_LOG` (same syntax as `RUST_LOG`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "NOTEBOARD_LOG";

/// Filter used when `NOTEBOARD_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Default log location: `~/.cache/noteboard/noteboard.log`
#[must_use]
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("noteboard")
        .join("noteboard.log")
}

/// Filter from `NOTEBOARD_LOG`, falling back to [`DEFAULT_FILTER`]
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path`
///
/// Parent directories are created as needed and the file is appended to.
/// Calling this twice keeps the first subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        "logging initialized"
    );
    Ok(())
}
