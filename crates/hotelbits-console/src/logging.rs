//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `HOTELBITS_LOG` environment variable, falling back to the configured
//! `[logging] level`. Records emitted through the `log` facade (the board
//! library) reach the same subscriber through `tracing-log`.
//!
//! ```bash
//! HOTELBITS_LOG=debug hotelbits layout show
//! HOTELBITS_LOG=widget_board=trace,info hotelbits tui
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "HOTELBITS_LOG";

/// Builds the filter from `HOTELBITS_LOG`, or `fallback` when unset or invalid.
pub fn env_filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Logs to stderr. Used by every command except the TUI.
///
/// Does nothing if a global subscriber is already set.
pub fn init_stderr(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to `path` (appending), since the TUI owns stdout and stderr.
pub fn init_file(level: LogLevel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
