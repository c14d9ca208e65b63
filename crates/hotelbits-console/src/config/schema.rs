//! TOML configuration schema.
//!
//! Every section is `#[serde(default)]`, so an empty file (or a missing one)
//! yields [`Config::default()`]. Durations stay as human-readable strings in
//! the schema and are parsed with `humantime` on access, which keeps
//! `config validate` able to point at the offending key.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use widget_board::{BoardOptions, LAYOUT_STORAGE_KEY};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// `[board]` section.
    pub board: BoardConfig,
    /// `[tui]` section.
    pub tui: TuiConfig,
    /// `[logging]` section.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses every duration field, returning the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.persist_debounce()?;
        self.board.resize_debounce()?;
        self.tui.tick_rate()?;
        self.tui.profile_delay()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Board persistence settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Delay between the last layout change and the write (default `"500ms"`).
    pub persist_debounce: String,
    /// Quiet period before a terminal resize updates the viewport width
    /// (default `"100ms"`).
    pub resize_debounce: String,
    /// Store key for the layout.
    pub storage_key: String,
    /// Settings file. Empty string means `$XDG_DATA_HOME/hotelbits/storage.json`.
    pub store_path: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            persist_debounce: "500ms".to_string(),
            resize_debounce: "100ms".to_string(),
            storage_key: LAYOUT_STORAGE_KEY.to_string(),
            store_path: String::new(),
        }
    }
}

impl BoardConfig {
    /// Parsed `persist_debounce`.
    pub fn persist_debounce(&self) -> Result<Duration, ConfigError> {
        parse_duration("board.persist_debounce", &self.persist_debounce)
    }

    /// Parsed `resize_debounce`.
    pub fn resize_debounce(&self) -> Result<Duration, ConfigError> {
        parse_duration("board.resize_debounce", &self.resize_debounce)
    }

    /// Resolved settings file path.
    pub fn store_path(&self) -> PathBuf {
        if self.store_path.trim().is_empty() {
            xdg::store_path()
        } else {
            xdg::expand_tilde(&self.store_path)
        }
    }

    /// Options for mounting a board manager.
    pub fn board_options(&self) -> Result<BoardOptions, ConfigError> {
        Ok(BoardOptions {
            storage_key: self.storage_key.clone(),
            persist_debounce: self.persist_debounce()?,
        })
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal UI settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Redraw/poll interval (default `"100ms"`).
    pub tick_rate: String,
    /// Simulated profile load time (default `"3s"`).
    pub profile_delay: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "100ms".to_string(),
            profile_delay: "3s".to_string(),
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }

    /// Parsed `profile_delay`.
    pub fn profile_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.profile_delay", &self.profile_delay)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity when `HOTELBITS_LOG` is unset.
    pub level: LogLevel,
    /// Log file for the TUI. Empty string means `$XDG_DATA_HOME/hotelbits/hotelbits.log`.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Resolved TUI log file path.
    pub fn file_path(&self) -> PathBuf {
        if self.file.trim().is_empty() {
            xdg::log_path()
        } else {
            xdg::expand_tilde(&self.file)
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
