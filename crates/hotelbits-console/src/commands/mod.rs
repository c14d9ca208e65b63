//! Command implementations for the hotelbits CLI.
//!
//! - `layout` - board layout inspection and edits, widget listing
//! - `prefs` - theme and density preferences
//!
//! Each command opens the settings file named by the configuration, does its
//! work synchronously, and writes human-readable output to `out`. Layout
//! edits are flushed before returning rather than debounced.

pub(crate) mod layout;
pub(crate) mod prefs;

pub(crate) use layout::*;
pub(crate) use prefs::*;

use hotelbits_console::config::error::ConfigError;
use hotelbits_console::config::schema::Config;
use hotelbits_console::tui::app::viewport_width;
use std::path::PathBuf;
use thiserror::Error;
use widget_board::{BoardManager, Catalog, FileStore, SystemClock};

/// Viewport width assumed when none is given and no terminal is attached.
pub(crate) const FALLBACK_VIEWPORT_WIDTH: u32 = 1440;

/// Errors surfaced by the CLI commands.
#[derive(Error, Debug)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Board(#[from] widget_board::Error),

    /// `layout remove` named a widget that is not placed.
    #[error("Widget not on the board: {0}")]
    NotOnBoard(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub(crate) type Result<T> = std::result::Result<T, CommandError>;

/// Board as the CLI sees it: backed by the settings file, real time.
pub(crate) type FileBoard = BoardManager<FileStore, SystemClock>;

/// Resolved inputs shared by all commands.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub(crate) config: Config,
    /// Settings file, after `--store` and config resolution.
    pub(crate) store_path: PathBuf,
}

impl Context {
    /// Uses the configured store path unless `store_override` is given.
    pub(crate) fn new(config: Config, store_override: Option<PathBuf>) -> Self {
        let store_path = store_override.unwrap_or_else(|| config.board.store_path());
        Self { config, store_path }
    }

    pub(crate) fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    /// Mounts the board at `viewport_width`.
    pub(crate) fn open_board(&self, viewport_width: u32) -> Result<FileBoard> {
        let options = self.config.board.board_options()?;
        Ok(BoardManager::mount(
            self.store(),
            SystemClock,
            Catalog::builtin(),
            viewport_width,
            options,
        ))
    }
}

/// Terminal width in pixels, or [`FALLBACK_VIEWPORT_WIDTH`] without a terminal.
pub(crate) fn detect_viewport_width() -> u32 {
    crossterm::terminal::size()
        .map(|(columns, _)| viewport_width(columns))
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}
