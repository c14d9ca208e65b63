//! HotelBits operations console library
//!
//! Terminal front end over a [`widget_board`] board: configuration, logging,
//! display preferences, and the ratatui dashboard itself. The `hotelbits`
//! binary wires these together behind a clap CLI.
//!
//! # Platform Support
//!
//! Unix-like systems (Linux, macOS). Paths follow the XDG base directory
//! layout on both.

/// Configuration loading, defaults, and XDG path resolution.
pub mod config;

/// tracing subscriber setup.
pub mod logging;

/// Theme and density preferences stored next to the layout.
pub mod preferences;

/// Operator profile shown in the header.
pub mod profile;

/// Terminal user interface.
pub mod tui;
