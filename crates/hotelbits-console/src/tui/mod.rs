//! Terminal console for the widget board.
//!
//! Built on ratatui and crossterm: a 4-column board of widget panels with
//! keyboard editing, an add-widget palette and a title search.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
