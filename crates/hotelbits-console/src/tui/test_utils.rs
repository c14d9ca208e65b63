//! Shared test utilities for TUI testing with ratatui TestBackend.

use crate::tui::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use std::time::Duration;
use widget_board::{BoardManager, BoardOptions, Catalog, ManualClock, MemoryStore};

/// App type used throughout the TUI tests.
pub type TestApp = App<MemoryStore, ManualClock>;

/// Viewport width that selects the wide default layout.
pub const WIDE_PX: u32 = 1440;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Mounts an app over `store` at `width` pixels, with a manual clock.
pub fn make_app_with_store(store: MemoryStore, width: u32) -> (TestApp, ManualClock) {
    let clock = ManualClock::new();
    let board = BoardManager::mount(
        store,
        clock.clone(),
        Catalog::builtin(),
        width,
        BoardOptions::default(),
    );
    let mut app = App::new(board, clock.clone(), Duration::from_millis(100));
    // tests must not depend on the runner's terminal
    app.system_dark = true;
    (app, clock)
}

/// Mounts an app with an empty store and the wide default layout.
pub fn make_app() -> (TestApp, ManualClock) {
    make_app_with_store(MemoryStore::new(), WIDE_PX)
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Whole buffer as text, one line per row.
pub fn buffer_text(buffer: &Buffer) -> String {
    (0..buffer.area().height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|&row| row_text(buffer, row).contains(text))
}

/// Column of the first occurrence of `text` in `row`, counted in cells.
pub fn find_col_in_row(buffer: &Buffer, row: u16, text: &str) -> Option<u16> {
    let first = text.chars().next()?;
    let width = buffer.area().width;
    (0..width).find(|&col| {
        buffer.cell((col, row)).is_some_and(|c| c.symbol().starts_with(first))
            && (0..text.chars().count() as u16).all(|i| {
                buffer
                    .cell((col + i, row))
                    .zip(text.chars().nth(i as usize))
                    .is_some_and(|(cell, ch)| cell.symbol().starts_with(ch))
            })
    })
}

/// Asserts that the cell at (col, row) has the specified background color.
pub fn assert_bg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.bg, color,
        "expected bg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.bg
    );
}
