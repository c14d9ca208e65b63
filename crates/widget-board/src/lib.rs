//! Persisted widget board layout
//!
//! This crate owns the state behind a rearrangeable dashboard board: the
//! static widget catalog, the ordered list of placed widgets, the
//! viewport-dependent default layout, and the debounced write-back of
//! placements to a key-value store.
//!
//! Rendering is not handled here. A placed widget carries an opaque
//! [`WidgetKind`] that the rendering layer maps to actual content.
//!
//! # Persistence
//!
//! Only `{id, columnSpan, rowSpan}` per placement is written, as a JSON array
//! under a single key (see [`LAYOUT_STORAGE_KEY`]). Titles and providers are
//! re-derived from the catalog on every load, so a widget whose catalog entry
//! disappeared still loads, titled [`PLACEHOLDER_TITLE`].
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use widget_board::{BoardManager, BoardOptions, Catalog, ManualClock, MemoryStore};
//!
//! let clock = ManualClock::new();
//! let mut board = BoardManager::mount(
//!     MemoryStore::new(),
//!     clock.clone(),
//!     Catalog::builtin(),
//!     1280,
//!     BoardOptions::default(),
//! );
//! board.add_widget("instance-limits").expect("widget is in the catalog");
//!
//! clock.advance(Duration::from_millis(500));
//! assert!(board.poll().expect("memory store never fails"));
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod layout;
mod manager;
mod palette;
mod schedule;
mod store;
mod types;

pub use catalog::{
    Breakpoint, Catalog, BOARD_COLUMNS, DEFAULT_COLUMN_SPAN, DEFAULT_ROW_SPAN, MAX_ROW_SPAN,
    MEDIUM_MIN_WIDTH, PLACEHOLDER_TITLE, WIDE_MIN_WIDTH,
};
pub use error::{BoardError, Error, Result, StoreError};
pub use layout::{add_widget, compute_default_layout, load_initial_layout, BoardLayout};
pub use manager::{BoardManager, BoardOptions, BoardState, LAYOUT_STORAGE_KEY, PERSIST_DEBOUNCE};
pub use palette::available_widgets;
pub use schedule::{Clock, Debouncer, ManualClock, SystemClock};
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use types::{PlacedWidget, StoredPlacement, WidgetData, WidgetDefinition, WidgetKind, WidgetSizing};
