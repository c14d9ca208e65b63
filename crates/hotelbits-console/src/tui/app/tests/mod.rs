pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::{make_app, make_app_with_store, WIDE_PX};
pub(crate) use widget_board::{BoardState, MemoryStore, LAYOUT_STORAGE_KEY, PERSIST_DEBOUNCE};

mod basic;
