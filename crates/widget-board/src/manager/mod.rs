//! Board state manager
//!
//! Owns the live [`BoardLayout`] and keeps the store in sync with it:
//!
//! ```text
//! Idle --change--> Dirty --debounce elapsed--> Persisted --poll--> Idle
//!                    ^  \__change (reschedule)__/
//! ```
//!
//! Every change goes through [`BoardManager::apply_change`], which accepts
//! the full post-edit sequence verbatim. Writes are coalesced by a
//! [`Debouncer`]; the owner calls [`BoardManager::poll`] periodically (and
//! [`BoardManager::flush`] before shutting down).

use crate::catalog::Catalog;
use crate::error::Result;
use crate::layout::{self, BoardLayout};
use crate::schedule::{Clock, Debouncer};
use crate::store::SettingsStore;
use crate::types::PlacedWidget;
use std::time::{Duration, Instant};

/// Store key holding the serialized layout.
pub const LAYOUT_STORAGE_KEY: &str = "dashboard-layout-v11";

/// Delay between the last change and the write.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Persistence state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    /// Store matches the layout (or was deliberately cleared) and nothing is pending
    Idle,
    /// A write is pending
    Dirty,
    /// The last poll wrote the layout
    Persisted,
}

/// Tunables for [`BoardManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardOptions {
    /// Store key for the layout
    pub storage_key: String,
    /// Debounce before writing
    pub persist_debounce: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            storage_key: LAYOUT_STORAGE_KEY.to_string(),
            persist_debounce: PERSIST_DEBOUNCE,
        }
    }
}

/// Live board with debounced persistence.
#[derive(Debug)]
pub struct BoardManager<S, C> {
    store: S,
    clock: C,
    catalog: Catalog,
    storage_key: String,
    layout: BoardLayout,
    viewport_width: u32,
    pending: Debouncer<BoardLayout>,
    state: BoardState,
}

impl<S: SettingsStore, C: Clock> BoardManager<S, C> {
    /// Builds the board from the store, or from the default layout for
    /// `viewport_width` when the store has no usable layout.
    ///
    /// A store read failure is logged and treated as an empty store.
    pub fn mount(
        store: S,
        clock: C,
        catalog: Catalog,
        viewport_width: u32,
        options: BoardOptions,
    ) -> Self {
        let stored = store.get(&options.storage_key).unwrap_or_else(|e| {
            log::error!("failed to read stored layout: {e}");
            None
        });
        let layout = layout::load_initial_layout(&catalog, stored.as_deref(), viewport_width);
        log::info!(
            "board mounted with {} widgets ({})",
            layout.len(),
            if stored.is_some() { "stored" } else { "default" }
        );

        Self {
            store,
            clock,
            catalog,
            storage_key: options.storage_key,
            layout,
            viewport_width,
            pending: Debouncer::new(options.persist_debounce),
            state: BoardState::Idle,
        }
    }

    /// Current layout.
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Catalog used for lookups.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Persistence state.
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Viewport width used for defaults.
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store, for other keys.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// When the pending write becomes due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Records a new viewport width. Only [`Self::reset`] uses it; the live
    /// layout is left alone.
    pub fn set_viewport_width(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
    }

    /// Replaces the layout with the full post-interaction sequence and
    /// schedules a write. No overlap or catalog validation is done.
    pub fn apply_change(&mut self, items: Vec<PlacedWidget>) {
        self.layout = BoardLayout::new(items);
        self.pending.schedule(self.layout.clone(), self.clock.now());
        self.state = BoardState::Dirty;
    }

    /// Appends a widget with its catalog default spans.
    pub fn add_widget(&mut self, widget_id: &str) -> Result<()> {
        let next = layout::add_widget(&self.catalog, &self.layout, widget_id)?;
        log::info!("added widget {widget_id}");
        self.apply_change(next.into_items());
        Ok(())
    }

    /// Removes every placement of `widget_id`. Returns whether any was removed.
    pub fn remove_widget(&mut self, widget_id: &str) -> bool {
        let next = self.layout.without_widget(widget_id);
        if next.len() == self.layout.len() {
            return false;
        }
        log::info!("removed widget {widget_id}");
        self.apply_change(next.into_items());
        true
    }

    /// Removes the placement at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        let next = self.layout.without_index(index)?;
        self.apply_change(next.into_items());
        Ok(())
    }

    /// Moves the placement at `index` by `delta` positions. Returns its new index.
    pub fn move_widget(&mut self, index: usize, delta: isize) -> Result<usize> {
        let next = self.layout.moved(index, delta)?;
        let target = index.saturating_add_signed(delta).min(next.len() - 1);
        if target != index {
            self.apply_change(next.into_items());
        }
        Ok(target)
    }

    /// Resizes the placement at `index` within its catalog bounds.
    pub fn resize_widget(&mut self, index: usize, column_delta: i32, row_delta: i32) -> Result<()> {
        let next = self
            .layout
            .resized(&self.catalog, index, column_delta, row_delta)?;
        if next != self.layout {
            self.apply_change(next.into_items());
        }
        Ok(())
    }

    /// Writes the pending layout if its debounce has elapsed.
    ///
    /// Returns `Ok(true)` when a write happened. A failed write is logged,
    /// returned, and leaves the board dirty; the layout is rescheduled so the
    /// next poll after another debounce retries it.
    pub fn poll(&mut self) -> Result<bool> {
        let now = self.clock.now();
        match self.pending.poll(now) {
            Some(layout) => self.write(layout, now).map(|()| true),
            None => {
                if self.state == BoardState::Persisted {
                    self.state = BoardState::Idle;
                }
                Ok(false)
            }
        }
    }

    /// Writes any pending layout immediately.
    pub fn flush(&mut self) -> Result<bool> {
        let now = self.clock.now();
        match self.pending.take() {
            Some(layout) => self.write(layout, now).map(|()| true),
            None => Ok(false),
        }
    }

    /// Clears the stored layout, drops any pending write, and rebuilds the
    /// default layout for `viewport_width`.
    ///
    /// The layout is reset even when clearing the store fails; the error is
    /// returned after.
    pub fn reset(&mut self, viewport_width: u32) -> Result<()> {
        self.viewport_width = viewport_width;
        self.pending.cancel();
        self.layout = layout::compute_default_layout(&self.catalog, viewport_width);
        self.state = BoardState::Idle;
        log::info!("board reset to default for width {viewport_width}");
        self.store.remove(&self.storage_key)
    }

    fn write(&mut self, layout: BoardLayout, now: Instant) -> Result<()> {
        let result = layout
            .to_storage_json()
            .and_then(|json| self.store.set(&self.storage_key, &json));
        match result {
            Ok(()) => {
                log::debug!("persisted {} widgets", layout.len());
                self.state = BoardState::Persisted;
                Ok(())
            }
            Err(e) => {
                log::error!("failed to persist layout: {e}");
                self.pending.schedule(layout, now);
                self.state = BoardState::Dirty;
                Err(e)
            }
        }
    }
}
