use super::*;
use crate::tui::views::board::title_matches;
use widget_board::{available_widgets, WidgetDefinition};

impl<S: SettingsStore, C: Clock + Clone> App<S, C> {
    // -- selection ----------------------------------------------------------

    /// Selects the next widget, wrapping to the first.
    pub fn select_next(&mut self) {
        let len = self.board.layout().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    /// Selects the previous widget, wrapping to the last.
    pub fn select_previous(&mut self) {
        let len = self.board.layout().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 && i <= len => i - 1,
            _ => len - 1,
        });
    }

    /// Keeps the selection inside the layout after it shrank or was replaced.
    fn clamp_selection(&mut self) {
        let len = self.board.layout().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }

    // -- board edits --------------------------------------------------------

    /// Moves the selected widget `delta` places in board order.
    pub fn move_selected(&mut self, delta: isize) {
        let Some(index) = self.selected else { return };
        match self.board.move_widget(index, delta) {
            Ok(target) => self.selected = Some(target),
            Err(e) => tracing::warn!("move failed: {e}"),
        }
    }

    /// Changes the selected widget's spans.
    pub fn resize_selected(&mut self, column_delta: i32, row_delta: i32) {
        let Some(index) = self.selected else { return };
        if let Err(e) = self.board.resize_widget(index, column_delta, row_delta) {
            tracing::warn!("resize failed: {e}");
        }
    }

    /// Removes the selected widget.
    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected else { return };
        let title = self
            .board
            .layout()
            .get(index)
            .map(|w| w.data.title.clone())
            .unwrap_or_default();
        match self.board.remove_at(index) {
            Ok(()) => {
                self.clamp_selection();
                self.flash(format!("Removed {title}"));
            }
            Err(e) => tracing::warn!("remove failed: {e}"),
        }
    }

    /// Restores the default layout for the current viewport and clears the
    /// stored one.
    pub fn reset_board(&mut self) {
        let width = self.board.viewport_width();
        if let Err(e) = self.board.reset(width) {
            self.flash(format!("Reset failed: {e}"));
        } else {
            self.flash("Board reset to default");
        }
        self.selected = None;
        self.clamp_selection();
        self.board_scroll = 0;
    }

    // -- palette ------------------------------------------------------------

    /// Opens the add-widget palette with an empty filter.
    pub fn open_palette(&mut self) {
        self.palette = PaletteState::default();
        self.focus = Focus::Palette;
    }

    /// Closes the palette without adding anything.
    pub fn close_palette(&mut self) {
        self.focus = Focus::Board;
    }

    /// Widgets the palette currently offers.
    pub fn palette_entries(&self) -> Vec<&WidgetDefinition> {
        available_widgets(
            self.board.catalog(),
            self.board.layout(),
            &self.palette.filter,
        )
    }

    /// Moves the palette highlight by `delta`, clamped to the entries.
    pub fn palette_step(&mut self, delta: isize) {
        let len = self.palette_entries().len();
        self.palette.selected = if len == 0 {
            0
        } else {
            self.palette.selected.saturating_add_signed(delta).min(len - 1)
        };
    }

    /// Appends to the palette filter.
    pub fn palette_push(&mut self, c: char) {
        self.palette.filter.push(c);
        self.palette.selected = 0;
    }

    /// Deletes the last filter character.
    pub fn palette_pop(&mut self) {
        self.palette.filter.pop();
        self.palette.selected = 0;
    }

    /// Adds the highlighted palette widget, selects it and closes the palette.
    pub fn add_from_palette(&mut self) {
        let Some(id) = self
            .palette_entries()
            .get(self.palette.selected)
            .map(|def| def.id.clone())
        else {
            return;
        };
        match self.board.add_widget(&id) {
            Ok(()) => {
                self.selected = Some(self.board.layout().len() - 1);
                self.focus = Focus::Board;
            }
            Err(e) => self.flash(format!("Cannot add widget: {e}")),
        }
    }

    // -- search -------------------------------------------------------------

    /// Focuses the search bar.
    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    /// Leaves the search bar; `clear` also drops the query.
    pub fn leave_search(&mut self, clear: bool) {
        if clear {
            self.search.clear();
        }
        self.focus = Focus::Board;
    }

    /// Whether the widget at `index` matches the search query.
    pub fn matches_search(&self, index: usize) -> bool {
        self.board
            .layout()
            .get(index)
            .is_some_and(|w| title_matches(&w.data.title, &self.search))
    }

    // -- preferences --------------------------------------------------------

    /// Cycles system, light, dark and saves the choice.
    pub fn cycle_theme(&mut self) {
        let theme = self.preferences.theme.next();
        self.preferences.theme = theme;
        match Preferences::save_theme(self.board.store_mut(), theme) {
            Ok(()) => self.flash(format!("Theme: {theme}")),
            Err(e) => self.flash(format!("Theme not saved: {e}")),
        }
    }

    /// Switches density and saves the choice.
    pub fn toggle_density(&mut self) {
        let density = self.preferences.density.toggled();
        self.preferences.density = density;
        match Preferences::save_density(self.board.store_mut(), density) {
            Ok(()) => self.flash(format!("Density: {density}")),
            Err(e) => self.flash(format!("Density not saved: {e}")),
        }
    }

    /// Hides the info banner. Returns whether one was showing.
    pub fn dismiss_banner(&mut self) -> bool {
        self.banner.take().is_some()
    }

    // -- timers -------------------------------------------------------------

    /// Records a terminal resize; the board sees it once resizing settles.
    pub fn on_resize(&mut self, columns: u16) {
        self.resize.schedule(viewport_width(columns), self.clock.now());
    }

    /// Polls the resize and persist debouncers and expires the status
    /// message. Returns whether anything visible changed.
    pub fn on_tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;

        if let Some(width) = self.resize.poll(now) {
            tracing::debug!("viewport width now {width}px");
            self.board.set_viewport_width(width);
        }

        match self.board.poll() {
            Ok(wrote) => changed |= wrote,
            Err(e) => {
                self.flash(format!("Save failed: {e}"));
                changed = true;
            }
        }

        if let Some((_, expiry)) = &self.status_message {
            if now >= *expiry {
                self.status_message = None;
                changed = true;
            }
        }
        changed
    }
}
