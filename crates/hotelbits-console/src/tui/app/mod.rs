//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! The board itself lives in a [`BoardManager`]; everything here is view
//! state around it (selection, focus, overlays, preferences).

mod update;

use crate::preferences::{Mode, Preferences};
use crate::profile::{spawn_profile_load, ProfileState};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_console;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use widget_board::{BoardManager, Clock, Debouncer, SettingsStore};

/// Approximate pixel width of one terminal column, for breakpoint selection.
pub const PX_PER_COLUMN: u32 = 8;

/// Banner shown until dismissed.
pub const SYNC_BANNER: &str = "Board synced. Press Ctrl+S to search.";

/// How long transient status messages stay in the footer.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Viewport width in pixels for a terminal `columns` wide.
pub fn viewport_width(columns: u16) -> u32 {
    u32::from(columns) * PX_PER_COLUMN
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Board navigation and editing.
    Board,
    /// Typing into the search bar.
    Search,
    /// Add-widget palette overlay.
    Palette,
}

/// Palette overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteState {
    /// Filter text.
    pub filter: String,
    /// Highlighted row among the filtered entries.
    pub selected: usize,
}

/// Console state.
#[derive(Debug)]
pub struct App<S, C> {
    /// Board and its persistence.
    pub board: BoardManager<S, C>,
    clock: C,
    /// Index into the layout of the selected widget.
    pub selected: Option<usize>,
    /// Input focus.
    pub focus: Focus,
    /// Search query; matching titles are highlighted.
    pub search: String,
    /// Palette state while `focus == Focus::Palette`.
    pub palette: PaletteState,
    /// Theme and density.
    pub preferences: Preferences,
    /// Whether the terminal background is dark, for `System` theme.
    pub system_dark: bool,
    /// Header profile.
    pub profile: ProfileState,
    /// Dismissible info banner.
    pub banner: Option<String>,
    /// Transient footer message with its expiry.
    pub status_message: Option<(String, Instant)>,
    /// First grid row shown, kept so the selection stays visible.
    pub board_scroll: u16,
    /// Pending viewport width from resize events.
    resize: Debouncer<u32>,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl<S: SettingsStore, C: Clock + Clone> App<S, C> {
    /// Wraps a mounted board. Preferences are read from the board's store.
    pub fn new(board: BoardManager<S, C>, clock: C, resize_debounce: Duration) -> Self {
        let preferences = Preferences::load(board.store());
        let selected = if board.layout().is_empty() { None } else { Some(0) };
        Self {
            board,
            clock,
            selected,
            focus: Focus::Board,
            search: String::new(),
            palette: PaletteState::default(),
            preferences,
            system_dark: crate::preferences::system_prefers_dark(),
            profile: ProfileState::Loading,
            banner: Some(SYNC_BANNER.to_string()),
            status_message: None,
            board_scroll: 0,
            resize: Debouncer::new(resize_debounce),
            should_quit: false,
        }
    }

    /// Effective color mode.
    pub fn mode(&self) -> Mode {
        self.preferences.mode(self.system_dark)
    }

    /// Current status message, unless expired.
    pub fn active_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if self.clock.now() < *expiry => Some(msg),
            _ => None,
        }
    }

    /// Shows `msg` in the footer for a few seconds.
    pub fn flash(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), self.clock.now() + STATUS_MESSAGE_TTL));
    }

    /// Runs the TUI: sets up the terminal, enters the event loop, restores on exit.
    pub async fn run(&mut self, tick_rate: Duration, profile_delay: Duration) -> io::Result<()> {
        // Restore the terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;
        let result = self.event_loop(tick_rate, profile_delay).await;
        // restoring fails on a closed tty; save first either way
        let restored = restore_terminal();
        self.shutdown();
        restored?;
        result
    }

    /// Writes any pending layout change. Returns whether a write happened.
    pub fn shutdown(&mut self) -> bool {
        self.board.flush().unwrap_or_else(|e| {
            tracing::error!("failed to save layout on exit: {e}");
            false
        })
    }

    async fn event_loop(&mut self, tick_rate: Duration, profile_delay: Duration) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;

        let (profile_tx, profile_rx) = mpsc::channel(1);
        spawn_profile_load(profile_delay, profile_tx);
        let mut events = EventHandler::new(tick_rate, profile_rx);
        let mut reader = EventStream::new();

        terminal.draw(|frame| render_console(frame, self))?;

        loop {
            let should_render = match events.next(&mut reader).await? {
                Event::Key(key) => match handle_key_event(self, key) {
                    Action::Quit => {
                        self.should_quit = true;
                        return Ok(());
                    }
                    Action::None => true,
                },
                Event::Resize(columns, _) => {
                    self.on_resize(columns);
                    true
                }
                Event::Profile(profile) => {
                    tracing::info!("profile loaded for {}", profile.name);
                    self.profile = ProfileState::Ready(profile);
                    true
                }
                Event::Tick => self.on_tick(),
            };

            if should_render {
                terminal.draw(|frame| render_console(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests;
