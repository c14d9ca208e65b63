//! Event handling for the TUI.
//!
//! Merges crossterm input, a periodic tick and the profile loader into one
//! stream, and maps keys onto [`App`] operations.

use crate::profile::Profile;
use crate::tui::app::{App, Focus};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use widget_board::{Clock, SettingsStore};

/// Application-level event variants.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// The profile finished loading.
    Profile(Profile),
    /// Periodic tick for debounce polling.
    Tick,
}

/// Event source merging terminal input with ticks and the profile channel.
pub struct EventHandler {
    tick: Interval,
    profile_rx: mpsc::Receiver<Profile>,
    profile_open: bool,
}

impl EventHandler {
    /// Creates a handler ticking every `tick_rate`.
    pub fn new(tick_rate: Duration, profile_rx: mpsc::Receiver<Profile>) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            tick,
            profile_rx,
            profile_open: true,
        }
    }

    /// Waits for the next event.
    pub async fn next(&mut self, reader: &mut EventStream) -> std::io::Result<Event> {
        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                            return Ok(Event::Key(key));
                        }
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore key releases, focus, mouse and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                profile = self.profile_rx.recv(), if self.profile_open => {
                    match profile {
                        Some(profile) => return Ok(Event::Profile(profile)),
                        None => self.profile_open = false,
                    }
                }
                _ = self.tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    None,
    /// Quit the application.
    Quit,
}

/// Handles a key event according to the current focus.
pub fn handle_key_event<S, C>(app: &mut App<S, C>, key: KeyEvent) -> Action
where
    S: SettingsStore,
    C: Clock + Clone,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.focus {
        Focus::Palette => handle_palette_key(app, key),
        Focus::Search => handle_search_key(app, key),
        Focus::Board => return handle_board_key(app, key, ctrl),
    }
    Action::None
}

fn handle_board_key<S, C>(app: &mut App<S, C>, key: KeyEvent, ctrl: bool) -> Action
where
    S: SettingsStore,
    C: Clock + Clone,
{
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('s') if ctrl => app.focus_search(),
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Down => app.select_next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up => app.select_previous(),
        KeyCode::Char('H') => app.move_selected(-1),
        KeyCode::Char('L') => app.move_selected(1),
        KeyCode::Char('+') | KeyCode::Char('=') => app.resize_selected(1, 0),
        KeyCode::Char('-') => app.resize_selected(-1, 0),
        KeyCode::Char(']') => app.resize_selected(0, 1),
        KeyCode::Char('[') => app.resize_selected(0, -1),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('a') => app.open_palette(),
        KeyCode::Char('R') => app.reset_board(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('d') => app.toggle_density(),
        KeyCode::Esc => {
            if !app.dismiss_banner() {
                app.selected = None;
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_palette_key<S, C>(app: &mut App<S, C>, key: KeyEvent)
where
    S: SettingsStore,
    C: Clock + Clone,
{
    match key.code {
        KeyCode::Esc => app.close_palette(),
        KeyCode::Enter => app.add_from_palette(),
        KeyCode::Down | KeyCode::Tab => app.palette_step(1),
        KeyCode::Up | KeyCode::BackTab => app.palette_step(-1),
        KeyCode::Backspace => app.palette_pop(),
        KeyCode::Char(c) if !is_ctrl(key) => app.palette_push(c),
        _ => {}
    }
}

fn handle_search_key<S, C>(app: &mut App<S, C>, key: KeyEvent)
where
    S: SettingsStore,
    C: Clock + Clone,
{
    match key.code {
        KeyCode::Esc => app.leave_search(true),
        KeyCode::Enter => app.leave_search(false),
        KeyCode::Backspace => {
            app.search.pop();
        }
        KeyCode::Char(c) if !is_ctrl(key) => app.search.push(c),
        _ => {}
    }
}

fn is_ctrl(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests;
