//! Main rendering orchestration for the console.
//!
//! Composes header, banner, search bar, board and footer, with the palette
//! overlay on top when open.

use crate::preferences::Mode;
use crate::tui::app::{App, Focus};
use crate::tui::views::board::{render_board, BoardView};
use crate::tui::views::palette::render_palette;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use widget_board::{BoardState, Clock, SettingsStore};

/// Header text displayed at the top of the console.
const HEADER_TEXT: &str = "HotelBits Console";

/// Footer text showing available keybindings.
pub const FOOTER_TEXT: &str =
    "[Tab] Select  [H/L] Move  [+/-] Width  [[/]] Height  [x] Remove  [a] Add  [R] Reset  [t] Theme  [d] Density  [q] Quit";

/// Colors for one [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen background.
    pub background: Color,
    /// Body text.
    pub text: Color,
    /// Labels, borders and hints.
    pub muted: Color,
    /// Values, selection and links.
    pub accent: Color,
    /// Healthy status.
    pub success: Color,
    /// Degraded status.
    pub warning: Color,
    /// Failed status.
    pub danger: Color,
    /// Search-match foreground.
    pub highlight_fg: Color,
    /// Search-match background.
    pub highlight_bg: Color,
}

impl Theme {
    /// Palette for `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                danger: Color::Red,
                highlight_fg: Color::Black,
                highlight_bg: Color::Yellow,
            },
            Mode::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                success: Color::Green,
                warning: Color::Rgb(0xb0, 0x70, 0x00),
                danger: Color::Red,
                highlight_fg: Color::Black,
                highlight_bg: Color::LightYellow,
            },
        }
    }
}

/// Renders the whole console.
pub fn render_console<S, C>(frame: &mut Frame, app: &mut App<S, C>)
where
    S: SettingsStore,
    C: Clock + Clone,
{
    let area = frame.area();
    let theme = Theme::for_mode(app.mode());
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let banner_height = u16::from(app.banner.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // header
            Constraint::Length(banner_height), // info banner
            Constraint::Length(1),             // search bar
            Constraint::Min(3),                // board
            Constraint::Length(1),             // footer
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(app, &theme, chunks[0].width)), chunks[0]);
    if let Some(banner) = &app.banner {
        let line = Line::from(vec![
            Span::styled(" ℹ ", Style::default().fg(theme.accent)),
            Span::styled(banner.as_str(), Style::default().fg(theme.text)),
            Span::styled("  [Esc] Dismiss", Style::default().fg(theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
    frame.render_widget(Paragraph::new(search_line(app, &theme)), chunks[2]);

    let view = BoardView {
        layout: app.board.layout(),
        selected: app.selected,
        search: &app.search,
        density: app.preferences.density,
    };
    render_board(frame, chunks[3], view, &theme, &mut app.board_scroll);

    frame.render_widget(Paragraph::new(footer_line(app, &theme)), chunks[4]);

    if app.focus == Focus::Palette {
        let entries = app.palette_entries();
        render_palette(frame, chunks[3], &entries, &app.palette, &theme);
    }
}

/// Title left; profile, theme and density right.
fn header_line<S, C>(app: &App<S, C>, theme: &Theme, width: u16) -> Line<'static>
where
    S: SettingsStore,
    C: Clock + Clone,
{
    let right = format!(
        "{}  {} · {}",
        app.profile.label(),
        app.preferences.theme,
        app.preferences.density
    );
    let padding = (width as usize)
        .saturating_sub(HEADER_TEXT.chars().count())
        .saturating_sub(right.chars().count());
    Line::from(vec![
        Span::styled(
            HEADER_TEXT,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ])
}

fn search_line<S, C>(app: &App<S, C>, theme: &Theme) -> Line<'static>
where
    S: SettingsStore,
    C: Clock + Clone,
{
    let focused = app.focus == Focus::Search;
    let mut spans = vec![Span::styled(
        "Search: ",
        Style::default().fg(if focused { theme.accent } else { theme.muted }),
    )];
    if app.search.is_empty() && !focused {
        spans.push(Span::styled("[Ctrl+S]", Style::default().fg(theme.muted)));
    } else {
        spans.push(Span::styled(app.search.clone(), Style::default().fg(theme.text)));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        let matches = (0..app.board.layout().len())
            .filter(|&i| app.matches_search(i))
            .count();
        spans.push(Span::styled(
            format!("  {matches} match{}", if matches == 1 { "" } else { "es" }),
            Style::default().fg(theme.muted),
        ));
    }
    Line::from(spans)
}

/// Status message when active, otherwise key hints and save state.
fn footer_line<S, C>(app: &App<S, C>, theme: &Theme) -> Line<'static>
where
    S: SettingsStore,
    C: Clock + Clone,
{
    if let Some(msg) = app.active_status_message() {
        return Line::from(Span::styled(
            msg.to_string(),
            Style::default().fg(theme.warning),
        ));
    }
    let saved = match app.board.state() {
        BoardState::Dirty => Span::styled("● unsaved  ", Style::default().fg(theme.warning)),
        BoardState::Persisted => Span::styled("✓ saved  ", Style::default().fg(theme.success)),
        BoardState::Idle => Span::raw(""),
    };
    Line::from(vec![saved, Span::styled(FOOTER_TEXT, Style::default().fg(theme.muted))])
}
