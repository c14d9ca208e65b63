//! Add-widget palette overlay.

use crate::tui::app::PaletteState;
use crate::tui::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use widget_board::WidgetDefinition;

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Draws the palette over `area`: filter input on top, matching widgets below.
pub fn render_palette(
    frame: &mut Frame,
    area: Rect,
    entries: &[&WidgetDefinition],
    state: &PaletteState,
    theme: &Theme,
) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(
            " Add widget ",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " [Enter] Add  [Esc] Close ",
            Style::default().fg(theme.muted),
        )))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let filter = Paragraph::new(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(theme.muted)),
        Span::styled(state.filter.as_str(), Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.accent)),
    ]));
    frame.render_widget(filter, chunks[0]);

    if entries.is_empty() {
        let none = Paragraph::new(Span::styled(
            "No widgets match.",
            Style::default().fg(theme.muted),
        ));
        frame.render_widget(none, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = entries.iter().map(|def| palette_item(def, theme)).collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(state.selected.min(entries.len() - 1)));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn palette_item(def: &WidgetDefinition, theme: &Theme) -> ListItem<'static> {
    let mut spans = vec![Span::raw(def.title.clone())];
    let sizing = def.sizing;
    if let (Some(columns), Some(rows)) = (sizing.default_column_span, sizing.default_row_span) {
        spans.push(Span::styled(
            format!("  {columns}x{rows}"),
            Style::default().fg(theme.muted),
        ));
    }
    if let Some(description) = &def.description {
        spans.push(Span::styled(
            format!("  {description}"),
            Style::default().fg(theme.muted),
        ));
    }
    ListItem::new(Line::from(spans))
}
