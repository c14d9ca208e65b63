//! Board view: packs placements into the 4-column grid and draws each
//! widget as a bordered panel with mock content for its kind.

use crate::preferences::Density;
use crate::tui::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};
use widget_board::{BoardLayout, PlacedWidget, WidgetKind, BOARD_COLUMNS, MAX_ROW_SPAN};

/// Terminal lines per grid row.
pub const ROW_LINES: u16 = 3;

const GRID_COLUMNS: usize = BOARD_COLUMNS as usize;

/// Grid position of one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index into the layout.
    pub index: usize,
    /// Leftmost grid column.
    pub column: u16,
    /// Top grid row.
    pub row: u16,
    /// Width in grid columns.
    pub columns: u16,
    /// Height in grid rows.
    pub rows: u16,
}

impl Slot {
    fn overlaps(&self, other: &Slot) -> bool {
        self.column < other.column + other.columns
            && other.column < self.column + self.columns
            && self.row < other.row + other.rows
            && other.row < self.row + self.rows
    }
}

/// Places every widget, in layout order, at the first free position at or
/// after the previous widget's position (reading order). Slots never
/// overlap and reading order matches layout order.
pub fn pack(layout: &BoardLayout) -> Vec<Slot> {
    let mut occupied: Vec<[bool; GRID_COLUMNS]> = Vec::new();
    let mut cursor = (0usize, 0usize);
    let mut slots = Vec::with_capacity(layout.len());

    for (index, widget) in layout.items().iter().enumerate() {
        let columns = (widget.effective_column_span() as usize).clamp(1, GRID_COLUMNS);
        let rows = (widget.effective_row_span() as usize).clamp(1, MAX_ROW_SPAN as usize);

        let (row, column) = first_fit(&occupied, cursor, columns, rows);
        if occupied.len() < row + rows {
            occupied.resize(row + rows, [false; GRID_COLUMNS]);
        }
        for line in &mut occupied[row..row + rows] {
            for cell in &mut line[column..column + columns] {
                *cell = true;
            }
        }
        cursor = (row, column);
        slots.push(Slot {
            index,
            column: column as u16,
            row: row as u16,
            columns: columns as u16,
            rows: rows as u16,
        });
    }
    slots
}

fn first_fit(
    occupied: &[[bool; GRID_COLUMNS]],
    cursor: (usize, usize),
    columns: usize,
    rows: usize,
) -> (usize, usize) {
    let free = |row: usize, column: usize| {
        (row..row + rows).all(|r| {
            occupied
                .get(r)
                .map_or(true, |line| line[column..column + columns].iter().all(|c| !c))
        })
    };
    let mut row = cursor.0;
    let mut start = cursor.1;
    // rows past the occupied area are always free, so this terminates
    loop {
        if let Some(column) = (start..=GRID_COLUMNS - columns).find(|&c| free(row, c)) {
            return (row, column);
        }
        row += 1;
        start = 0;
    }
}

/// Number of grid rows the packed board needs.
pub fn grid_height(slots: &[Slot]) -> u16 {
    slots.iter().map(|s| s.row + s.rows).max().unwrap_or(0)
}

/// Whether `title` contains the (trimmed, case-insensitive) search query.
/// An empty query matches nothing.
pub fn title_matches(title: &str, query: &str) -> bool {
    let query = query.trim();
    !query.is_empty() && title.to_lowercase().contains(&query.to_lowercase())
}

/// Inputs of [`render_board`].
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    /// Layout to draw.
    pub layout: &'a BoardLayout,
    /// Selected placement.
    pub selected: Option<usize>,
    /// Search query for title highlighting.
    pub search: &'a str,
    /// Panel padding.
    pub density: Density,
}

/// Draws the board into `area`, adjusting `scroll` (in grid rows) so the
/// selected widget is visible.
pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    view: BoardView<'_>,
    theme: &Theme,
    scroll: &mut u16,
) {
    if view.layout.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "The board is empty. Press [a] to add a widget or [R] to restore the default.",
                Style::default().fg(theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        *scroll = 0;
        return;
    }

    let slots = pack(view.layout);
    let visible_rows = (area.height / ROW_LINES).max(1);
    *scroll = (*scroll).min(grid_height(&slots).saturating_sub(visible_rows));
    if let Some(slot) = view.selected.and_then(|i| slots.iter().find(|s| s.index == i)) {
        if slot.row < *scroll {
            *scroll = slot.row;
        } else if slot.row + slot.rows > *scroll + visible_rows {
            *scroll = (slot.row + slot.rows).saturating_sub(visible_rows).min(slot.row);
        }
    }

    let column_width = area.width / GRID_COLUMNS as u16;
    for slot in &slots {
        let Some(rect) = slot_rect(area, slot, column_width, *scroll) else {
            continue;
        };
        if let Some(widget) = view.layout.get(slot.index) {
            let selected = view.selected == Some(slot.index);
            let matched = title_matches(&widget.data.title, view.search);
            render_panel(frame, rect, widget, selected, matched, view.density, theme);
        }
    }
}

/// Screen rectangle of `slot`, clipped to `area`; `None` when scrolled out.
fn slot_rect(area: Rect, slot: &Slot, column_width: u16, scroll: u16) -> Option<Rect> {
    let top = i32::from(slot.row) - i32::from(scroll);
    let y0 = (top * i32::from(ROW_LINES)).max(0);
    let y1 = ((top + i32::from(slot.rows)) * i32::from(ROW_LINES)).min(i32::from(area.height));
    if y1 <= y0 {
        return None;
    }

    let x = slot.column * column_width;
    // the last grid column absorbs the division remainder
    let width = if slot.column + slot.columns >= GRID_COLUMNS as u16 {
        area.width - x
    } else {
        slot.columns * column_width
    };
    Some(Rect {
        x: area.x + x,
        y: area.y + y0 as u16,
        width,
        height: (y1 - y0) as u16,
    })
}

fn render_panel(
    frame: &mut Frame,
    rect: Rect,
    widget: &PlacedWidget,
    selected: bool,
    matched: bool,
    density: Density,
    theme: &Theme,
) {
    let title_style = if matched {
        Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    let (border_style, border_type) = if selected {
        (
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            BorderType::Thick,
        )
    } else {
        (Style::default().fg(theme.muted), BorderType::Rounded)
    };
    let padding = match density {
        Density::Comfortable => Padding::horizontal(1),
        Density::Compact => Padding::ZERO,
    };
    let size = format!(
        " {}x{} ",
        widget.effective_column_span(),
        widget.effective_row_span()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", widget.data.title), title_style))
        .title_bottom(Line::from(Span::styled(size, Style::default().fg(theme.muted))).right_aligned())
        .padding(padding);

    let body = widget
        .data
        .provider
        .map(|kind| widget_body(kind, theme))
        .unwrap_or_default();
    let paragraph = Paragraph::new(body)
        .block(block)
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}

// ---------------------------------------------------------------------------
// Widget content
// ---------------------------------------------------------------------------

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const ON_DEMAND_HOURS: [u32; 6] = [450, 600, 550, 480, 620, 700];
const SPOT_HOURS: [u32; 6] = [100, 120, 110, 90, 130, 150];
const INBOUND: [u32; 6] = [120, 340, 220, 450, 380, 520];
const OUTBOUND: [u32; 6] = [80, 150, 100, 200, 150, 250];

/// Static content for a widget kind.
pub fn widget_body(kind: WidgetKind, theme: &Theme) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let ok = Style::default().fg(theme.success);
    let warn = Style::default().fg(theme.warning);

    match kind {
        WidgetKind::ServiceOverview => vec![Line::from(
            [
                ("Running instances", "14"),
                ("Volumes", "126"),
                ("Security groups", "116"),
                ("Load balancers", "28"),
            ]
            .into_iter()
            .flat_map(|(k, v)| {
                [
                    Span::styled(format!("{k} "), label),
                    Span::styled(v, value),
                    Span::raw("   "),
                ]
            })
            .collect::<Vec<_>>(),
        )],
        WidgetKind::ServiceHealth => [
            ("Amazon EC2", true),
            ("Amazon RDS", true),
            ("AWS Lambda", false),
            ("Amazon S3", true),
        ]
        .into_iter()
        .map(|(service, healthy)| {
            let status = if healthy {
                Span::styled("● Normal", ok)
            } else {
                Span::styled("▲ Degraded", warn)
            };
            Line::from(vec![Span::raw(format!("{service:<12}")), status])
        })
        .collect(),
        WidgetKind::InstanceHours => {
            let mut lines: Vec<Line> = MONTHS
                .iter()
                .zip(ON_DEMAND_HOURS.iter().zip(SPOT_HOURS))
                .map(|(month, (&on_demand, spot))| {
                    Line::from(vec![
                        Span::styled(format!("{month} "), label),
                        Span::styled(bar(on_demand, 1000, 20), value),
                        Span::styled(bar(spot, 1000, 20), warn),
                        Span::raw(format!(" {}", on_demand + spot)),
                    ])
                })
                .collect();
            lines.push(Line::from(vec![
                Span::styled("█ On-demand  ", value),
                Span::styled("█ Spot", warn),
            ]));
            lines
        }
        WidgetKind::NetworkTraffic => vec![
            Line::from(vec![
                Span::styled("Inbound  ", label),
                Span::styled(sparkline(&INBOUND, 600), value),
                Span::raw(format!(" {} Mbps", INBOUND[5])),
            ]),
            Line::from(vec![
                Span::styled("Outbound ", label),
                Span::styled(sparkline(&OUTBOUND, 600), warn),
                Span::raw(format!(" {} Mbps", OUTBOUND[5])),
            ]),
            Line::from(Span::styled("Jan 1 - Jan 6", label)),
        ],
        WidgetKind::ZoneStatus => vec![
            Line::from(vec![Span::styled("20", value), Span::styled(" zones", label)]),
            Line::from(vec![
                Span::styled("● ", ok),
                Span::raw("Operating normally  18 (90%)"),
            ]),
            Line::from(vec![
                Span::styled("● ", Style::default().fg(theme.danger)),
                Span::raw("Disrupted            2 (10%)"),
            ]),
        ],
        WidgetKind::Events => table(
            ("Event name", "Status"),
            &[
                ("my-instance-1", "Scheduled"),
                ("my-instance-3", "Ongoing"),
                ("db-production-1", "Ongoing"),
                ("redis-cluster-a", "Scheduled"),
            ],
            |status| if status == "Ongoing" { ok } else { label },
            label,
        ),
        WidgetKind::Alarms => table(
            ("Alarm name", "Status"),
            &[
                ("TargetTracking-table", "In alarm"),
                ("awsroute53-check", "In alarm"),
                ("awsdynamodb-read", "Insufficient data"),
            ],
            |_| warn,
            label,
        ),
        WidgetKind::FeaturesSpotlight => vec![
            Line::from("Updates on features available in the current region."),
            Line::from(Span::styled("↗ See what's new", value)),
            Line::from(Span::styled("▤ Read the blog", value)),
        ],
        WidgetKind::InstanceLimits => vec![Line::from(
            [("On-Demand", "14"), ("Spot", "2"), ("vCPUs", "64")]
                .into_iter()
                .flat_map(|(k, v)| {
                    [
                        Span::styled(format!("{k} "), label),
                        Span::styled(v, value),
                        Span::raw("   "),
                    ]
                })
                .collect::<Vec<_>>(),
        )],
        WidgetKind::OperationalMetrics => vec![Line::from(Span::styled("System healthy.", ok))],
    }
}

fn table(
    header: (&'static str, &'static str),
    rows: &[(&'static str, &'static str)],
    status_style: impl Fn(&str) -> Style,
    header_style: Style,
) -> Vec<Line<'static>> {
    let width = rows
        .iter()
        .map(|(name, _)| name.len())
        .chain([header.0.len()])
        .max()
        .unwrap_or(0)
        + 2;
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<width$}{}", header.0, header.1),
        header_style.add_modifier(Modifier::UNDERLINED),
    ))];
    lines.extend(rows.iter().map(|&(name, status)| {
        Line::from(vec![
            Span::raw(format!("{name:<width$}")),
            Span::styled(status, status_style(status)),
        ])
    }));
    lines
}

/// Horizontal bar of `value / max` scaled to `cells` characters.
fn bar(value: u32, max: u32, cells: u32) -> String {
    let filled = (value.min(max) * cells + max / 2) / max.max(1);
    "█".repeat(filled as usize)
}

fn sparkline(values: &[u32], max: u32) -> String {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    values
        .iter()
        .map(|&v| LEVELS[((v.min(max) * 7 + max / 2) / max.max(1)) as usize])
        .collect()
}
