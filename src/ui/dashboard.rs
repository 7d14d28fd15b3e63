//! Dashboard screen rendering
//!
//! Renders the per-role dashboard: a header with the signed-in user, a tab
//! bar, the active tab's resource table, and a retry banner when the tab's
//! last load failed.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::app::App;

/// Renders the dashboard screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(2), // tab bar
            Constraint::Min(3),    // table / banner
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tab_bar(frame, chunks[1], app);

    if app.current_tab_failed() {
        render_failure_banner(frame, chunks[2]);
    } else if app.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[2]);
    } else {
        render_table(frame, chunks[2], app);
    }

    let footer =
        Paragraph::new("Tab: switch  j/k: rows  r: refresh  Esc: logout  q: quit")
            .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}

/// Renders the signed-in user line
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let (name, role) = app
        .current_user
        .as_ref()
        .map(|user| (user.full_name.clone(), user.role.to_string()))
        .unwrap_or_default();
    let header = Line::from(vec![
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  ({role})"), Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Renders the tab bar with the active tab highlighted
fn render_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app.tabs.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

/// Renders the active tab's rows as a table
fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let Some(tab) = app.current_tab() else {
        return;
    };
    let headers = tab.headers();
    let rows = app.current_rows();

    if rows.is_empty() {
        let empty = Paragraph::new("No records")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let header_row = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .bottom_margin(1);

    let table_rows = rows
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));

    // Even column split; the last column absorbs rounding slack.
    let percent = 100 / headers.len() as u16;
    let widths: Vec<Constraint> = headers
        .iter()
        .map(|_| Constraint::Percentage(percent))
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header_row)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Renders the generic load-failure banner
fn render_failure_banner(frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new("failed to load — press r to retry")
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}
