//! Login screen rendering
//!
//! Renders the centered login form with username/password fields, the role
//! selector, and the error line from the last failed attempt.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};
use crate::data::Role;

/// Renders the login screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 14, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Hospital Management Console ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // username
            Constraint::Length(3), // password
            Constraint::Length(1), // role selector
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error
            Constraint::Length(1), // hints
        ])
        .split(inner);

    render_field(
        frame,
        chunks[0],
        "Username",
        &app.login.username,
        app.login.focus == LoginField::Username,
    );
    let masked = "*".repeat(app.login.password.len());
    render_field(
        frame,
        chunks[1],
        "Password",
        &masked,
        app.login.focus == LoginField::Password,
    );

    frame.render_widget(role_selector(app.login.role()), chunks[2]);

    if let Some(error) = &app.login.error {
        let error_line = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error_line, chunks[4]);
    }

    let hints = Paragraph::new("Tab: switch field  ←/→: role  Enter: login  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[5]);
}

/// Renders a bordered single-line input field
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_color = if focused { Color::Yellow } else { Color::Gray };
    let field = Paragraph::new(value).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(field, area);
}

/// Builds the role selector line with the active role highlighted
fn role_selector(active: Role) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("Role: ", Style::default().fg(Color::Gray))];
    for (i, role) in Role::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *role == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(role.to_string(), style));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Returns a rect of the given size centered within `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect.x, 30);
        assert_eq!(rect.y, 15);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_terminal() {
        let area = Rect::new(0, 0, 30, 8);
        let rect = centered_rect(46, 14, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
