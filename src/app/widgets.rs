//! Shared rendering helpers used by all screens

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::state::NavigationAction;
use crate::error::Notice;

/// Apply a typing action to a text value. Returns whether it changed.
pub fn edit_text(value: &mut String, action: NavigationAction) -> bool {
    match action {
        NavigationAction::Input(c) => {
            value.push(c);
            true
        }
        NavigationAction::Erase => value.pop().is_some(),
        _ => false,
    }
}

/// Rectangle of `percent_x` width and fixed `height` centered in `r`
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Bordered, centered screen title
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(title, area);
}

/// Help bar built from `(key, description)` pairs
pub fn render_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, description) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", description)));
    }
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

/// Style of a form row depending on focus and availability
pub fn field_style(focused: bool, disabled: bool) -> Style {
    match (focused, disabled) {
        (true, _) => Style::default().fg(Color::Black).bg(Color::Cyan),
        (false, true) => Style::default().fg(Color::DarkGray),
        (false, false) => Style::default(),
    }
}

/// Modal notice drawn over the current screen
pub fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = centered_rect(60, 7, f.size());
    let text = vec![
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::Yellow),
        )),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(notice.title.clone())
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_text() {
        let mut value = String::from("1");
        assert!(edit_text(&mut value, NavigationAction::Input('2')));
        assert_eq!(value, "12");
        assert!(edit_text(&mut value, NavigationAction::Erase));
        assert_eq!(value, "1");
        assert!(!edit_text(&mut value, NavigationAction::Up));

        let mut empty = String::new();
        assert!(!edit_text(&mut empty, NavigationAction::Erase));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 7, outer);
        assert_eq!(inner.height, 7);
        assert_eq!(inner.width, 60);
        assert!(inner.x >= outer.x && inner.y >= outer.y);
    }
}
