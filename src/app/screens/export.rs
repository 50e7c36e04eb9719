//! Export screen implementation
//!
//! Start and end date inputs, a preview of the filtered records and the
//! export trigger. Only filtered records are exported.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::state::NavigationAction;
use crate::app::widgets::{edit_text, field_style, render_help, render_title};
use crate::models::Record;

/// Date input holding the focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Start,
    End,
}

/// What the app should do in response to a key on the export screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportCommand {
    Filter { start: String, end: String },
    Export,
    Back,
    None,
}

/// Export screen component
#[derive(Debug)]
pub struct ExportScreen {
    start: String,
    end: String,
    focused: DateInput,
    filtered: Vec<Record>,
    list_state: ListState,
    status: Option<String>,
}

impl ExportScreen {
    pub fn new() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            focused: DateInput::Start,
            filtered: Vec::new(),
            list_state: ListState::default(),
            status: None,
        }
    }

    /// Clear inputs and the previous filter result, e.g. when the screen is reopened
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn focused(&self) -> DateInput {
        self.focused
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Records selected by the last filter
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    /// Replace the preview with a new filter result
    pub fn set_filtered(&mut self, records: Vec<Record>) {
        self.filtered = records;
        self.list_state
            .select(if self.filtered.is_empty() { None } else { Some(0) });
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn focused_value(&mut self) -> &mut String {
        match self.focused {
            DateInput::Start => &mut self.start,
            DateInput::End => &mut self.end,
        }
    }

    fn scroll(&mut self, forward: bool) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1).min(last)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    /// Translate a navigation action into a command
    pub fn handle(&mut self, action: NavigationAction) -> ExportCommand {
        match action {
            NavigationAction::Next | NavigationAction::Previous => {
                self.focused = match self.focused {
                    DateInput::Start => DateInput::End,
                    DateInput::End => DateInput::Start,
                };
                ExportCommand::None
            }
            NavigationAction::Up => {
                self.scroll(false);
                ExportCommand::None
            }
            NavigationAction::Down => {
                self.scroll(true);
                ExportCommand::None
            }
            NavigationAction::Input(_) | NavigationAction::Erase => {
                edit_text(self.focused_value(), action);
                ExportCommand::None
            }
            NavigationAction::Select => ExportCommand::Filter {
                start: self.start.clone(),
                end: self.end.clone(),
            },
            NavigationAction::Export => ExportCommand::Export,
            NavigationAction::Back => ExportCommand::Back,
            _ => ExportCommand::None,
        }
    }

    /// Render the export screen
    pub fn render(&mut self, f: &mut Frame, total_records: usize) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Date inputs
                Constraint::Min(0),    // Preview
                Constraint::Length(1), // Status
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        render_title(f, chunks[0], "Export Checklist Data");
        self.render_inputs(f, chunks[1]);
        self.render_preview(f, chunks[2], total_records);

        let status = self.status.clone().unwrap_or_default();
        f.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Yellow)),
            chunks[3],
        );
        render_help(
            f,
            chunks[4],
            &[
                ("Tab", "Start/End"),
                ("Enter", "Filter"),
                ("Ctrl+E", "Export"),
                ("Esc", "Back"),
            ],
        );
    }

    fn render_inputs(&self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (i, (input, title, value)) in [
            (DateInput::Start, "Start Date (YYYY-MM-DD)", &self.start),
            (DateInput::End, "End Date (YYYY-MM-DD)", &self.end),
        ]
        .into_iter()
        .enumerate()
        {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(field_style(self.focused == input, false))
                .title(title);
            f.render_widget(Paragraph::new(value.clone()).block(block), halves[i]);
        }
    }

    fn render_preview(&mut self, f: &mut Frame, area: Rect, total_records: usize) {
        let items: Vec<ListItem> = self
            .filtered
            .iter()
            .map(|record| ListItem::new(record.summary()))
            .collect();
        let title = format!("Filtered {} of {}", self.filtered.len(), total_records);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for ExportScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(date: &str) -> Record {
        Record {
            date: date.into(),
            time: "09:00".into(),
            room: "LS317".into(),
            tester: "T1".into(),
            active_sockets: String::new(),
            temperature: String::new(),
            humidity: String::new(),
            voltage: String::new(),
            failed_positions: String::new(),
            other_param_title: String::new(),
            other_param_value: String::new(),
            timestamp: Utc::now(),
        }
    }

    fn type_text(screen: &mut ExportScreen, text: &str) {
        for c in text.chars() {
            screen.handle(NavigationAction::Input(c));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_input() {
        let mut screen = ExportScreen::new();
        type_text(&mut screen, "2024-01-05");
        screen.handle(NavigationAction::Next);
        assert_eq!(screen.focused(), DateInput::End);
        type_text(&mut screen, "2024-01-06");
        screen.handle(NavigationAction::Erase);
        assert_eq!(screen.start(), "2024-01-05");
        assert_eq!(screen.end(), "2024-01-0");
    }

    #[test]
    fn test_enter_requests_filter() {
        let mut screen = ExportScreen::new();
        type_text(&mut screen, "2024-01-05");
        assert_eq!(
            screen.handle(NavigationAction::Select),
            ExportCommand::Filter {
                start: "2024-01-05".into(),
                end: String::new(),
            }
        );
        assert_eq!(screen.handle(NavigationAction::Export), ExportCommand::Export);
        assert_eq!(screen.handle(NavigationAction::Back), ExportCommand::Back);
    }

    #[test]
    fn test_reset_forgets_previous_filter() {
        let mut screen = ExportScreen::new();
        type_text(&mut screen, "2024-01-05");
        screen.set_filtered(vec![record("2024-01-05")]);
        screen.set_status("1 entries selected");
        screen.reset();
        assert!(screen.filtered().is_empty());
        assert_eq!(screen.start(), "");
        assert_eq!(screen.status(), None);
        assert_eq!(screen.list_state.selected(), None);
    }

    #[test]
    fn test_preview_scroll_is_clamped() {
        let mut screen = ExportScreen::new();
        screen.handle(NavigationAction::Down);
        assert_eq!(screen.list_state.selected(), None);

        screen.set_filtered(vec![record("2024-01-05"), record("2024-01-06")]);
        assert_eq!(screen.list_state.selected(), Some(0));
        for _ in 0..5 {
            screen.handle(NavigationAction::Down);
        }
        assert_eq!(screen.list_state.selected(), Some(1));
        screen.handle(NavigationAction::Up);
        assert_eq!(screen.list_state.selected(), Some(0));
    }
}
