//! Entry screen implementation
//!
//! Form for one reading of the current room and tester. The screen only
//! tracks focus; field values live in the [`EntryRecorder`] and the
//! selection in the [`NavigationShell`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::shell::NavigationShell;
use crate::app::state::NavigationAction;
use crate::app::widgets::{edit_text, field_style, render_help, render_title};
use crate::entry::{EntryRecorder, WorkingEntry};
use crate::models::RecordField;

/// A focusable row of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRow {
    Room,
    Tester,
    Field(RecordField),
}

impl EntryRow {
    fn all() -> Vec<Self> {
        let mut rows = vec![Self::Room, Self::Tester];
        rows.extend(RecordField::all().into_iter().map(Self::Field));
        rows
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Room => "Room Number",
            Self::Tester => "Tester",
            Self::Field(field) => field.label(),
        }
    }
}

/// What the app should do in response to a key on the entry screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCommand {
    CycleRoom { forward: bool },
    PreviousTester,
    NextTester,
    SetField(RecordField, String),
    CycleTitle { forward: bool },
    Save,
    OpenConfiguration,
    OpenExport,
    Back,
    Quit,
    None,
}

/// Entry screen component
#[derive(Debug)]
pub struct EntryScreen {
    rows: Vec<EntryRow>,
    focused: usize,
    status: Option<String>,
}

impl EntryScreen {
    pub fn new() -> Self {
        Self {
            rows: EntryRow::all(),
            focused: 0,
            status: None,
        }
    }

    /// Row holding the focus
    pub fn focused_row(&self) -> EntryRow {
        self.rows[self.focused]
    }

    /// One-line status shown under the form, e.g. after a save
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn focus_previous(&mut self) {
        if self.focused > 0 {
            self.focused -= 1;
        }
    }

    fn focus_next(&mut self) {
        if self.focused < self.rows.len() - 1 {
            self.focused += 1;
        }
    }

    /// Translate a navigation action into a command
    pub fn handle(&mut self, action: NavigationAction, working: &WorkingEntry) -> EntryCommand {
        match action {
            NavigationAction::Up | NavigationAction::Previous => {
                self.focus_previous();
                EntryCommand::None
            }
            NavigationAction::Down | NavigationAction::Next => {
                self.focus_next();
                EntryCommand::None
            }
            NavigationAction::Left | NavigationAction::Right => {
                let forward = action == NavigationAction::Right;
                match self.focused_row() {
                    EntryRow::Room => EntryCommand::CycleRoom { forward },
                    EntryRow::Tester if forward => EntryCommand::NextTester,
                    EntryRow::Tester => EntryCommand::PreviousTester,
                    EntryRow::Field(field) if field.is_picker() => {
                        EntryCommand::CycleTitle { forward }
                    }
                    EntryRow::Field(_) => EntryCommand::None,
                }
            }
            NavigationAction::Input(_) | NavigationAction::Erase => match self.focused_row() {
                EntryRow::Field(field) if !field.is_picker() => {
                    let mut value = working.get(field).to_string();
                    if edit_text(&mut value, action) {
                        EntryCommand::SetField(field, value)
                    } else {
                        EntryCommand::None
                    }
                }
                _ => EntryCommand::None,
            },
            NavigationAction::PreviousTester => EntryCommand::PreviousTester,
            NavigationAction::NextTester => EntryCommand::NextTester,
            NavigationAction::Save => EntryCommand::Save,
            NavigationAction::OpenConfiguration => EntryCommand::OpenConfiguration,
            NavigationAction::OpenExport => EntryCommand::OpenExport,
            NavigationAction::Back => EntryCommand::Back,
            NavigationAction::Quit => EntryCommand::Quit,
            _ => EntryCommand::None,
        }
    }

    /// Render the entry screen
    pub fn render(&self, f: &mut Frame, shell: &NavigationShell, recorder: &EntryRecorder) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Date and time
                Constraint::Min(0),    // Form
                Constraint::Length(1), // Status
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        render_title(f, chunks[0], crate::REPORT_TITLE);
        self.render_stamp(f, chunks[1], recorder.working());
        self.render_rows(f, chunks[2], shell, recorder);
        self.render_status(f, chunks[3], shell);
        render_help(
            f,
            chunks[4],
            &[
                ("↑↓", "Field"),
                ("←→", "Pick"),
                ("PgUp/PgDn", "Tester"),
                ("Ctrl+S", "Save"),
                ("F2", "Configure"),
                ("F3", "Export"),
                ("Esc", "Quit"),
            ],
        );
    }

    fn render_stamp(&self, f: &mut Frame, area: Rect, working: &WorkingEntry) {
        let stamp = Paragraph::new(Line::from(vec![
            Span::styled("Date: ", Style::default().fg(Color::Gray)),
            Span::raw(working.date.clone()),
            Span::raw("   "),
            Span::styled("Time: ", Style::default().fg(Color::Gray)),
            Span::raw(working.time.clone()),
        ]));
        f.render_widget(stamp, area);
    }

    fn row_value(&self, row: EntryRow, shell: &NavigationShell, working: &WorkingEntry) -> String {
        match row {
            EntryRow::Room => format!("◀ {} ▶", shell.current_room().unwrap_or("-")),
            EntryRow::Tester => {
                let tester = if working.tester.is_empty() {
                    "-"
                } else {
                    working.tester.as_str()
                };
                let count = shell.current_room_config().testers.len();
                if count == 0 {
                    tester.to_string()
                } else {
                    format!("{} ({}/{})", tester, shell.current_tester_index() + 1, count)
                }
            }
            EntryRow::Field(field) if field.is_picker() => {
                format!("◀ {} ▶", working.get(field))
            }
            EntryRow::Field(field) => working.get(field).to_string(),
        }
    }

    fn render_rows(&self, f: &mut Frame, area: Rect, shell: &NavigationShell, recorder: &EntryRecorder) {
        let constraints: Vec<Constraint> = self.rows.iter().map(|_| Constraint::Length(3)).collect();
        let row_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, row) in self.rows.iter().enumerate() {
            if i >= row_chunks.len() {
                break;
            }
            let disabled = matches!(row, EntryRow::Field(_)) && recorder.is_disabled();
            let style = field_style(i == self.focused, disabled);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(row.title());
            let text = self.row_value(*row, shell, recorder.working());
            f.render_widget(Paragraph::new(text).block(block), row_chunks[i]);
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect, shell: &NavigationShell) {
        let text = match &self.status {
            Some(status) => format!("{} | {} records", status, shell.records().len()),
            None => format!("{} records", shell.records().len()),
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
            area,
        );
    }
}

impl Default for EntryScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(screen: &mut EntryScreen, row: EntryRow) {
        screen.focused = screen.rows.iter().position(|r| *r == row).unwrap();
    }

    #[test]
    fn test_focus_is_clamped() {
        let mut screen = EntryScreen::new();
        let working = WorkingEntry::default();
        screen.handle(NavigationAction::Up, &working);
        assert_eq!(screen.focused_row(), EntryRow::Room);
        for _ in 0..20 {
            screen.handle(NavigationAction::Down, &working);
        }
        assert_eq!(
            screen.focused_row(),
            EntryRow::Field(RecordField::OtherParamValue)
        );
    }

    #[test]
    fn test_arrows_depend_on_row() {
        let mut screen = EntryScreen::new();
        let working = WorkingEntry::default();
        assert_eq!(
            screen.handle(NavigationAction::Right, &working),
            EntryCommand::CycleRoom { forward: true }
        );
        focus(&mut screen, EntryRow::Tester);
        assert_eq!(screen.handle(NavigationAction::Left, &working), EntryCommand::PreviousTester);
        focus(&mut screen, EntryRow::Field(RecordField::OtherParamTitle));
        assert_eq!(
            screen.handle(NavigationAction::Left, &working),
            EntryCommand::CycleTitle { forward: false }
        );
        focus(&mut screen, EntryRow::Field(RecordField::Voltage));
        assert_eq!(screen.handle(NavigationAction::Right, &working), EntryCommand::None);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut screen = EntryScreen::new();
        let working = WorkingEntry {
            temperature: "2".into(),
            ..WorkingEntry::default()
        };
        focus(&mut screen, EntryRow::Field(RecordField::Temperature));
        assert_eq!(
            screen.handle(NavigationAction::Input('2'), &working),
            EntryCommand::SetField(RecordField::Temperature, "22".into())
        );
        assert_eq!(
            screen.handle(NavigationAction::Erase, &working),
            EntryCommand::SetField(RecordField::Temperature, "".into())
        );
    }

    #[test]
    fn test_typing_on_pickers_is_ignored() {
        let mut screen = EntryScreen::new();
        let working = WorkingEntry::default();
        assert_eq!(screen.handle(NavigationAction::Input('x'), &working), EntryCommand::None);
        focus(&mut screen, EntryRow::Field(RecordField::OtherParamTitle));
        assert_eq!(screen.handle(NavigationAction::Input('x'), &working), EntryCommand::None);
    }

    #[test]
    fn test_global_keys() {
        let mut screen = EntryScreen::new();
        let working = WorkingEntry::default();
        assert_eq!(screen.handle(NavigationAction::Save, &working), EntryCommand::Save);
        assert_eq!(
            screen.handle(NavigationAction::OpenConfiguration, &working),
            EntryCommand::OpenConfiguration
        );
        assert_eq!(screen.handle(NavigationAction::OpenExport, &working), EntryCommand::OpenExport);
        assert_eq!(screen.handle(NavigationAction::NextTester, &working), EntryCommand::NextTester);
        assert_eq!(screen.handle(NavigationAction::Back, &working), EntryCommand::Back);
    }
}
