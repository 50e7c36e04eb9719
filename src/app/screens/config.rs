//! Configuration screen implementation
//!
//! Edits the configuration draft: pick a room (or the "Add New Room..."
//! entry), then edit its testers and other parameter titles row by row.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::state::NavigationAction;
use crate::app::widgets::{edit_text, render_help, render_title};
use crate::config::ConfigurationStore;
use crate::models::RoomField;

/// Label of the pseudo room that opens the new-room input
pub const ADD_ROOM_OPTION: &str = "Add New Room...";

/// A focusable row of the configuration editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRow {
    RoomPicker,
    NewRoomName,
    Header(RoomField),
    Item(RoomField, usize),
}

/// What the app should do in response to a key on the configuration screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    SelectRoom(String),
    AddRoom(String),
    DeleteRoom(String),
    Append(RoomField, String),
    Edit {
        field: RoomField,
        room: String,
        index: usize,
        value: String,
    },
    Save,
    Back,
    None,
}

/// Configuration screen component
#[derive(Debug)]
pub struct ConfigScreen {
    focused: usize,
    adding: bool,
    new_room_name: String,
    list_state: ListState,
}

impl ConfigScreen {
    pub fn new() -> Self {
        Self {
            focused: 0,
            adding: false,
            new_room_name: String::new(),
            list_state: ListState::default(),
        }
    }

    /// Forget focus and pending input, e.g. when the screen is reopened
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether the "Add New Room..." entry is picked
    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn new_room_name(&self) -> &str {
        &self.new_room_name
    }

    /// Called after the store accepted the new room
    pub fn room_added(&mut self) {
        self.adding = false;
        self.new_room_name.clear();
        self.focused = 0;
    }

    /// Rows of the editor for the store's current view
    pub fn rows(&self, store: &ConfigurationStore) -> Vec<ConfigRow> {
        let mut rows = vec![ConfigRow::RoomPicker];
        if self.adding {
            rows.push(ConfigRow::NewRoomName);
            return rows;
        }
        let config = match store.selected_room().and_then(|room| store.view().get(room)) {
            Some(config) => config,
            None => return rows,
        };
        for field in RoomField::all() {
            rows.push(ConfigRow::Header(field));
            rows.extend((0..config.list(field).len()).map(|i| ConfigRow::Item(field, i)));
        }
        rows
    }

    /// Row holding the focus, clamped to the current rows
    pub fn focused_row(&self, store: &ConfigurationStore) -> ConfigRow {
        let rows = self.rows(store);
        rows[self.focused.min(rows.len() - 1)]
    }

    fn move_focus(&mut self, store: &ConfigurationStore, forward: bool) {
        let last = self.rows(store).len() - 1;
        let current = self.focused.min(last);
        self.focused = if forward {
            (current + 1).min(last)
        } else {
            current.saturating_sub(1)
        };
    }

    fn cycle_room(&mut self, store: &ConfigurationStore, forward: bool) -> ConfigCommand {
        let names = store.room_names();
        // the add option sits after the last room
        let options = names.len() + 1;
        let current = if self.adding {
            names.len()
        } else {
            store
                .selected_room()
                .and_then(|room| names.iter().position(|n| n == room))
                .unwrap_or(0)
        };
        let next = if forward {
            (current + 1) % options
        } else {
            (current + options - 1) % options
        };
        if next == names.len() {
            self.adding = true;
            ConfigCommand::None
        } else {
            self.adding = false;
            ConfigCommand::SelectRoom(names[next].clone())
        }
    }

    /// Translate a navigation action into a command
    pub fn handle(&mut self, action: NavigationAction, store: &ConfigurationStore) -> ConfigCommand {
        let room = store.selected_room().unwrap_or_default().to_string();
        let row = self.focused_row(store);
        match action {
            NavigationAction::Up | NavigationAction::Previous => {
                self.move_focus(store, false);
                ConfigCommand::None
            }
            NavigationAction::Down | NavigationAction::Next => {
                self.move_focus(store, true);
                ConfigCommand::None
            }
            NavigationAction::Left | NavigationAction::Right if row == ConfigRow::RoomPicker => {
                self.cycle_room(store, action == NavigationAction::Right)
            }
            NavigationAction::Input(_) | NavigationAction::Erase => match row {
                ConfigRow::NewRoomName => {
                    edit_text(&mut self.new_room_name, action);
                    ConfigCommand::None
                }
                ConfigRow::Item(field, index) => {
                    let mut value = store
                        .view()
                        .get(&room)
                        .and_then(|config| config.list(field).get(index))
                        .cloned()
                        .unwrap_or_default();
                    if edit_text(&mut value, action) {
                        ConfigCommand::Edit {
                            field,
                            room,
                            index,
                            value,
                        }
                    } else {
                        ConfigCommand::None
                    }
                }
                _ => ConfigCommand::None,
            },
            NavigationAction::Select if row == ConfigRow::NewRoomName => {
                ConfigCommand::AddRoom(self.new_room_name.clone())
            }
            NavigationAction::Add => match row {
                ConfigRow::Header(field) | ConfigRow::Item(field, _) if !room.is_empty() => {
                    ConfigCommand::Append(field, room)
                }
                _ => ConfigCommand::None,
            },
            NavigationAction::Delete if !self.adding && !room.is_empty() => {
                ConfigCommand::DeleteRoom(room)
            }
            NavigationAction::Save => ConfigCommand::Save,
            NavigationAction::Back => ConfigCommand::Back,
            _ => ConfigCommand::None,
        }
    }

    /// Render the configuration screen
    pub fn render(&mut self, f: &mut Frame, store: &ConfigurationStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Rows
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        render_title(f, chunks[0], "Room Configuration");
        self.render_rows(f, chunks[1], store);
        render_help(
            f,
            chunks[2],
            &[
                ("↑↓", "Row"),
                ("←→", "Room"),
                ("Enter", "Add room"),
                ("Ctrl+N", "New row"),
                ("Ctrl+D", "Delete room"),
                ("Ctrl+S", "Save"),
                ("Esc", "Discard"),
            ],
        );
    }

    fn row_text(&self, row: ConfigRow, store: &ConfigurationStore) -> String {
        let room = store.selected_room().unwrap_or_default();
        match row {
            ConfigRow::RoomPicker => {
                let picked = if self.adding { ADD_ROOM_OPTION } else { room };
                format!("Room Number: ◀ {} ▶", picked)
            }
            ConfigRow::NewRoomName => format!("New Room Name: {}_", self.new_room_name),
            ConfigRow::Header(field) => format!("{}:", field.title()),
            ConfigRow::Item(field, index) => {
                let value = store
                    .view()
                    .get(room)
                    .and_then(|config| config.list(field).get(index))
                    .map(String::as_str)
                    .unwrap_or_default();
                format!("    {}. {}", index + 1, value)
            }
        }
    }

    fn render_rows(&mut self, f: &mut Frame, area: Rect, store: &ConfigurationStore) {
        let rows = self.rows(store);
        let title = if store.is_editing() { "Draft" } else { "Rooms" };
        self.focused = self.focused.min(rows.len() - 1);
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let item = ListItem::new(self.row_text(*row, store));
                if matches!(row, ConfigRow::Header(_)) {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");
        self.list_state.select(Some(self.focused));
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for ConfigScreen {
    fn default() -> Self {
        Self::new()
    }
}
