//! Navigation shell
//!
//! Single owner of the session state: visible screen, current room and
//! tester index, the room configuration store and the record list.

use tracing::{debug, info};

use crate::app::state::{Screen, StateManager};
use crate::config::ConfigurationStore;
use crate::entry::Selection;
use crate::models::{Record, RoomConfig, RoomMap};

/// Top-level coordinator shared by the three screens
#[derive(Debug)]
pub struct NavigationShell {
    state: StateManager,
    store: ConfigurationStore,
    records: Vec<Record>,
    current_room: Option<String>,
    current_tester_index: usize,
}

impl NavigationShell {
    /// Shell over the default rooms
    pub fn new() -> Self {
        Self::with_rooms(RoomMap::with_defaults())
    }

    /// Shell over an initial configuration; selects the first room
    pub fn with_rooms(rooms: RoomMap) -> Self {
        let mut shell = Self {
            state: StateManager::new(),
            store: ConfigurationStore::with_rooms(rooms),
            records: Vec::new(),
            current_room: None,
            current_tester_index: 0,
        };
        shell.ensure_room_selected();
        shell
    }

    pub fn screen(&self) -> Screen {
        self.state.current_screen()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn quit(&mut self) {
        self.state.quit();
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigurationStore {
        &mut self.store
    }

    /// Committed room configuration
    pub fn rooms(&self) -> &RoomMap {
        self.store.committed()
    }

    /// Records saved this session, oldest first
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Append a saved record
    pub fn record(&mut self, record: Record) {
        self.records.push(record);
        debug!(count = self.records.len(), "record appended");
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn current_tester_index(&self) -> usize {
        self.current_tester_index
    }

    /// Configuration of the current room, empty if none is selected
    pub fn current_room_config(&self) -> RoomConfig {
        self.current_room
            .as_deref()
            .and_then(|room| self.rooms().get(room))
            .cloned()
            .unwrap_or_default()
    }

    fn tester_count(&self) -> usize {
        self.current_room
            .as_deref()
            .and_then(|room| self.rooms().get(room))
            .map_or(0, |config| config.testers.len())
    }

    /// Tester at the current index, or empty
    pub fn current_tester(&self) -> String {
        self.current_room_config()
            .testers
            .get(self.current_tester_index)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the current tester is the room's last configured tester
    pub fn is_last_tester(&self) -> bool {
        let count = self.tester_count();
        count > 0 && self.current_tester_index == count - 1
    }

    /// Snapshot handed to the entry recorder
    pub fn selection(&self) -> Selection {
        let config = self.current_room_config();
        Selection {
            room: self.current_room.clone().unwrap_or_default(),
            tester: self.current_tester(),
            is_last_tester: self.is_last_tester(),
            testers: config.testers,
            other_titles: config.other_parameter_titles,
        }
    }

    /// Select the first room if none is selected yet
    pub fn ensure_room_selected(&mut self) {
        if self.current_room.is_none() {
            if let Some(first) = self.rooms().first_name().map(str::to_string) {
                debug!(room = %first, "selecting first room");
                self.current_room = Some(first);
                self.current_tester_index = 0;
            }
        }
    }

    /// Select a room and restart at its first tester
    pub fn select_room(&mut self, room: &str) {
        self.current_room = Some(room.to_string());
        self.current_tester_index = 0;
        debug!(room, "room selected");
    }

    /// Select the next or previous committed room, wrapping around
    pub fn cycle_room(&mut self, forward: bool) {
        let names: Vec<String> = self.rooms().names().map(str::to_string).collect();
        if names.is_empty() {
            return;
        }
        let next = match self
            .current_room
            .as_deref()
            .and_then(|room| names.iter().position(|n| n == room))
        {
            Some(index) if forward => (index + 1) % names.len(),
            Some(index) => (index + names.len() - 1) % names.len(),
            None => 0,
        };
        self.select_room(&names[next]);
    }

    /// Advance to the next tester unless at the last one
    pub fn next_tester(&mut self) {
        let count = self.tester_count();
        if count > 0 && self.current_tester_index < count - 1 {
            self.current_tester_index += 1;
        } else {
            debug!("reached the end of testers for this room");
        }
    }

    /// Step back to the previous tester unless at the first one
    pub fn previous_tester(&mut self) {
        if self.current_tester_index > 0 {
            self.current_tester_index -= 1;
        }
    }

    /// Open the configuration screen with a fresh draft
    pub fn open_configuration(&mut self) {
        if self.screen() == Screen::Entry {
            self.store.begin_edit();
            self.state.toggle_configuration();
        }
    }

    /// Open the export screen
    pub fn open_export(&mut self) {
        if self.screen() == Screen::Entry {
            self.state.toggle_export();
        }
    }

    /// Leave the current screen; configuration edits are discarded.
    /// Quits when already on the entry screen.
    pub fn back(&mut self) {
        if self.screen() == Screen::Configuration {
            self.store.discard();
        }
        self.state.go_back();
    }

    /// Commit the configuration draft and return to the entry screen
    pub fn save_configuration(&mut self) {
        self.store.commit();
        self.apply_configuration();
        if self.screen() == Screen::Configuration {
            self.state.go_back();
        }
        info!(rooms = self.rooms().len(), "configuration applied");
    }

    /// Keep the selection valid against the committed configuration.
    ///
    /// A room that no longer exists is replaced by the first room and the
    /// tester index is clamped to the room's tester list.
    pub fn apply_configuration(&mut self) {
        let exists = self
            .current_room
            .as_deref()
            .map_or(false, |room| self.rooms().contains(room));
        if !exists {
            self.current_room = None;
            self.ensure_room_selected();
            return;
        }
        let count = self.tester_count();
        if count == 0 {
            self.current_tester_index = 0;
        } else if self.current_tester_index >= count {
            self.current_tester_index = count - 1;
        }
    }
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new()
    }
}
