//! Room configuration store
//!
//! Holds the committed room configuration and an optional draft. Every
//! edit goes to the draft; `commit` swaps the cleaned draft in as the new
//! committed configuration, `discard` throws it away.

use tracing::{debug, info, warn};

use crate::models::{RoomConfig, RoomField, RoomMap};
use crate::{is_default_room, RelcheckError, Result};

/// Committed configuration plus the draft being edited
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    committed: RoomMap,
    draft: Option<RoomMap>,
    /// Room selected in the configuration editor
    selected: Option<String>,
}

impl ConfigurationStore {
    /// Store seeded with the default rooms
    pub fn new() -> Self {
        Self::with_rooms(RoomMap::with_defaults())
    }

    /// Store seeded with an initial configuration
    pub fn with_rooms(rooms: RoomMap) -> Self {
        Self {
            committed: rooms,
            draft: None,
            selected: None,
        }
    }

    /// The last committed configuration
    pub fn committed(&self) -> &RoomMap {
        &self.committed
    }

    /// The draft if an edit session is open
    pub fn draft(&self) -> Option<&RoomMap> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Configuration as seen by the editor: the draft if open, else committed
    pub fn view(&self) -> &RoomMap {
        self.draft.as_ref().unwrap_or(&self.committed)
    }

    /// Open a draft copy of the committed configuration.
    ///
    /// The editor selection starts at the first room. Calling this while a
    /// draft is open keeps the existing draft.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            debug!("opening configuration draft");
            self.draft = Some(self.committed.clone());
            self.selected = self.committed.first_name().map(str::to_string);
        }
    }

    fn draft_mut(&mut self) -> &mut RoomMap {
        self.begin_edit();
        self.draft.get_or_insert_with(RoomMap::new)
    }

    pub fn selected_room(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a room in the editor; unknown rooms are ignored
    pub fn select_room(&mut self, room: &str) {
        if self.view().contains(room) {
            self.selected = Some(room.to_string());
        }
    }

    /// Room identifiers of the editor view in display order
    pub fn room_names(&self) -> Vec<String> {
        self.view().names().map(str::to_string).collect()
    }

    /// Replace the entry at `index` of `field` for `room` in the draft.
    ///
    /// The room is created with empty lists if absent. Lists shorter than
    /// `index` are padded with blank entries, which `commit` drops.
    pub fn stage_edit(&mut self, field: RoomField, room: &str, index: usize, value: &str) {
        if room.is_empty() {
            return;
        }
        let list = self.draft_mut().entry(room).list_mut(field);
        if index >= list.len() {
            list.resize(index + 1, String::new());
        }
        list[index] = value.to_string();
    }

    /// Append a blank entry to `field` for `room` in the draft
    pub fn stage_append(&mut self, field: RoomField, room: &str) {
        if room.is_empty() {
            return;
        }
        self.draft_mut().entry(room).list_mut(field).push(String::new());
    }

    /// Add an empty room to the draft and select it
    pub fn add_room(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            warn!("rejected blank room name");
            return Err(RelcheckError::InvalidName(name.to_string()));
        }
        let draft = self.draft_mut();
        if draft.contains(name) {
            warn!(room = name, "rejected duplicate room");
            return Err(RelcheckError::DuplicateRoom(name.to_string()));
        }
        draft.insert(name.to_string(), RoomConfig::new());
        self.selected = Some(name.to_string());
        debug!(room = name, "staged new room");
        Ok(())
    }

    /// Remove a room from the draft.
    ///
    /// Returns whether a room was removed. If the removed room was selected,
    /// the first remaining room becomes selected.
    pub fn delete_room(&mut self, name: &str) -> Result<bool> {
        if is_default_room(name) {
            warn!(room = name, "rejected delete of default room");
            return Err(RelcheckError::ProtectedRoom(name.to_string()));
        }
        let draft = self.draft_mut();
        if draft.remove(name).is_none() {
            return Ok(false);
        }
        let first = draft.first_name().map(str::to_string);
        if self.selected.as_deref() == Some(name) {
            self.selected = first;
        }
        debug!(room = name, "staged room removal");
        Ok(true)
    }

    /// Clean the draft and make it the committed configuration.
    ///
    /// Without an open draft this re-commits the current configuration.
    pub fn commit(&mut self) -> &RoomMap {
        let draft = self.draft.take().unwrap_or_else(|| self.committed.clone());
        self.committed = draft.cleaned();
        self.selected = None;
        info!(rooms = self.committed.len(), "configuration committed");
        &self.committed
    }

    /// Drop the draft, keeping the committed configuration
    pub fn discard(&mut self) {
        if self.draft.take().is_some() {
            debug!("configuration draft discarded");
        }
        self.selected = None;
    }
}

impl Default for ConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_room_creates_empty_lists_and_selects() {
        let mut store = ConfigurationStore::new();
        store.add_room("B12").unwrap();
        assert_eq!(store.selected_room(), Some("B12"));
        let config = store.draft().unwrap().get("B12").unwrap();
        assert!(config.testers.is_empty());
        assert!(config.other_parameter_titles.is_empty());

        store.commit();
        store.begin_edit();
        store.select_room("B12");
        assert_eq!(store.view().get("B12"), Some(&RoomConfig::new()));
    }

    #[test]
    fn test_add_room_rejects_blank_names() {
        let mut store = ConfigurationStore::new();
        assert!(matches!(store.add_room(""), Err(RelcheckError::InvalidName(_))));
        assert!(matches!(store.add_room("   "), Err(RelcheckError::InvalidName(_))));
        assert_eq!(store.room_names(), strings(&["LS317", "N434"]));
    }

    #[test]
    fn test_add_room_rejects_duplicates_without_touching_lists() {
        let mut store = ConfigurationStore::new();
        store.stage_edit(RoomField::Testers, "LS317", 0, "T1");
        let err = store.add_room("LS317").unwrap_err();
        assert!(matches!(err, RelcheckError::DuplicateRoom(_)));
        assert_eq!(store.view().get("LS317").unwrap().testers, strings(&["T1"]));
    }

    #[test]
    fn test_add_room_trims_surrounding_whitespace() {
        let mut store = ConfigurationStore::new();
        let err = store.add_room(" LS317").unwrap_err();
        assert!(matches!(err, RelcheckError::DuplicateRoom(ref name) if name == "LS317"));

        store.add_room("  B12 ").unwrap();
        assert_eq!(store.selected_room(), Some("B12"));
        assert_eq!(store.room_names(), strings(&["LS317", "N434", "B12"]));
    }

    #[test]
    fn test_default_rooms_cannot_be_deleted() {
        let mut store = ConfigurationStore::new();
        for room in ["LS317", "N434"] {
            let err = store.delete_room(room).unwrap_err();
            assert!(matches!(err, RelcheckError::ProtectedRoom(_)));
            assert!(store.view().contains(room));
        }
        store.commit();
        assert!(store.committed().contains("LS317"));
        assert!(store.committed().contains("N434"));
    }

    #[test]
    fn test_delete_selected_room_selects_first() {
        let mut store = ConfigurationStore::new();
        store.add_room("B12").unwrap();
        assert!(store.delete_room("B12").unwrap());
        assert_eq!(store.selected_room(), Some("LS317"));
        assert!(!store.delete_room("B12").unwrap());
    }

    #[test]
    fn test_delete_unselected_room_keeps_selection() {
        let mut store = ConfigurationStore::new();
        store.add_room("B12").unwrap();
        store.add_room("C7").unwrap();
        store.select_room("N434");
        assert!(store.delete_room("B12").unwrap());
        assert_eq!(store.selected_room(), Some("N434"));
    }

    #[test]
    fn test_commit_strips_blank_entries_in_order() {
        let mut store = ConfigurationStore::new();
        for (i, value) in ["A", "", " ", "B"].iter().enumerate() {
            store.stage_edit(RoomField::Testers, "LS317", i, value);
        }
        store.stage_append(RoomField::OtherParameterTitles, "LS317");
        store.stage_edit(RoomField::OtherParameterTitles, "LS317", 1, "Notes");

        let committed = store.commit();
        let room = committed.get("LS317").unwrap();
        assert_eq!(room.testers, strings(&["A", "B"]));
        assert_eq!(room.other_parameter_titles, strings(&["Notes"]));
        assert!(!store.is_editing());
    }

    #[test]
    fn test_edits_invisible_until_commit() {
        let mut store = ConfigurationStore::new();
        store.stage_edit(RoomField::Testers, "N434", 0, "T9");
        assert!(store.committed().get("N434").unwrap().testers.is_empty());
        store.discard();
        assert!(store.committed().get("N434").unwrap().testers.is_empty());
        assert!(store.draft().is_none());
    }

    #[test]
    fn test_stage_creates_missing_room() {
        let mut store = ConfigurationStore::new();
        store.stage_append(RoomField::Testers, "Z1");
        assert_eq!(store.view().get("Z1").unwrap().testers, strings(&[""]));
    }

    #[test]
    fn test_stage_ignores_empty_room() {
        let mut store = ConfigurationStore::new();
        store.stage_edit(RoomField::Testers, "", 0, "T1");
        store.stage_append(RoomField::Testers, "");
        assert_eq!(store.room_names(), strings(&["LS317", "N434"]));
    }

    #[test]
    fn test_stage_edit_past_end_pads_with_blanks() {
        let mut store = ConfigurationStore::new();
        store.stage_edit(RoomField::Testers, "LS317", 2, "T3");
        assert_eq!(store.view().get("LS317").unwrap().testers, strings(&["", "", "T3"]));
        assert_eq!(store.commit().get("LS317").unwrap().testers, strings(&["T3"]));
    }
}
