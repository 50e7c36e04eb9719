//! Room configuration models
//!
//! A room carries the ordered list of testers cycled through during entry
//! and the ordered list of "other parameter" titles offered by the picker.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_ROOMS;

/// Per-room configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Testers in the order they are visited
    #[serde(default)]
    pub testers: Vec<String>,
    /// Titles available for the supplementary measurement
    #[serde(default)]
    pub other_parameter_titles: Vec<String>,
}

/// One of the two ordered lists held by a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomField {
    Testers,
    OtherParameterTitles,
}

impl RoomField {
    pub fn all() -> [Self; 2] {
        [Self::Testers, Self::OtherParameterTitles]
    }

    /// Display title for the list
    pub fn title(&self) -> &'static str {
        match self {
            Self::Testers => "Testers",
            Self::OtherParameterTitles => "Other Parameter Titles",
        }
    }
}

impl RoomConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, field: RoomField) -> &[String] {
        match field {
            RoomField::Testers => &self.testers,
            RoomField::OtherParameterTitles => &self.other_parameter_titles,
        }
    }

    pub fn list_mut(&mut self, field: RoomField) -> &mut Vec<String> {
        match field {
            RoomField::Testers => &mut self.testers,
            RoomField::OtherParameterTitles => &mut self.other_parameter_titles,
        }
    }

    /// First configured title, or empty when none is configured
    pub fn first_title(&self) -> String {
        self.other_parameter_titles.first().cloned().unwrap_or_default()
    }

    /// Copy of this config with blank and whitespace-only entries removed
    pub fn cleaned(&self) -> Self {
        fn non_blank(items: &[String]) -> Vec<String> {
            items
                .iter()
                .filter(|item| !item.trim().is_empty())
                .cloned()
                .collect()
        }

        Self {
            testers: non_blank(&self.testers),
            other_parameter_titles: non_blank(&self.other_parameter_titles),
        }
    }
}

/// Room configurations keyed by room identifier, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMap {
    entries: Vec<(String, RoomConfig)>,
}

impl RoomMap {
    /// Empty map without the default rooms
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding the default rooms, each with empty lists
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for room in DEFAULT_ROOMS {
            map.insert(room.to_string(), RoomConfig::new());
        }
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, room: &str) -> bool {
        self.position(room).is_some()
    }

    pub fn get(&self, room: &str) -> Option<&RoomConfig> {
        self.entries
            .iter()
            .find(|(name, _)| name == room)
            .map(|(_, config)| config)
    }

    pub fn get_mut(&mut self, room: &str) -> Option<&mut RoomConfig> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == room)
            .map(|(_, config)| config)
    }

    /// Entry for `room`, created with empty lists if absent
    pub fn entry(&mut self, room: &str) -> &mut RoomConfig {
        let index = match self.position(room) {
            Some(index) => index,
            None => {
                self.entries.push((room.to_string(), RoomConfig::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Insert or replace a room, keeping its original position on replace
    pub fn insert(&mut self, room: String, config: RoomConfig) {
        match self.position(&room) {
            Some(index) => self.entries[index].1 = config,
            None => self.entries.push((room, config)),
        }
    }

    pub fn remove(&mut self, room: &str) -> Option<RoomConfig> {
        self.position(room).map(|index| self.entries.remove(index).1)
    }

    /// Room identifiers in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoomConfig)> {
        self.entries.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn position(&self, room: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == room)
    }

    /// Copy of the map with every room's lists cleaned of blank entries
    pub fn cleaned(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(name, config)| (name.clone(), config.cleaned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_order() {
        let map = RoomMap::with_defaults();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["LS317", "N434"]);
        assert!(map.get("LS317").unwrap().testers.is_empty());
        assert!(map.get("N434").unwrap().other_parameter_titles.is_empty());
    }

    #[test]
    fn test_entry_creates_missing_room_at_end() {
        let mut map = RoomMap::with_defaults();
        map.entry("B12").testers.push("T1".to_string());
        assert_eq!(map.names().last(), Some("B12"));
        assert_eq!(map.get("B12").unwrap().testers, vec!["T1".to_string()]);
    }

    #[test]
    fn test_insert_replace_keeps_position() {
        let mut map = RoomMap::with_defaults();
        let config = RoomConfig {
            testers: vec!["A".to_string()],
            other_parameter_titles: Vec::new(),
        };
        map.insert("LS317".to_string(), config.clone());
        assert_eq!(map.position("LS317"), Some(0));
        assert_eq!(map.get("LS317"), Some(&config));
    }

    #[test]
    fn test_cleaned_preserves_order() {
        let config = RoomConfig {
            testers: vec!["A".into(), "".into(), " ".into(), "B".into()],
            other_parameter_titles: vec!["\t".into(), "Notes".into()],
        };
        let cleaned = config.cleaned();
        assert_eq!(cleaned.testers, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(cleaned.other_parameter_titles, vec!["Notes".to_string()]);
    }

    #[test]
    fn test_first_title() {
        let mut config = RoomConfig::new();
        assert_eq!(config.first_title(), "");
        config.other_parameter_titles = vec!["Pressure".into(), "Notes".into()];
        assert_eq!(config.first_title(), "Pressure");
    }
}
