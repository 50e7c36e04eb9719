//! Record data model
//!
//! A record is one completed reliability-check submission. Readings are
//! kept as the free text the user typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completed reliability-check submission, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time as formatted when the form was initialized
    pub time: String,
    pub room: String,
    /// Tester active at save time, or empty
    pub tester: String,
    pub active_sockets: String,
    pub temperature: String,
    pub humidity: String,
    pub voltage: String,
    pub failed_positions: String,
    pub other_param_title: String,
    pub other_param_value: String,
    /// Creation instant
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Field values in export column order
    pub fn export_values(&self) -> [&str; 11] {
        [
            &self.date,
            &self.time,
            &self.room,
            &self.tester,
            &self.active_sockets,
            &self.temperature,
            &self.humidity,
            &self.voltage,
            &self.failed_positions,
            &self.other_param_title,
            &self.other_param_value,
        ]
    }

    /// One-line preview shown in the export list
    pub fn summary(&self) -> String {
        format!("{} - {} - {}", self.date, self.room, self.tester)
    }
}

/// Fields the user may edit directly on the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    ActiveSockets,
    Temperature,
    Humidity,
    Voltage,
    FailedPositions,
    OtherParamTitle,
    OtherParamValue,
}

impl RecordField {
    /// Editable fields in form order
    pub fn all() -> [Self; 7] {
        [
            Self::ActiveSockets,
            Self::Temperature,
            Self::Humidity,
            Self::Voltage,
            Self::FailedPositions,
            Self::OtherParamTitle,
            Self::OtherParamValue,
        ]
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ActiveSockets => "# Active Sockets",
            Self::Temperature => "Temperature Value",
            Self::Humidity => "Humidity Value",
            Self::Voltage => "Voltage",
            Self::FailedPositions => "Failed Positions",
            Self::OtherParamTitle => "Other Parameters",
            Self::OtherParamValue => "Other Value",
        }
    }

    /// Whether the field is chosen from a list rather than typed
    pub fn is_picker(&self) -> bool {
        matches!(self, Self::OtherParamTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            date: "2024-01-05".into(),
            time: "09:00".into(),
            room: "LS317".into(),
            tester: "T1".into(),
            active_sockets: "4".into(),
            temperature: "22".into(),
            humidity: "40".into(),
            voltage: "12".into(),
            failed_positions: "".into(),
            other_param_title: "Notes".into(),
            other_param_value: "ok".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_export_values_order() {
        let record = sample();
        let values = record.export_values();
        assert_eq!(values[0], "2024-01-05");
        assert_eq!(values[3], "T1");
        assert_eq!(values[8], "");
        assert_eq!(values[10], "ok");
    }

    #[test]
    fn test_summary() {
        assert_eq!(sample().summary(), "2024-01-05 - LS317 - T1");
    }

    #[test]
    fn test_only_title_is_picker() {
        let pickers: Vec<RecordField> =
            RecordField::all().into_iter().filter(RecordField::is_picker).collect();
        assert_eq!(pickers, vec![RecordField::OtherParamTitle]);
    }
}
