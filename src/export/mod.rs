//! Export filtering and serialization
//!
//! Selects records by an inclusive date range and renders them as the
//! fixed-schema comma-delimited checklist document.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::Record;
use crate::{RelcheckError, Result, EXPORT_FILE_NAME, EXPORT_MIME_TYPE, REPORT_TITLE};

pub mod share;

pub use share::{export, export_records, CommandShare, RevealShare, ShareSink, SharedFile};

/// Column header line of the export document
pub const EXPORT_HEADER: &str = "date,time,room,tester,activeSockets,temperature,humidity,voltage,failedPositions,otherParamTitle,otherParamValue";

/// Result of applying a date filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub records: Vec<Record>,
    /// Whether at least one bound was given
    pub filtered: bool,
}

impl FilterOutcome {
    /// A requested filter matched nothing; the user should be warned
    pub fn is_empty_match(&self) -> bool {
        self.filtered && self.records.is_empty()
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| RelcheckError::InvalidDate(value.to_string()))
}

fn parse_bound(bound: Option<&str>) -> Result<Option<NaiveDate>> {
    match bound.map(str::trim) {
        Some(value) if !value.is_empty() => parse_date(value).map(Some),
        _ => Ok(None),
    }
}

/// Records whose date lies within `[start, end]`, in original order.
///
/// Missing or blank bounds are open. A malformed bound or record date is
/// an `InvalidDate` error.
pub fn filter(records: &[Record], start: Option<&str>, end: Option<&str>) -> Result<FilterOutcome> {
    let start = parse_bound(start)?;
    let end = parse_bound(end)?;
    if start.is_none() && end.is_none() {
        return Ok(FilterOutcome {
            records: records.to_vec(),
            filtered: false,
        });
    }

    let mut selected = Vec::new();
    for record in records {
        let date = parse_date(&record.date)?;
        let after_start = start.map_or(true, |s| date >= s);
        let before_end = end.map_or(true, |e| date <= e);
        if after_start && before_end {
            selected.push(record.clone());
        }
    }
    debug!(
        total = records.len(),
        selected = selected.len(),
        "date filter applied"
    );
    Ok(FilterOutcome {
        records: selected,
        filtered: true,
    })
}

/// Serialized export ready to be written and shared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub text: String,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

impl ExportDocument {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Render records as the checklist document.
///
/// Values are written verbatim; embedded commas are not escaped.
pub fn serialize(records: &[Record]) -> Result<ExportDocument> {
    if records.is_empty() {
        return Err(RelcheckError::EmptyExport);
    }
    let mut text = String::new();
    text.push_str(REPORT_TITLE);
    text.push('\n');
    text.push_str(EXPORT_HEADER);
    text.push('\n');
    for record in records {
        text.push_str(&record.export_values().join(","));
        text.push('\n');
    }
    Ok(ExportDocument {
        text,
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(date: &str, tester: &str) -> Record {
        Record {
            date: date.into(),
            time: "09:00".into(),
            room: "LS317".into(),
            tester: tester.into(),
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

    fn testers(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.records.iter().map(|r| r.tester.as_str()).collect()
    }

    #[test]
    fn test_no_bounds_returns_everything() {
        let records = vec![record("2024-01-06", "A"), record("2024-01-04", "B")];
        let outcome = filter(&records, None, Some("  ")).unwrap();
        assert_eq!(outcome.records, records);
        assert!(!outcome.filtered);
        assert!(!outcome.is_empty_match());

        let empty = filter(&[], None, None).unwrap();
        assert!(!empty.is_empty_match());
    }

    #[test]
    fn test_single_day_range() {
        let records = vec![
            record("2024-01-04", "A"),
            record("2024-01-05", "B"),
            record("2024-01-06", "C"),
            record("2024-01-05", "D"),
        ];
        let outcome = filter(&records, Some("2024-01-05"), Some("2024-01-05")).unwrap();
        assert_eq!(testers(&outcome), vec!["B", "D"]);
    }

    #[test]
    fn test_open_ended_ranges_are_inclusive() {
        let records = vec![
            record("2024-01-04", "A"),
            record("2024-01-05", "B"),
            record("2024-01-06", "C"),
        ];
        assert_eq!(testers(&filter(&records, Some("2024-01-05"), None).unwrap()), vec!["B", "C"]);
        assert_eq!(testers(&filter(&records, None, Some("2024-01-05")).unwrap()), vec!["A", "B"]);
    }

    #[test]
    fn test_requested_filter_with_no_match_warns() {
        let records = vec![record("2024-01-04", "A")];
        let outcome = filter(&records, Some("2025-01-01"), None).unwrap();
        assert!(outcome.is_empty_match());
    }

    #[test]
    fn test_invalid_bound_is_an_error() {
        let records = vec![record("2024-01-04", "A")];
        let err = filter(&records, Some("01/05/2024"), None).unwrap_err();
        assert!(matches!(err, RelcheckError::InvalidDate(ref v) if v == "01/05/2024"));
    }

    #[test]
    fn test_invalid_record_date_is_an_error() {
        let records = vec![record("yesterday", "A")];
        assert!(matches!(
            filter(&records, Some("2024-01-01"), None),
            Err(RelcheckError::InvalidDate(_))
        ));
        // unfiltered listing never parses dates
        assert_eq!(filter(&records, None, None).unwrap().records.len(), 1);
    }

    #[test]
    fn test_serialize_layout() {
        let doc = serialize(&[record("2024-01-05", "T1")]).unwrap();
        let lines: Vec<&str> = doc.text.lines().collect();
        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], EXPORT_HEADER);
        assert_eq!(lines[2], "2024-01-05,09:00,LS317,T1,4,22,40,12,,Notes,ok");
        assert_eq!(lines.len(), 3);
        assert!(doc.text.ends_with('\n'));
        assert_eq!(doc.file_name, "checklist.txt");
        assert_eq!(doc.mime_type, "text/plain");
    }

    #[test]
    fn test_serialize_does_not_escape() {
        let mut r = record("2024-01-05", "T1");
        r.other_param_value = "a,b".into();
        let doc = serialize(&[r]).unwrap();
        assert!(doc.text.lines().nth(2).unwrap().ends_with("Notes,a,b"));
    }

    #[test]
    fn test_serialize_empty_fails() {
        assert!(matches!(serialize(&[]), Err(RelcheckError::EmptyExport)));
    }

    #[test]
    fn test_header_has_eleven_columns() {
        assert_eq!(EXPORT_HEADER.split(',').count(), 11);
    }
}
