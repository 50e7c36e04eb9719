//! relcheck - Daily Status Check: Reliability Tests
//!
//! A terminal application for recording periodic reliability-test readings
//! per room and tester, and exporting filtered records as delimited text.

use thiserror::Error;

// Public re-exports
pub mod app;
pub mod cli;
pub mod config;
pub mod entry;
pub mod export;
pub mod logging;
pub mod models;
pub mod util;

/// Errors surfaced by relcheck operations
#[derive(Debug, Error)]
pub enum RelcheckError {
    /// Room name was empty or whitespace-only
    #[error("invalid room name: {0:?}")]
    InvalidName(String),
    /// A room with this name already exists
    #[error("room already exists: {0}")]
    DuplicateRoom(String),
    /// Default rooms cannot be deleted
    #[error("room {0} is a default room and cannot be deleted")]
    ProtectedRoom(String),
    /// Export requested with no records selected
    #[error("nothing to export")]
    EmptyExport,
    /// Writing or sharing the export document failed
    #[error("export failed: {0}")]
    ExportFailed(String),
    /// A date bound or record date is not a YYYY-MM-DD calendar date
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    /// Settings file could not be read or is invalid
    #[error("configuration error: {0}")]
    Config(String),
    /// Terminal setup or drawing failed
    #[error("terminal error: {0}")]
    Tui(String),
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for RelcheckError {
    fn from(err: toml::de::Error) -> Self {
        RelcheckError::Config(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for relcheck operations
pub type Result<T> = std::result::Result<T, RelcheckError>;

/// User-facing error presentation
pub mod error {
    use super::RelcheckError;

    /// A blocking notice shown to the user until dismissed
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Notice {
        pub title: String,
        pub message: String,
    }

    impl Notice {
        pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
            Self {
                title: title.into(),
                message: message.into(),
            }
        }
    }

    /// Convert an error into the notice presented to the user
    pub fn notice_for(error: &RelcheckError) -> Notice {
        match error {
            RelcheckError::InvalidName(_) => {
                Notice::new("Invalid Name", "Please enter a valid room name.")
            }
            RelcheckError::DuplicateRoom(_) => {
                Notice::new("Room Exists", "A room with this name already exists.")
            }
            RelcheckError::ProtectedRoom(_) => Notice::new(
                "Cannot Delete Default Room",
                "The default room numbers cannot be deleted.",
            ),
            RelcheckError::EmptyExport => {
                Notice::new("No data", "Please filter data before exporting.")
            }
            RelcheckError::ExportFailed(_) => Notice::new(
                "Export Failed",
                "An error occurred while saving the file.",
            ),
            RelcheckError::InvalidDate(value) => Notice::new(
                "Invalid Date",
                format!("{:?} is not a date. Use the YYYY-MM-DD format.", value),
            ),
            RelcheckError::Config(msg) => Notice::new("Configuration Error", msg.clone()),
            RelcheckError::Tui(msg) => Notice::new("Terminal Error", msg.clone()),
            RelcheckError::Io(err) => Notice::new("I/O Error", err.to_string()),
        }
    }

    /// Notice shown when a requested date filter matched nothing
    pub fn no_entries_in_range() -> Notice {
        Notice::new(
            "No data",
            "No entries found within the specified date range.",
        )
    }
}

// Common types and constants
pub const APP_NAME: &str = "relcheck";
pub const CONFIG_FILE: &str = "relcheck.toml";
pub const LOG_FILE: &str = "relcheck.log";
pub const REPORT_TITLE: &str = "Daily Status Check: Reliability Tests";
pub const EXPORT_FILE_NAME: &str = "checklist.txt";
pub const EXPORT_MIME_TYPE: &str = "text/plain";
pub const EXPORT_DIALOG_TITLE: &str = "Export Checklist Data";
/// Rooms present at startup that can never be deleted
pub const DEFAULT_ROOMS: [&str; 2] = ["LS317", "N434"];

/// Whether `room` is one of the protected default rooms
pub fn is_default_room(room: &str) -> bool {
    DEFAULT_ROOMS.contains(&room)
}
