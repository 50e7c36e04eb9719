//! Data models module
//!
//! Contains room configuration structures and the record produced by
//! each entry submission.

pub mod record;
pub mod room;

// Re-export commonly used types
pub use record::{Record, RecordField};
pub use room::{RoomConfig, RoomField, RoomMap};
