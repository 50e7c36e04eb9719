//! Utility functions module
//!
//! Contains the date/time source used to stamp entries.

pub mod clock;

// Re-export commonly used types
pub use clock::{is_valid_time_format, Clock, FixedClock, SystemClock, DEFAULT_TIME_FORMAT};
