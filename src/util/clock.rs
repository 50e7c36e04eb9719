//! Date and time source
//!
//! Entries capture the date and wall-clock time when the form is
//! initialized. The values are opaque strings to the rest of the crate.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::warn;

/// Time format used when none is configured or the configured one is invalid
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Whether `format` is a non-empty chrono strftime pattern without unknown specifiers
pub fn is_valid_time_format(format: &str) -> bool {
    !format.trim().is_empty()
        && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Supplies the date and time strings stamped on entries
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current calendar date as `YYYY-MM-DD`
    fn today(&self) -> String;
    /// Current wall-clock time in the configured format
    fn now_time(&self) -> String;
    /// Current instant, used as the record creation timestamp
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the local system time
#[derive(Debug, Clone)]
pub struct SystemClock {
    time_format: String,
}

impl SystemClock {
    pub fn new(time_format: impl Into<String>) -> Self {
        Self {
            time_format: time_format.into(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn now_time(&self) -> String {
        let now = Local::now();
        let mut time = String::new();
        if write!(time, "{}", now.format(&self.time_format)).is_err() {
            warn!(format = %self.time_format, "invalid time format, using default");
            time = now.format(DEFAULT_TIME_FORMAT).to_string();
        }
        time
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
    time: NaiveTime,
}

impl FixedClock {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Clock at `date` 09:00:00
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date, NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn now_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(self.time))
    }
}
