//! Entry recorder
//!
//! Keeps the working set of form fields for the entry screen and turns it
//! into an immutable [`Record`] on save. Upstream selection changes (room,
//! tester, last-tester flag, title list) arrive through [`EntryRecorder::sync`].

use tracing::{debug, info};

use crate::models::{Record, RecordField};
use crate::util::Clock;

/// Snapshot of the shell's selection handed to the recorder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub room: String,
    /// Tester at the shell's current index, or empty
    pub tester: String,
    pub is_last_tester: bool,
    /// Configured testers of the room, in visiting order
    pub testers: Vec<String>,
    /// Configured other-parameter titles of the room
    pub other_titles: Vec<String>,
}

impl Selection {
    fn first_title(&self) -> String {
        self.other_titles.first().cloned().unwrap_or_default()
    }

    /// Tester following `tester` in the configured order, or empty
    fn tester_after(&self, tester: &str) -> String {
        self.testers
            .iter()
            .position(|t| t == tester)
            .and_then(|index| self.testers.get(index + 1))
            .cloned()
            .unwrap_or_default()
    }
}

/// Field values currently shown on the entry form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingEntry {
    pub date: String,
    pub time: String,
    pub room: String,
    pub tester: String,
    pub active_sockets: String,
    pub temperature: String,
    pub humidity: String,
    pub voltage: String,
    pub failed_positions: String,
    pub other_param_title: String,
    pub other_param_value: String,
}

impl WorkingEntry {
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::ActiveSockets => &self.active_sockets,
            RecordField::Temperature => &self.temperature,
            RecordField::Humidity => &self.humidity,
            RecordField::Voltage => &self.voltage,
            RecordField::FailedPositions => &self.failed_positions,
            RecordField::OtherParamTitle => &self.other_param_title,
            RecordField::OtherParamValue => &self.other_param_value,
        }
    }

    fn get_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::ActiveSockets => &mut self.active_sockets,
            RecordField::Temperature => &mut self.temperature,
            RecordField::Humidity => &mut self.humidity,
            RecordField::Voltage => &mut self.voltage,
            RecordField::FailedPositions => &mut self.failed_positions,
            RecordField::OtherParamTitle => &mut self.other_param_title,
            RecordField::OtherParamValue => &mut self.other_param_value,
        }
    }
}

/// Builds records from the entry form
#[derive(Debug)]
pub struct EntryRecorder {
    clock: Box<dyn Clock>,
    working: WorkingEntry,
    observed: Selection,
    disabled: bool,
}

impl EntryRecorder {
    /// Activate the form for `selection`, stamping date and time once
    pub fn new(clock: Box<dyn Clock>, selection: Selection) -> Self {
        let working = WorkingEntry {
            date: clock.today(),
            time: clock.now_time(),
            room: selection.room.clone(),
            tester: selection.tester.clone(),
            other_param_title: selection.first_title(),
            ..WorkingEntry::default()
        };
        Self {
            clock,
            working,
            disabled: selection.is_last_tester,
            observed: selection,
        }
    }

    pub fn working(&self) -> &WorkingEntry {
        &self.working
    }

    /// Selection last observed through [`sync`](Self::sync)
    pub fn selection(&self) -> &Selection {
        &self.observed
    }

    /// Whether reading fields and the title picker are read-only
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Observe the shell's current selection.
    ///
    /// Tester and title are reset when the tester, the last-tester flag or
    /// the title list changed since the previous call. Readings typed by
    /// the user are kept.
    pub fn sync(&mut self, selection: &Selection) {
        if *selection == self.observed {
            return;
        }
        if selection.room != self.observed.room {
            self.working.room = selection.room.clone();
        }
        if selection.tester != self.observed.tester
            || selection.is_last_tester != self.observed.is_last_tester
            || selection.other_titles != self.observed.other_titles
        {
            self.working.tester = selection.tester.clone();
            self.working.other_param_title = selection.first_title();
            self.disabled = selection.is_last_tester;
            debug!(
                tester = %self.working.tester,
                disabled = self.disabled,
                "entry form re-initialized"
            );
        }
        self.observed = selection.clone();
    }

    /// Replace a field value. Returns false when the form is disabled.
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) -> bool {
        if self.disabled {
            return false;
        }
        *self.working.get_mut(field) = value.into();
        true
    }

    /// Move the title picker to the next or previous configured title
    pub fn cycle_other_title(&mut self, forward: bool) -> bool {
        let titles = &self.observed.other_titles;
        if self.disabled || titles.is_empty() {
            return false;
        }
        let next = match titles.iter().position(|t| *t == self.working.other_param_title) {
            Some(index) if forward => (index + 1) % titles.len(),
            Some(index) => (index + titles.len() - 1) % titles.len(),
            None => 0,
        };
        self.working.other_param_title = titles[next].clone();
        true
    }

    /// Emit the working fields as a record and prepare the next entry.
    ///
    /// The next entry keeps the room, gets a fresh date and time, the
    /// tester following the one just used (empty at the end of the list)
    /// and the first configured title.
    pub fn save(&mut self) -> Record {
        let next_tester = self.observed.tester_after(&self.working.tester);
        let next = WorkingEntry {
            date: self.clock.today(),
            time: self.clock.now_time(),
            room: self.working.room.clone(),
            tester: next_tester,
            other_param_title: self.observed.first_title(),
            ..WorkingEntry::default()
        };
        let done = std::mem::replace(&mut self.working, next);

        let record = Record {
            date: done.date,
            time: done.time,
            room: done.room,
            tester: done.tester,
            active_sockets: done.active_sockets,
            temperature: done.temperature,
            humidity: done.humidity,
            voltage: done.voltage,
            failed_positions: done.failed_positions,
            other_param_title: done.other_param_title,
            other_param_value: done.other_param_value,
            timestamp: self.clock.now(),
        };
        info!(room = %record.room, tester = %record.tester, "entry saved");
        record
    }
}
