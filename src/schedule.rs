//! Caller-declared activation instants for named devices.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A device that must be on at exactly `at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Device name; need not exist in the registry.
    pub device: String,
    /// Activation instant, matched by exact equality.
    pub at: NaiveDateTime,
}

impl ScheduleEntry {
    pub fn new(device: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            device: device.into(),
            at,
        }
    }
}

/// Ordered list of schedule entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleTable {
    entries: Vec<ScheduleEntry>,
}

impl ScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Duplicates are kept.
    pub fn push(&mut self, device: impl Into<String>, at: NaiveDateTime) {
        self.entries.push(ScheduleEntry::new(device, at));
    }

    /// Builder form of [`ScheduleTable::push`].
    pub fn with(mut self, device: impl Into<String>, at: NaiveDateTime) -> Self {
        self.push(device, at);
        self
    }

    /// Entries whose instant equals `now`, in table order.
    pub fn due_at(&self, now: NaiveDateTime) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(move |e| e.at == now)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ScheduleEntry> for ScheduleTable {
    fn from_iter<I: IntoIterator<Item = ScheduleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
