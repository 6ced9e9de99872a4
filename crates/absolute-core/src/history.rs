//! Append-only history of every kernel operation
//!
//! Each entry carries the clock tick at which it was recorded, its type and
//! a type-specific payload. Serialized, an entry has the shape
//! `{"t": 0, "type": "define", "payload": {"id": "A", "value": 1}}`.
//!
//! The log only ever grows. [`HistoryLog::replay`] hands out an owned copy,
//! so callers can mutate what they get back without touching the record.

use crate::{Snapshot, StateId, Tick, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Define,
    Relate,
    Excite,
    Observe,
}

impl EntryKind {
    /// Lowercase name as it appears in serialized traces
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Define => "define",
            EntryKind::Relate => "relate",
            EntryKind::Excite => "excite",
            EntryKind::Observe => "observe",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation-specific payload, tagged with its entry type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Record {
    /// A state was defined or redefined
    Define { id: StateId, value: Value },
    /// A relation was registered between `a` (written) and `b` (read)
    Relate { a: StateId, b: StateId },
    /// A relation overwrote state `a`
    Excite { a: StateId, from: Value, to: Value },
    /// The density was observed
    Observe(Snapshot),
}

impl Record {
    /// The entry type of this record
    pub fn kind(&self) -> EntryKind {
        match self {
            Record::Define { .. } => EntryKind::Define,
            Record::Relate { .. } => EntryKind::Relate,
            Record::Excite { .. } => EntryKind::Excite,
            Record::Observe(_) => EntryKind::Observe,
        }
    }

    /// Check whether this record names the given state
    pub fn touches(&self, id: &str) -> bool {
        match self {
            Record::Define { id: state, .. } | Record::Excite { a: state, .. } => {
                state.as_str() == id
            }
            Record::Relate { a, b } => a.as_str() == id || b.as_str() == id,
            Record::Observe(snapshot) => snapshot.contains_key(id),
        }
    }
}

/// A single recorded operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Clock tick at the time of recording
    pub t: Tick,
    #[serde(flatten)]
    pub record: Record,
}

impl HistoryEntry {
    /// The entry type
    pub fn kind(&self) -> EntryKind {
        self.record.kind()
    }
}

/// Entries of a trace stamped within `start..=end`
pub fn entries_in_range(
    entries: &[HistoryEntry],
    start: Tick,
    end: Tick,
) -> impl Iterator<Item = &HistoryEntry> {
    entries.iter().filter(move |e| e.t >= start && e.t <= end)
}

/// The append-only history log
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with `t`
    pub fn record(&mut self, t: Tick, record: Record) {
        self.entries.push(HistoryEntry { t, record });
    }

    /// Borrow all entries in recording order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Independent deep copy of the whole log
    pub fn replay(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Get statistics about the log
    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_entries(&self.entries)
    }
}

/// Statistics about a history log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_entries: usize,
    pub define_count: usize,
    pub relate_count: usize,
    pub excite_count: usize,
    pub observe_count: usize,
    /// Tick of the first entry
    pub first_tick: Option<Tick>,
    /// Tick of the last entry
    pub last_tick: Option<Tick>,
}

impl HistoryStats {
    /// Compute statistics over any slice of entries (a full log or a
    /// `replay()` copy)
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let mut stats = HistoryStats {
            total_entries: entries.len(),
            first_tick: entries.first().map(|e| e.t),
            last_tick: entries.last().map(|e| e.t),
            ..Default::default()
        };
        for entry in entries {
            match entry.kind() {
                EntryKind::Define => stats.define_count += 1,
                EntryKind::Relate => stats.relate_count += 1,
                EntryKind::Excite => stats.excite_count += 1,
                EntryKind::Observe => stats.observe_count += 1,
            }
        }
        stats
    }
}
