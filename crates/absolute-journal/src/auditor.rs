//! Auditing and analytics for kernel traces

use absolute_core::{
    entries_in_range, EntryKind, HistoryEntry, HistoryStats, Record, StateId, Tick, Value,
};
use indexmap::IndexMap;

/// Auditor for querying and analyzing a trace
pub struct Auditor<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> Auditor<'a> {
    /// Create a new auditor for a trace
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    /// Generate a comprehensive audit report
    pub fn generate_report(&self) -> AuditReport {
        let mut states: IndexMap<StateId, StateActivity> = IndexMap::new();

        for entry in self.entries {
            match &entry.record {
                Record::Define { id, .. } => {
                    states.entry(id.clone()).or_default().defines += 1;
                }
                Record::Excite { a, .. } => {
                    states.entry(a.clone()).or_default().excites += 1;
                }
                Record::Relate { a, b } => {
                    states.entry(a.clone()).or_default().relations_written += 1;
                    states.entry(b.clone()).or_default().relations_read += 1;
                }
                Record::Observe(_) => {}
            }
        }

        AuditReport {
            stats: HistoryStats::from_entries(self.entries),
            states,
        }
    }

    /// Query entries matching specific criteria
    pub fn query(&self, query: &AuditQuery) -> Vec<&'a HistoryEntry> {
        let start = query.start_tick.unwrap_or(0);
        let end = query.end_tick.unwrap_or(Tick::MAX);
        entries_in_range(self.entries, start, end)
            .filter(|entry| query.matches(entry))
            .collect()
    }

    /// Every value a state took, in order
    pub fn state_timeline(&self, id: &str) -> Vec<StateChange> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.record {
                Record::Define { id: state, value } if state.as_str() == id => Some(StateChange {
                    t: entry.t,
                    kind: EntryKind::Define,
                    from: None,
                    to: value.clone(),
                }),
                Record::Excite { a, from, to } if a.as_str() == id => Some(StateChange {
                    t: entry.t,
                    kind: EntryKind::Excite,
                    from: Some(from.clone()),
                    to: to.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Count entries of one type
    pub fn count(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }
}

/// One change in a state's value
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    /// Tick the change was recorded at
    pub t: Tick,
    /// `Define` or `Excite`
    pub kind: EntryKind,
    /// Prior value, known only for excitations
    pub from: Option<Value>,
    pub to: Value,
}

/// Per-state counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateActivity {
    pub defines: u64,
    pub excites: u64,
    /// Relations registered with this state on the written side
    pub relations_written: u64,
    /// Relations registered with this state on the read side
    pub relations_read: u64,
}

/// A comprehensive audit report
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub stats: HistoryStats,
    /// Activity per state, in order of first appearance
    pub states: IndexMap<StateId, StateActivity>,
}

impl std::fmt::Display for AuditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Audit Report ===")?;
        writeln!(f, "Total entries: {}", self.stats.total_entries)?;
        writeln!(f, "Defines: {}", self.stats.define_count)?;
        writeln!(f, "Relations: {}", self.stats.relate_count)?;
        writeln!(f, "Excitations: {}", self.stats.excite_count)?;
        writeln!(f, "Observations: {}", self.stats.observe_count)?;

        if let (Some(first), Some(last)) = (self.stats.first_tick, self.stats.last_tick) {
            writeln!(f, "Tick range: {} - {}", first, last)?;
        }

        if !self.states.is_empty() {
            writeln!(f, "\nStates:")?;
            for (id, activity) in &self.states {
                writeln!(
                    f,
                    "  {}: {} defines, {} excites, writes {} / reads {} relations",
                    id,
                    activity.defines,
                    activity.excites,
                    activity.relations_written,
                    activity.relations_read
                )?;
            }
        }

        Ok(())
    }
}

/// Query criteria for filtering trace entries
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Start tick (inclusive)
    pub start_tick: Option<Tick>,
    /// End tick (inclusive)
    pub end_tick: Option<Tick>,
    /// Filter by entry type
    pub kind: Option<EntryKind>,
    /// Filter by a state the entry names
    pub state: Option<StateId>,
}

impl AuditQuery {
    fn matches(&self, entry: &HistoryEntry) -> bool {
        if self.kind.is_some_and(|kind| entry.kind() != kind) {
            return false;
        }
        if let Some(state) = &self.state {
            if !entry.record.touches(state.as_str()) {
                return false;
            }
        }
        true
    }
}
