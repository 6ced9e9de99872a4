//! Rebuild density from a trace's recorded outcomes
//!
//! Folding `define` and `excite` entries in order reproduces the density at
//! any tick. Transitions are never re-run; the trace is taken at its word,
//! and `observe` entries are what it gets checked against.

use crate::{Error, Result};
use absolute_core::{HistoryEntry, Record, Snapshot, Tick};

/// Folds a trace back into density snapshots
pub struct Reconstructor<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> Reconstructor<'a> {
    /// Create a reconstructor over a trace
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    /// Density after every entry stamped at or before `tick`
    pub fn density_at(&self, tick: Tick) -> Snapshot {
        let mut density = Snapshot::new();
        for entry in self.entries.iter().take_while(|e| e.t <= tick) {
            apply(&mut density, &entry.record);
        }
        density
    }

    /// Density after the whole trace
    pub fn final_density(&self) -> Snapshot {
        let mut density = Snapshot::new();
        for entry in self.entries {
            apply(&mut density, &entry.record);
        }
        density
    }

    /// Check every recorded observation against the folded density
    ///
    /// Returns the number of observations verified.
    pub fn verify_observations(&self) -> Result<usize> {
        let mut density = Snapshot::new();
        let mut verified = 0;

        for (index, entry) in self.entries.iter().enumerate() {
            if let Record::Observe(recorded) = &entry.record {
                let mismatch = recorded
                    .keys()
                    .chain(density.keys())
                    .find(|id| recorded.get(*id) != density.get(*id));

                if let Some(state) = mismatch {
                    return Err(Error::ObservationMismatch {
                        index,
                        t: entry.t,
                        state: state.clone(),
                        recorded: recorded.get(state).cloned(),
                        reconstructed: density.get(state).cloned(),
                    });
                }
                verified += 1;
            }
            apply(&mut density, &entry.record);
        }

        tracing::debug!(verified, entries = self.entries.len(), "observations verified");
        Ok(verified)
    }
}

fn apply(density: &mut Snapshot, record: &Record) {
    match record {
        Record::Define { id, value } => {
            density.insert(id.clone(), value.clone());
        }
        Record::Excite { a, to, .. } => {
            density.insert(a.clone(), to.clone());
        }
        Record::Relate { .. } | Record::Observe(_) => {}
    }
}
