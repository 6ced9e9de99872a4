//! Density store: the current value of every defined state

use crate::{StateId, Value};
use indexmap::IndexMap;

/// Point-in-time copy of the whole density
///
/// Keys are in first-definition order.
pub type Snapshot = IndexMap<StateId, Value>;

/// Storage for all states
///
/// Redefining a state replaces its value but keeps its original position.
/// There is no removal.
#[derive(Debug, Clone, Default)]
pub struct DensityStore {
    states: IndexMap<StateId, Value>,
}

impl DensityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a state, returning the previous value
    pub fn define(&mut self, id: StateId, value: Value) -> Option<Value> {
        self.states.insert(id, value)
    }

    /// Get the current value of a state, `None` if it was never defined
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.states.get(id)
    }

    /// Check whether a state is defined
    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    /// Number of defined states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no state is defined
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate states in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &Value)> {
        self.states.iter()
    }

    /// Owned copy of the current density
    pub fn snapshot(&self) -> Snapshot {
        self.states.clone()
    }
}
