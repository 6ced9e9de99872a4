//! Relations: pairwise transition rules between two states

use crate::{KernelRng, RelationId, StateId, TransitionError, Value};
use std::fmt;

/// Outcome of a transition function
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Overwrite the left state with this value
    Set(Value),
    /// Leave the store untouched (nothing is logged)
    Hold,
}

impl Transition {
    /// Check if this outcome leaves the store untouched
    pub fn is_hold(&self) -> bool {
        matches!(self, Transition::Hold)
    }
}

impl From<Option<Value>> for Transition {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => Transition::Set(v),
            None => Transition::Hold,
        }
    }
}

impl From<Value> for Transition {
    fn from(value: Value) -> Self {
        Transition::Set(value)
    }
}

/// Boxed transition capability
///
/// Receives the left value, the right value and the kernel's generator, and
/// decides the left state's next value.
pub type TransitionFn =
    Box<dyn FnMut(&Value, &Value, &mut KernelRng) -> Result<Transition, TransitionError>>;

/// A registered relation
pub struct Relation {
    id: RelationId,
    left: StateId,
    right: StateId,
    transition: TransitionFn,
}

impl Relation {
    /// Identity of this relation
    pub fn id(&self) -> RelationId {
        self.id
    }

    /// The state this relation writes
    pub fn left(&self) -> &StateId {
        &self.left
    }

    /// The state this relation only reads
    pub fn right(&self) -> &StateId {
        &self.right
    }

    pub(crate) fn apply(
        &mut self,
        left: &Value,
        right: &Value,
        rng: &mut KernelRng,
    ) -> Result<Transition, TransitionError> {
        (self.transition)(left, right, rng)
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("id", &self.id)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// Registry of relations in registration order
#[derive(Debug, Default)]
pub struct RelationRegistry {
    relations: Vec<Relation>,
    next_id: u64,
}

impl RelationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation; always creates a new entry
    pub fn add(&mut self, left: StateId, right: StateId, transition: TransitionFn) -> RelationId {
        let id = RelationId::new(self.next_id);
        self.next_id += 1;
        self.relations.push(Relation {
            id,
            left,
            right,
            transition,
        });
        id
    }

    /// Number of registered relations
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Check if no relation is registered
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Iterate relations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Relation> {
        self.relations.iter_mut()
    }
}
