//! Error types for absolute-core

use crate::{RelationId, StateId};
use thiserror::Error;

/// Error produced by a user transition function
pub type TransitionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// The lifetime unit budget was exceeded.
    ///
    /// Units are never refunded, so once this is returned every further
    /// consuming call on the same kernel fails the same way.
    #[error("Execution constraint violated: maxUnits exceeded ({used} > {max})")]
    ConstraintViolation { used: u64, max: u64 },

    /// A relation's transition function reported a failure
    #[error("Transition failed for {relation} ({left} -> {right}): {source}")]
    Transition {
        relation: RelationId,
        left: StateId,
        right: StateId,
        #[source]
        source: TransitionError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl Error {
    /// Check whether this is a budget violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Error::ConstraintViolation { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
