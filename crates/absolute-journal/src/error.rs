//! Error types for absolute-journal

use absolute_core::{StateId, Tick, Value};
use thiserror::Error;

/// Journal error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid tick range
    #[error("Invalid tick range: {0}..{1}")]
    InvalidTickRange(Tick, Tick),

    /// A recorded observation disagrees with the state folded from the trace
    #[error(
        "Observation mismatch at entry {index} (t={t}): state {state} recorded {recorded:?}, reconstructed {reconstructed:?}"
    )]
    ObservationMismatch {
        index: usize,
        t: Tick,
        state: StateId,
        recorded: Option<Value>,
        reconstructed: Option<Value>,
    },

    /// Export error
    #[error("Export error: {0}")]
    ExportError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, Error>;
