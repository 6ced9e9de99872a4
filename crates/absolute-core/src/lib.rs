//! Absolute Core - deterministic, unit-bounded state-transition kernel
//!
//! A handful of named scalar states evolve under user-supplied pairwise
//! relations, driven by a seeded generator, with every operation recorded
//! into an append-only history:
//! - `Kernel` - composition root and the only public entry point
//! - `DensityStore` - state identifier to current value
//! - `RelationRegistry` - transition rules in registration order
//! - `KernelRng` - bit-exact deterministic generator
//! - `UnitMeter` - lifetime operation budget
//! - `HistoryLog` - replayable (auditable) trace
//!
//! ## Bounded execution
//!
//! Defining a state, registering a relation, observing, and every pulse
//! round of an excitation each cost one unit. Crossing `max_units` fails
//! the call before it mutates anything, and the kernel stays queryable
//! but can no longer make progress.
//!
//! ```
//! use absolute_core::{Kernel, KernelConfig, Value};
//!
//! let mut kernel = Kernel::new(KernelConfig::new().with_max_units(2)).unwrap();
//! kernel.define_state("A", 1).unwrap();
//! kernel.define_state("B", 2).unwrap();
//! assert!(kernel.observe().unwrap_err().is_constraint_violation());
//! assert_eq!(kernel.get_state("A"), Some(&Value::Int(1)));
//! ```

mod config;
mod density;
mod error;
mod excitation;
mod history;
mod identity;
mod kernel;
mod meter;
mod relation;
mod rng;
pub mod time;
mod value;

pub use config::{
    Constraints, KernelConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_UNITS, DEFAULT_PULSE_SIZE,
};
pub use density::{DensityStore, Snapshot};
pub use error::{Error, Result, TransitionError};
pub use history::{entries_in_range, EntryKind, HistoryEntry, HistoryLog, HistoryStats, Record};
pub use identity::{RelationId, StateId};
pub use kernel::Kernel;
pub use meter::UnitMeter;
pub use relation::{Relation, RelationRegistry, Transition, TransitionFn};
pub use rng::KernelRng;
pub use time::{Clock, Tick};
pub use value::Value;
