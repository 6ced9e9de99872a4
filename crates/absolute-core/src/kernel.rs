//! The kernel: composition root and public surface
//!
//! Every consuming operation charges the unit meter first, then mutates,
//! then records. A call that fails the budget therefore leaves neither a
//! mutation nor a history entry behind.

use crate::{
    excitation::ExcitationEngine, Clock, Constraints, DensityStore, HistoryEntry, HistoryLog,
    KernelConfig, KernelRng, Record, RelationId, RelationRegistry, Result, Snapshot, StateId,
    Tick, Transition, TransitionError, UnitMeter, Value,
};

/// A deterministic, unit-bounded state-transition engine
///
/// Owns its density, relations, history, meter and generator outright;
/// nothing is shared between instances.
#[derive(Debug)]
pub struct Kernel {
    constraints: Constraints,
    meter: UnitMeter,
    clock: Clock,
    density: DensityStore,
    relations: RelationRegistry,
    history: HistoryLog,
    rng: KernelRng,
}

impl Kernel {
    /// Create a kernel from a validated configuration
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(&config))
    }

    /// Create a kernel with default limits and the given seed
    pub fn with_seed(seed: u32) -> Result<Self> {
        Self::new(KernelConfig::new().with_seed(seed))
    }

    fn from_valid(config: &KernelConfig) -> Self {
        tracing::debug!(
            max_units = config.max_units,
            max_depth = config.max_depth,
            pulse_size = config.pulse_size,
            seed = config.seed,
            "kernel created"
        );
        Self {
            constraints: config.constraints(),
            meter: UnitMeter::new(config.max_units),
            clock: Clock::new(),
            density: DensityStore::new(),
            relations: RelationRegistry::new(),
            history: HistoryLog::new(),
            rng: KernelRng::new(config.seed),
        }
    }

    /// Define or redefine a state
    pub fn define_state(&mut self, id: impl Into<StateId>, value: impl Into<Value>) -> Result<()> {
        self.meter.consume(1)?;
        let id = id.into();
        let value = value.into();
        tracing::debug!(state = %id, %value, "state defined");
        self.density.define(id.clone(), value.clone());
        self.history
            .record(self.clock.tick(), Record::Define { id, value });
        Ok(())
    }

    /// Current value of a state, `None` if it was never defined
    pub fn get_state(&self, id: &str) -> Option<&Value> {
        self.density.get(id)
    }

    /// Register a relation whose transition cannot fail
    ///
    /// The transition may return a `Value`, a `Transition`, or an
    /// `Option<Value>` where `None` means "no update".
    ///
    /// ```
    /// use absolute_core::{Kernel, KernelConfig};
    ///
    /// let mut kernel = Kernel::new(KernelConfig::new().with_seed(42)).unwrap();
    /// kernel.define_state("A", 1).unwrap();
    /// kernel.define_state("B", 2).unwrap();
    /// kernel
    ///     .relate("A", "B", |a, b, rng| {
    ///         if rng.next_f64() > 0.5 {
    ///             a.checked_add(b)
    ///         } else {
    ///             None
    ///         }
    ///     })
    ///     .unwrap();
    /// kernel.excite().unwrap();
    /// assert_eq!(kernel.get_state("A").and_then(|v| v.as_int()), Some(3));
    /// ```
    pub fn relate<F, T>(
        &mut self,
        left: impl Into<StateId>,
        right: impl Into<StateId>,
        mut transition: F,
    ) -> Result<RelationId>
    where
        F: FnMut(&Value, &Value, &mut KernelRng) -> T + 'static,
        T: Into<Transition>,
    {
        self.relate_fallible(left, right, move |a, b, rng| Ok(transition(a, b, rng).into()))
    }

    /// Register a relation whose transition may fail
    ///
    /// A failure aborts the excitation that hit it (see [`Kernel::excite`]).
    pub fn relate_fallible<F>(
        &mut self,
        left: impl Into<StateId>,
        right: impl Into<StateId>,
        transition: F,
    ) -> Result<RelationId>
    where
        F: FnMut(&Value, &Value, &mut KernelRng) -> std::result::Result<Transition, TransitionError>
            + 'static,
    {
        self.meter.consume(1)?;
        let left = left.into();
        let right = right.into();
        let id = self
            .relations
            .add(left.clone(), right.clone(), Box::new(transition));
        tracing::debug!(relation = %id, %left, %right, "relation registered");
        self.history
            .record(self.clock.tick(), Record::Relate { a: left, b: right });
        Ok(id)
    }

    /// Run one excitation at depth 0
    ///
    /// Applies every relation `pulse_size` times, charging one unit per
    /// round, then advances the clock by one. Errors:
    ///
    /// - `ConstraintViolation` when a round cannot be paid for. Rounds
    ///   already applied stay applied and the clock still advances.
    /// - `Transition` when a transition fails. Relations before it in the
    ///   round stay applied, the rest are not, and the clock does not move.
    pub fn excite(&mut self) -> Result<()> {
        self.excite_at(0)
    }

    /// Run one excitation at an explicit depth
    ///
    /// A depth above `max_depth` is a silent no-op: no units, no history,
    /// no clock advance.
    pub fn excite_at(&mut self, depth: u32) -> Result<()> {
        let outcome = ExcitationEngine {
            constraints: &self.constraints,
            meter: &mut self.meter,
            density: &mut self.density,
            relations: &mut self.relations,
            rng: &mut self.rng,
            history: &mut self.history,
            clock: &mut self.clock,
        }
        .excite(depth)?;

        if !outcome.ignored {
            tracing::debug!(
                depth,
                rounds = outcome.rounds,
                applied = outcome.applied,
                held = outcome.held,
                skipped = outcome.skipped,
                clock = self.clock.tick(),
                "excitation complete"
            );
        }
        Ok(())
    }

    /// Observe the density
    ///
    /// Charges one unit, records the snapshot as an `observe` entry and
    /// returns it.
    pub fn observe(&mut self) -> Result<Snapshot> {
        self.meter.consume(1)?;
        let snapshot = self.density.snapshot();
        tracing::debug!(states = snapshot.len(), "density observed");
        self.history
            .record(self.clock.tick(), Record::Observe(snapshot.clone()));
        Ok(snapshot)
    }

    /// Independent deep copy of the full history
    pub fn replay(&self) -> Vec<HistoryEntry> {
        self.history.replay()
    }

    /// Borrow the history without copying
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Borrow the density without charging units or recording
    pub fn density(&self) -> &DensityStore {
        &self.density
    }

    /// The frozen limits of this kernel
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Current clock tick
    pub fn clock(&self) -> Tick {
        self.clock.tick()
    }

    /// Units consumed so far
    pub fn units_used(&self) -> u64 {
        self.meter.used()
    }

    /// Units still available
    pub fn units_remaining(&self) -> u64 {
        self.meter.remaining()
    }

    /// Number of registered relations
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

impl Default for Kernel {
    /// Default limits always validate
    fn default() -> Self {
        Self::from_valid(&KernelConfig::default())
    }
}
