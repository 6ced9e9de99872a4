//! Excitation: the stepping algorithm
//!
//! One excitation runs `pulse_size` rounds. Each round is charged one unit
//! up front and then applies every relation in registration order against
//! the live density, so a relation sees the writes of the relations before
//! it in the same round.
//!
//! The clock advances once per excitation, after the rounds. A budget
//! failure still advances it; a failing transition does not.

use crate::{
    Clock, Constraints, DensityStore, Error, HistoryLog, KernelRng, Record, RelationRegistry,
    Result, Transition, UnitMeter,
};

/// Counters describing one excitation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExciteOutcome {
    /// Pulse rounds that were paid for
    pub rounds: u32,
    /// Relations that wrote a new value
    pub applied: u64,
    /// Relations that returned `Transition::Hold`
    pub held: u64,
    /// Relations skipped because a state was undefined
    pub skipped: u64,
    /// Whether the depth guard swallowed the call
    pub ignored: bool,
}

/// Borrowed view of the kernel parts an excitation touches
pub(crate) struct ExcitationEngine<'a> {
    pub constraints: &'a Constraints,
    pub meter: &'a mut UnitMeter,
    pub density: &'a mut DensityStore,
    pub relations: &'a mut RelationRegistry,
    pub rng: &'a mut KernelRng,
    pub history: &'a mut HistoryLog,
    pub clock: &'a mut Clock,
}

impl ExcitationEngine<'_> {
    /// Run one excitation at the given depth
    pub fn excite(&mut self, depth: u32) -> Result<ExciteOutcome> {
        if depth > self.constraints.max_depth() {
            tracing::debug!(
                depth,
                max_depth = self.constraints.max_depth(),
                "excitation ignored above depth ceiling"
            );
            return Ok(ExciteOutcome {
                ignored: true,
                ..Default::default()
            });
        }

        let mut outcome = ExciteOutcome::default();
        let pulses = self.run_pulses(&mut outcome);

        if !matches!(pulses, Err(Error::Transition { .. })) {
            self.clock.advance();
        }

        pulses.map(|()| outcome)
    }

    fn run_pulses(&mut self, outcome: &mut ExciteOutcome) -> Result<()> {
        let t = self.clock.tick();

        for _ in 0..self.constraints.pulse_size() {
            self.meter.consume(1)?;
            outcome.rounds += 1;

            for relation in self.relations.iter_mut() {
                let id = relation.id();
                let left = relation.left().clone();
                let right = relation.right().clone();

                let (Some(from), Some(other)) = (
                    self.density.get(left.as_str()),
                    self.density.get(right.as_str()),
                ) else {
                    tracing::trace!(relation = %id, %left, %right, "relation skipped: undefined state");
                    outcome.skipped += 1;
                    continue;
                };

                let next = relation.apply(from, other, self.rng).map_err(|source| {
                    tracing::debug!(relation = %id, error = %source, "transition failed");
                    Error::Transition {
                        relation: id,
                        left: left.clone(),
                        right: right.clone(),
                        source,
                    }
                })?;

                match next {
                    Transition::Hold => outcome.held += 1,
                    Transition::Set(to) => {
                        let from = from.clone();
                        tracing::trace!(relation = %id, state = %left, %from, %to, "state excited");
                        self.density.define(left.clone(), to.clone());
                        self.history.record(t, Record::Excite { a: left, from, to });
                        outcome.applied += 1;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KernelConfig, TransitionError, TransitionFn, Value};

    struct Parts {
        constraints: Constraints,
        meter: UnitMeter,
        density: DensityStore,
        relations: RelationRegistry,
        rng: KernelRng,
        history: HistoryLog,
        clock: Clock,
    }

    impl Parts {
        fn new(config: KernelConfig) -> Self {
            Self {
                constraints: config.constraints(),
                meter: UnitMeter::new(config.max_units),
                density: DensityStore::new(),
                relations: RelationRegistry::new(),
                rng: KernelRng::new(config.seed),
                history: HistoryLog::new(),
                clock: Clock::new(),
            }
        }

        fn excite(&mut self, depth: u32) -> Result<ExciteOutcome> {
            ExcitationEngine {
                constraints: &self.constraints,
                meter: &mut self.meter,
                density: &mut self.density,
                relations: &mut self.relations,
                rng: &mut self.rng,
                history: &mut self.history,
                clock: &mut self.clock,
            }
            .excite(depth)
        }
    }

    fn increment() -> TransitionFn {
        Box::new(|a: &Value, _: &Value, _: &mut KernelRng| {
            Ok(Transition::Set(Value::Int(a.as_int().unwrap_or(0) + 1)))
        })
    }

    fn failing() -> TransitionFn {
        Box::new(
            |_: &Value, _: &Value, _: &mut KernelRng| -> std::result::Result<Transition, TransitionError> {
                Err("boom".into())
            },
        )
    }

    #[test]
    fn test_pulse_rounds_and_single_tick() {
        let mut parts = Parts::new(KernelConfig::new().with_pulse_size(3));
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());

        let outcome = parts.excite(0).unwrap();

        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.applied, 3);
        assert_eq!(parts.density.get("A"), Some(&Value::Int(3)));
        assert_eq!(parts.meter.used(), 3);
        assert_eq!(parts.clock.tick(), 1);
        assert!(parts.history.entries().iter().all(|e| e.t == 0));
    }

    #[test]
    fn test_every_relation_counted_each_round() {
        let mut parts = Parts::new(KernelConfig::new().with_pulse_size(4));
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());
        parts.relations.add(
            "B".into(),
            "A".into(),
            Box::new(|_: &Value, _: &Value, _: &mut KernelRng| Ok(Transition::Hold)),
        );
        parts.relations.add("A".into(), "missing".into(), increment());

        let outcome = parts.excite(0).unwrap();

        let relations = parts.relations.len() as u64;
        assert_eq!(outcome.rounds, 4);
        assert_eq!((outcome.applied, outcome.held, outcome.skipped), (4, 4, 4));
        assert_eq!(
            outcome.applied + outcome.held + outcome.skipped,
            u64::from(outcome.rounds) * relations
        );
    }

    #[test]
    fn test_later_relation_sees_earlier_write() {
        let mut parts = Parts::new(KernelConfig::new());
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());
        parts.relations.add(
            "B".into(),
            "A".into(),
            Box::new(|_: &Value, a: &Value, _: &mut KernelRng| Ok(Transition::Set(a.clone()))),
        );

        parts.excite(0).unwrap();
        assert_eq!(parts.density.get("B"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_undefined_state_skipped() {
        let mut parts = Parts::new(KernelConfig::new());
        parts.density.define("A".into(), Value::Int(0));
        parts.relations.add("A".into(), "missing".into(), increment());

        let outcome = parts.excite(0).unwrap();

        assert_eq!(outcome.skipped, 1);
        assert_eq!(parts.density.get("A"), Some(&Value::Int(0)));
        assert!(parts.history.is_empty());
        assert!(!parts.density.contains("missing"));
    }

    #[test]
    fn test_depth_guard() {
        let mut parts = Parts::new(KernelConfig::new().with_max_depth(2));
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());

        let outcome = parts.excite(3).unwrap();

        assert!(outcome.ignored);
        assert_eq!(parts.meter.used(), 0);
        assert_eq!(parts.clock.tick(), 0);
        assert!(parts.history.is_empty());

        // The ceiling itself is allowed
        assert!(!parts.excite(2).unwrap().ignored);
    }

    #[test]
    fn test_budget_failure_mid_pulse_still_advances_clock() {
        let mut parts = Parts::new(KernelConfig::new().with_max_units(2).with_pulse_size(5));
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());

        let err = parts.excite(0).unwrap_err();

        assert!(err.is_constraint_violation());
        assert_eq!(parts.density.get("A"), Some(&Value::Int(2)));
        assert_eq!(parts.history.len(), 2);
        assert_eq!(parts.meter.used(), 3);
        assert_eq!(parts.clock.tick(), 1);
    }

    #[test]
    fn test_failing_transition_keeps_earlier_writes() {
        let mut parts = Parts::new(KernelConfig::new());
        parts.density.define("A".into(), Value::Int(0));
        parts.density.define("B".into(), Value::Int(0));
        parts.relations.add("A".into(), "B".into(), increment());
        parts
            .relations
            .add("B".into(), "A".into(), failing());
        parts.relations.add("B".into(), "A".into(), increment());

        let err = parts.excite(0).unwrap_err();

        match err {
            Error::Transition { relation, left, .. } => {
                assert_eq!(relation.raw(), 1);
                assert_eq!(left.as_str(), "B");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(parts.density.get("A"), Some(&Value::Int(1)));
        assert_eq!(parts.density.get("B"), Some(&Value::Int(0)));
        assert_eq!(parts.clock.tick(), 0);
        assert_eq!(parts.history.len(), 1);
    }
}
