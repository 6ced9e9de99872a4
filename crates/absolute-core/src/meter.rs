//! Unit budget enforcement

use crate::{Error, Result};

/// Tracks cumulative unit consumption against a fixed ceiling
///
/// The running total is charged before the check and never refunded, so a
/// failed `consume` leaves the meter permanently exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMeter {
    used: u64,
    max: u64,
}

impl UnitMeter {
    /// Create a meter with the given ceiling
    pub fn new(max: u64) -> Self {
        Self { used: 0, max }
    }

    /// Charge `units` against the budget
    ///
    /// Must be called before the mutation it pays for.
    pub fn consume(&mut self, units: u64) -> Result<()> {
        debug_assert!(units > 0, "unit consumption must be positive");
        self.used = self.used.saturating_add(units);
        if self.used > self.max {
            tracing::warn!(used = self.used, max = self.max, "unit budget exhausted");
            return Err(Error::ConstraintViolation {
                used: self.used,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Units consumed so far, including the unit of a failed call
    pub fn used(&self) -> u64 {
        self.used
    }

    /// The configured ceiling
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Units still available
    pub fn remaining(&self) -> u64 {
        self.max.saturating_sub(self.used)
    }

    /// Whether the ceiling has been crossed
    pub fn is_exhausted(&self) -> bool {
        self.used > self.max
    }
}
