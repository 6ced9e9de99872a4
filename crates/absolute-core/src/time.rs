//! Logical clock for excitation steps

use std::fmt;

/// A discrete tick (logical time unit)
pub type Tick = u64;

/// Logical clock
///
/// Advances once per `excite` call, never per pulse round. History entries
/// are stamped with the tick current at the time they are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    tick: Tick,
}

impl Clock {
    /// Create a new clock at tick 0
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    /// Current tick number
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Advance to the next tick
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.tick)
    }
}
