//! Kernel configuration and the frozen constraints derived from it
//!
//! Configuration can be built in code or loaded from RON:
//!
//! ```
//! use absolute_core::KernelConfig;
//!
//! let config = KernelConfig::from_ron("(max_units: 200, seed: 42)").unwrap();
//! assert_eq!(config.max_units, 200);
//! assert_eq!(config.pulse_size, 1);
//! ```

use crate::{Error, Result};
use serde::Deserialize;

/// Default lifetime unit budget
pub const DEFAULT_MAX_UNITS: u64 = 1_000;
/// Default excitation depth ceiling
pub const DEFAULT_MAX_DEPTH: u32 = 32;
/// Default number of pulse rounds per excitation
pub const DEFAULT_PULSE_SIZE: u32 = 1;

/// Construction-time kernel configuration
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Total lifetime operation budget
    pub max_units: u64,
    /// Ceiling for the `depth` argument of an excitation
    pub max_depth: u32,
    /// Relation-application rounds per excitation
    pub pulse_size: u32,
    /// Generator seed
    pub seed: u32,
}

impl KernelConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_units(mut self, max_units: u64) -> Self {
        self.max_units = max_units;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pulse_size(mut self, pulse_size: u32) -> Self {
        self.pulse_size = pulse_size;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Reject budgets and pulse sizes of zero
    pub fn validate(&self) -> Result<()> {
        if self.max_units == 0 {
            return Err(Error::InvalidConfig("max_units must be positive".to_string()));
        }
        if self.pulse_size == 0 {
            return Err(Error::InvalidConfig("pulse_size must be positive".to_string()));
        }
        Ok(())
    }

    /// The immutable constraints of this configuration
    pub fn constraints(&self) -> Constraints {
        Constraints {
            max_units: self.max_units,
            max_depth: self.max_depth,
            pulse_size: self.pulse_size,
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_units: DEFAULT_MAX_UNITS,
            max_depth: DEFAULT_MAX_DEPTH,
            pulse_size: DEFAULT_PULSE_SIZE,
            seed: 0,
        }
    }
}

/// Limits fixed for the lifetime of a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    max_units: u64,
    max_depth: u32,
    pulse_size: u32,
}

impl Constraints {
    pub fn max_units(&self) -> u64 {
        self.max_units
    }

    /// Reserved for recursive excitation; only the guard reads it today
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn pulse_size(&self) -> u32 {
        self.pulse_size
    }
}
