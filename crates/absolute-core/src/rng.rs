//! Deterministic random number generator
//!
//! A 32-bit additive/multiplicative mixer (the "mulberry32" construction).
//! The bit-level steps are fixed so that a seed produces the same sequence
//! in every implementation of the kernel, not only within this crate:
//!
//! ```text
//! s  = s + 0x6D2B79F5
//! t  = (s ^ (s >> 15)) * (1 | s)
//! t ^= t + (t ^ (t >> 7)) * (61 | t)
//! out = (t ^ (t >> 14)) / 2^32
//! ```
//!
//! All arithmetic wraps modulo 2^32.

const SEED_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A deterministic random number generator
///
/// Never use an ambient entropy source inside transition functions; draw
/// from the generator passed to them instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRng {
    state: u32,
}

impl KernelRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create an RNG from a saved state
    ///
    /// The seed is the initial state, so this is the same as `new`; it
    /// exists to make resuming from `state()` read clearly.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Get the current state (useful for auditing a run)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate the next raw u32 value
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(SEED_INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t));
        t ^ (t >> 14)
    }

    /// Generate a random f64 in range [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Generate a random bool with given probability of true
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

impl Default for KernelRng {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = KernelRng::new(42);
        let mut rng2 = KernelRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_reference_sequence_seed_42() {
        let mut rng = KernelRng::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);
        assert_eq!(rng.next_u32(), 2_876_485_805);
        assert_eq!(rng.next_u32(), 750_819_978);
    }

    #[test]
    fn test_reference_sequence_seed_0() {
        let mut rng = KernelRng::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
        assert_eq!(rng.next_u32(), 958_946_056);
    }

    #[test]
    fn test_float_matches_raw_draw() {
        let mut rng = KernelRng::new(42);
        assert_eq!(rng.next_f64(), 2_581_720_956.0 / 4_294_967_296.0);
        assert_eq!(rng.next_f64(), 1_925_393_290.0 / 4_294_967_296.0);
    }

    #[test]
    fn test_range() {
        let mut rng = KernelRng::new(7);

        for _ in 0..1000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = KernelRng::new(1);
        rng.next_u32();
        rng.next_u32();

        let mut resumed = KernelRng::from_state(rng.state());
        for _ in 0..10 {
            assert_eq!(rng.next_u32(), resumed.next_u32());
        }
    }
}
