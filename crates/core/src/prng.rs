//! Deterministic PRNG based on splitmix64.
//!
//! A fast, seedable sequential generator for reproducible landscapes and
//! per-tick noise. Same seed always produces the same sequence on every
//! platform (pure integer arithmetic in the core mix). Unlike xorshift
//! generators there is no all-zeros fixed point, so any seed — including
//! 0 — is usable as-is.

use serde::{Deserialize, Serialize};

/// Mixes a 64-bit state into the next output word.
#[inline]
fn mix64(x: u64) -> u64 {
    let x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sequential splitmix64 PRNG. Same seed always produces the same sequence.
///
/// Each output word becomes the next state, so the generator is a single
/// `u64` that can be serialized mid-run and resumed exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Splitmix64 {
    state: u64,
}

impl Splitmix64 {
    /// Creates a new PRNG with the given seed. Any seed is valid.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = mix64(self.state);
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed f64 in (-scale, scale).
    ///
    /// The `(u - 0.5) * 2 * scale` form used for basin placement, start
    /// positions, and noise perturbations.
    pub fn next_bilateral(&mut self, scale: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * scale
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// Uses simple modulo reduction; bias is negligible at 64-bit width.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }
}
