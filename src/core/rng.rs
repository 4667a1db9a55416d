//! Deterministic random number generation.
//!
//! Same seed, same sequence: board permutations are reproducible for tests
//! and for replaying a session from its initial seed. Restarts and layout
//! changes draw their fresh board seed from the session's `EngineRng` via
//! `next_seed`, so an entire run of games stays a pure function of one seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used for board shuffling and seed derivation.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct EngineRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl EngineRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a uniform index in `[0, upper)`.
    ///
    /// `upper` must be non-zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    /// Derive a seed for a new board.
    ///
    /// Each call advances the stream, so consecutive boards within one
    /// session get distinct but reproducible seeds.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }
}
