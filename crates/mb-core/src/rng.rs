//! Deterministic RNG wrapper.
//!
//! The robots and the allocator are fully deterministic; randomness enters
//! the system only through mail generation.  `SimRng` wraps a seeded
//! `SmallRng` so the same seed always yields the same item sequence, which
//! keeps whole runs byte-for-byte reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.  Single logical thread of control — never shared.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
