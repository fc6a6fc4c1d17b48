//! # Random Sources
//!
//! Reward resolution never reaches for a global generator. Every draw pulls
//! from a caller-supplied [`RandomSource`], so one generator per thread is the
//! expected production setup and tests can pin exact outcomes.
//!
//! Any `rand` generator is a `RandomSource`. [`RewardRng`] is the seedable
//! generator used throughout the crate.

use rand::{Rng, RngCore, SeedableRng};

/// The generator used for reward draws: ChaCha with 8 rounds.
pub type RewardRng = rand_chacha::ChaCha8Rng;

/// Uniform integer source consumed by the resolver.
pub trait RandomSource {
    /// Uniform integer in `[low, high]`. Callers guarantee `low <= high`.
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Uniform integer in `[0, bound)`. Callers guarantee `bound > 0`.
    fn below(&mut self, bound: u64) -> u64;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..=high)
    }

    #[inline]
    fn below(&mut self, bound: u64) -> u64 {
        self.gen_range(0..bound)
    }
}

/// Creates a generator with a fixed seed (reproducible draws).
#[must_use]
pub fn seeded_rng(seed: u64) -> RewardRng {
    RewardRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the operating system.
#[must_use]
pub fn entropy_rng() -> RewardRng {
    RewardRng::from_entropy()
}
