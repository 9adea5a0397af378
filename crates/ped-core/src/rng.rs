//! Seeded simulation RNG.
//!
//! None of the randomised behaviours here (agent type draw, trip sampling)
//! have any security relevance, so a small fast PRNG with an explicit seed
//! is used throughout: the same seed always produces the same agent
//! population and the same sampled trips, which is what the tests rely on.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic uniform random source for agent generation and trip
/// sampling.
///
/// One `SimRng` per owner (the agent factory holds one); never shared
/// across threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
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
