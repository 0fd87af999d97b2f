//! Deterministic RNG wrapper for the simulated AQI feed.
//!
//! The feed is single-threaded: one `FeedRng` drives every tick, so a given
//! seed always reproduces the same sequence of snapshots.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for feed-level randomness (AQI drift).
pub struct FeedRng(SmallRng);

impl FeedRng {
    pub fn new(seed: u64) -> Self {
        FeedRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[-0.5, 0.5)`.
    #[inline]
    pub fn centered(&mut self) -> f64 {
        self.0.r#gen::<f64>() - 0.5
    }
}
