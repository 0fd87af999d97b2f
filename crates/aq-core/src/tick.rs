//! Feed time model and configuration.
//!
//! The live AQI feed advances in discrete `Tick`s.  One tick is one publish
//! of a replacement edge list; the wall-clock spacing between ticks comes
//! from [`FeedConfig::interval_ms`].

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing feed tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FeedConfig ────────────────────────────────────────────────────────────────

/// Settings for the simulated live AQI feed.
///
/// Typically loaded from a JSON file by the application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedConfig {
    /// Milliseconds between two published snapshots.  Default: 5000.
    pub interval_ms: u64,

    /// Master RNG seed.  The same seed always produces the same AQI drift.
    pub seed: u64,

    /// Peak-to-peak relative AQI change per tick.  With the default `0.10`
    /// each edge moves by at most ±5 % of its current value.
    pub jitter_fraction: f64,

    /// Lower clamp applied to every simulated AQI value.
    pub aqi_floor: f64,

    /// Upper clamp applied to every simulated AQI value.
    pub aqi_ceiling: f64,
}

impl FeedConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Reject settings the simulator cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.interval_ms == 0 {
            return Err(CoreError::Config("interval_ms must be > 0".into()));
        }
        if !self.jitter_fraction.is_finite() || self.jitter_fraction < 0.0 {
            return Err(CoreError::Config(format!(
                "jitter_fraction must be finite and >= 0, got {}",
                self.jitter_fraction
            )));
        }
        if !(self.aqi_floor >= 0.0 && self.aqi_floor <= self.aqi_ceiling) {
            return Err(CoreError::Config(format!(
                "AQI clamp [{}, {}] is empty or negative",
                self.aqi_floor, self.aqi_ceiling
            )));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms:     5_000,
            seed:            42,
            jitter_fraction: 0.10,
            aqi_floor:       15.0,
            aqi_ceiling:     200.0,
        }
    }
}
