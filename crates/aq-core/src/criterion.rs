//! Routing criteria and the weight vector that blends them.
//!
//! A [`Weights`] value holds one non-negative factor per [`Criterion`].  The
//! components need not sum to 1; the cost function normalises each
//! criterion by its observed maximum before weighting, so only the ratios
//! between components matter.

use crate::{CoreError, CoreResult};

/// One of the three quantities a route can be optimised for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Physical length, kilometres.
    Distance,
    /// Travel time, minutes.
    Time,
    /// Average air-quality index along the edge (0–500, lower is cleaner).
    Aqi,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [Criterion::Distance, Criterion::Time, Criterion::Aqi];

    /// Human-readable label, useful for log lines and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Distance => "distance",
            Criterion::Time     => "time",
            Criterion::Aqi      => "aqi",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Weights ───────────────────────────────────────────────────────────────────

/// Per-criterion weights `(w_distance, w_time, w_aqi)`.
///
/// Every component is finite and `>= 0`.  Fields are private so that the
/// only ways in are [`Weights::new`], [`Weights::fixed`] and the
/// pure-criterion constants.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWeights"))]
pub struct Weights {
    distance: f64,
    time:     f64,
    aqi:      f64,
}

impl Weights {
    /// Pure distance: `(1, 0, 0)`.
    pub const SHORTEST: Weights = Weights::fixed(1.0, 0.0, 0.0);
    /// Pure travel time: `(0, 1, 0)`.
    pub const FASTEST:  Weights = Weights::fixed(0.0, 1.0, 0.0);
    /// Pure air quality: `(0, 0, 1)`.
    pub const CLEANEST: Weights = Weights::fixed(0.0, 0.0, 1.0);

    /// Validate and build a weight vector.
    ///
    /// Negative or non-finite components are rejected: a negative weight
    /// would make some edge costs negative, which Dijkstra cannot handle.
    pub fn new(distance: f64, time: f64, aqi: f64) -> CoreResult<Self> {
        for (c, w) in Criterion::ALL.into_iter().zip([distance, time, aqi]) {
            if !valid_component(w) {
                return Err(CoreError::InvalidWeights(format!(
                    "{c} weight must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(Self { distance, time, aqi })
    }

    /// Build a weight vector in a `const` context.
    ///
    /// Panics on a negative or non-finite component; inside a `const` item
    /// that panic is a compile error.
    pub const fn fixed(distance: f64, time: f64, aqi: f64) -> Self {
        assert!(
            valid_component(distance) && valid_component(time) && valid_component(aqi),
            "weights must be finite and non-negative"
        );
        Self { distance, time, aqi }
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn aqi(&self) -> f64 {
        self.aqi
    }

    /// Sum of all components; an upper bound on any single edge cost.
    #[inline]
    pub fn total(&self) -> f64 {
        self.distance + self.time + self.aqi
    }

    /// Components rescaled to sum to 1, in `[distance, time, aqi]` order.
    ///
    /// Returns `None` for the all-zero vector.
    pub fn shares(&self) -> Option<[f64; 3]> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        Some([self.distance / total, self.time / total, self.aqi / total])
    }
}

impl Default for Weights {
    /// Equal preference for all three criteria.
    fn default() -> Self {
        Weights::fixed(1.0, 1.0, 1.0)
    }
}

const fn valid_component(w: f64) -> bool {
    w.is_finite() && w >= 0.0
}

/// Wire shape of [`Weights`]; deserialisation goes through [`Weights::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWeights {
    distance: f64,
    time:     f64,
    aqi:      f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWeights> for Weights {
    type Error = CoreError;

    fn try_from(raw: RawWeights) -> CoreResult<Self> {
        Weights::new(raw.distance, raw.time, raw.aqi)
    }
}

impl std::fmt::Display for Weights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(d={:.2}, t={:.2}, aqi={:.2})", self.distance, self.time, self.aqi)
    }
}
