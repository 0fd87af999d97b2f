//! Per-criterion scale factors.
//!
//! Distance (km), time (min) and AQI have unrelated units.  Dividing each by
//! its maximum over the current snapshot maps every edge attribute into
//! `[0, 1]`, so a weight vector can blend them meaningfully.

use log::warn;

use aq_core::Criterion;

use crate::model::Edge;

/// Fallback factor for an empty edge set or an all-zero attribute.
pub const SENTINEL: f64 = 1.0;

/// Maximum distance, travel time and AQI over one edge snapshot.
///
/// All three factors are strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normalization {
    pub max_distance_km:     f64,
    pub max_travel_time_min: f64,
    pub max_aqi:             f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            max_distance_km:     SENTINEL,
            max_travel_time_min: SENTINEL,
            max_aqi:             SENTINEL,
        }
    }
}

/// Single linear scan for the per-criterion maxima of `edges`.
///
/// An empty slice yields [`SENTINEL`] for every factor.  A factor whose
/// maximum is zero (e.g. every edge has AQI 0) also falls back to the
/// sentinel; its criterion then contributes zero cost everywhere, which is
/// the same ranking the zero values imply.
pub fn compute_normalization(edges: &[Edge]) -> Normalization {
    if edges.is_empty() {
        warn!("normalisation over an empty edge set; using sentinel factors");
        return Normalization::default();
    }

    let (mut d, mut t, mut a) = (0.0_f64, 0.0_f64, 0.0_f64);
    for e in edges {
        if e.attrs.distance_km > d {
            d = e.attrs.distance_km;
        }
        if e.attrs.travel_time_min > t {
            t = e.attrs.travel_time_min;
        }
        if e.attrs.aqi > a {
            a = e.attrs.aqi;
        }
    }

    let positive = |v: f64, c: Criterion| {
        if v > 0.0 {
            v
        } else {
            warn!("maximum {c} over {} edges is zero; using sentinel factor", edges.len());
            SENTINEL
        }
    };

    Normalization {
        max_distance_km:     positive(d, Criterion::Distance),
        max_travel_time_min: positive(t, Criterion::Time),
        max_aqi:             positive(a, Criterion::Aqi),
    }
}
