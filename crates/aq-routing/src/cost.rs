//! Scalar traversal cost of one edge under a weight vector.

use aq_core::Weights;
use aq_network::{EdgeAttrs, Normalization};

/// `w_d · d/maxD + w_t · t/maxT + w_a · aqi/maxAQI`.
///
/// Each normalised term lies in `[0, 1]` when the attributes come from the
/// snapshot `norm` was computed over, so the result is bounded by
/// `weights.total()`.
#[inline]
pub fn edge_cost(attrs: &EdgeAttrs, weights: &Weights, norm: &Normalization) -> f64 {
    let cost = weights.distance() * (attrs.distance_km / norm.max_distance_km)
        + weights.time() * (attrs.travel_time_min / norm.max_travel_time_min)
        + weights.aqi() * (attrs.aqi / norm.max_aqi);

    // Snapshots and weight vectors are validated at construction; a negative
    // or NaN cost here means that validation was bypassed.
    debug_assert!(cost >= 0.0, "edge cost must be non-negative, got {cost} for {attrs:?}");
    cost
}
