//! Node and edge records.

use std::sync::Arc;

use aq_core::{GeoPoint, NodeId};

/// A named location in the road network.  Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// External identifier, unique within the network (e.g. `"A"`).
    pub key:     String,
    /// Display name (e.g. `"City Center"`).
    pub name:    String,
    /// Street or postal address shown next to start/end instructions.
    pub address: String,
    pub pos:     GeoPoint,
}

/// Per-edge attributes that the cost function and the direction
/// synthesizer read.
///
/// Cloning is cheap: the street name is shared.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Length in kilometres.
    pub distance_km:     f64,
    /// Travel time in minutes.
    pub travel_time_min: f64,
    /// Average air-quality index along the edge, 0–500.
    pub aqi:             f64,
    pub street_name:     Arc<str>,
}

impl EdgeAttrs {
    pub fn new(distance_km: f64, travel_time_min: f64, aqi: f64, street_name: &str) -> Self {
        Self {
            distance_km,
            travel_time_min,
            aqi,
            street_name: Arc::from(street_name),
        }
    }

    /// Why these attributes cannot be routed over, or `None` if they can.
    pub(crate) fn defect(&self) -> Option<String> {
        let fields = [
            ("distance_km", self.distance_km),
            ("travel_time_min", self.travel_time_min),
            ("aqi", self.aqi),
        ];
        fields.into_iter().find_map(|(name, v)| {
            if v.is_nan() {
                Some(format!("{name} is NaN"))
            } else if v.is_infinite() {
                Some(format!("{name} is infinite"))
            } else if v < 0.0 {
                Some(format!("{name} is negative ({v})"))
            } else {
                None
            }
        })
    }
}

/// A directed road segment.  Bidirectional streets are two edges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:  NodeId,
    pub to:    NodeId,
    pub attrs: EdgeAttrs,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, attrs: EdgeAttrs) -> Self {
        Self { from, to, attrs }
    }

    /// Copy of this edge with its AQI replaced.
    pub fn with_aqi(&self, aqi: f64) -> Self {
        Self {
            from:  self.from,
            to:    self.to,
            attrs: EdgeAttrs { aqi, ..self.attrs.clone() },
        }
    }
}
