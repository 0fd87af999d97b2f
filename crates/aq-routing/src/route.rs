//! Route results and path reconstruction.

use aq_core::NodeId;
use aq_network::OutArc;

use crate::directions::DirectionStep;
use crate::graph::RoutingGraph;
use crate::solver::SearchTree;

/// The outcome of one solve.
///
/// Built fresh per request and never patched: a new snapshot produces a new
/// `RouteResult`.  `found == false` is the normal "no route" answer, not an
/// error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteResult {
    pub found: bool,
    /// Node sequence from source to target.  One element when source and
    /// target coincide, empty when unreachable.
    pub path: Vec<NodeId>,
    /// Arcs traversed, with the attribute values the search used.
    pub path_edges: Vec<OutArc>,
    /// Sum of edge distances, km (unrounded).
    pub total_distance_km: f64,
    /// Sum of edge travel times, minutes (unrounded).
    pub total_time_min: f64,
    /// The solver's scalar cost; `+inf` when unreachable.
    pub total_cost: f64,
    /// Arithmetic mean of the traversed edges' AQI; 0 with no edges.
    pub average_aqi: f64,
    pub directions: Vec<DirectionStep>,
    /// Version of the edge snapshot this result was computed against.
    pub snapshot_version: u64,
}

impl RouteResult {
    /// "No route found".
    pub fn unreachable(snapshot_version: u64) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            path_edges: Vec::new(),
            total_distance_km: 0.0,
            total_time_min: 0.0,
            total_cost: f64::INFINITY,
            average_aqi: 0.0,
            directions: Vec::new(),
            snapshot_version,
        }
    }

    /// Source equals target: a one-node, zero-cost route.
    pub fn trivial(node: NodeId, snapshot_version: u64) -> Self {
        Self {
            found: true,
            path: vec![node],
            total_cost: 0.0,
            ..Self::unreachable(snapshot_version)
        }
    }
}

/// Walk `tree`'s predecessor links back from the target and aggregate
/// totals.
///
/// The returned route has no directions yet; see
/// [`synthesize`](crate::synthesize).
pub fn reconstruct(graph: &RoutingGraph<'_>, tree: &SearchTree) -> RouteResult {
    if !tree.reached() {
        return RouteResult::unreachable(graph.version);
    }

    let mut path = vec![tree.target];
    let mut path_edges = Vec::new();
    let mut cur = tree.target;
    loop {
        let id = tree.prev_arc[cur.index()];
        if !id.is_valid() {
            break;
        }
        let arc = graph.adjacency.arc(id);
        path_edges.push(arc.clone());
        cur = arc.from;
        path.push(cur);
    }
    path.reverse();
    path_edges.reverse();
    debug_assert_eq!(path.first(), Some(&tree.source));

    let total_distance_km: f64 = path_edges.iter().map(|a| a.attrs.distance_km).sum();
    let total_time_min: f64 = path_edges.iter().map(|a| a.attrs.travel_time_min).sum();
    let average_aqi = if path_edges.is_empty() {
        0.0
    } else {
        path_edges.iter().map(|a| a.attrs.aqi).sum::<f64>() / path_edges.len() as f64
    };

    RouteResult {
        found: true,
        path,
        path_edges,
        total_distance_km,
        total_time_min,
        total_cost: tree.target_cost(),
        average_aqi,
        directions: Vec::new(),
        snapshot_version: graph.version,
    }
}
