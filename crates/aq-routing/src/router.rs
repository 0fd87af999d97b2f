//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The alternatives orchestrator and the live recomputer call routing via
//! the [`Router`] trait, so an A* or bidirectional search can be swapped in
//! without touching them.  The default [`DijkstraRouter`] runs the full
//! solve → reconstruct → synthesize pipeline.

use log::debug;

use aq_core::{NodeId, Weights};

use crate::directions::synthesize;
use crate::graph::RoutingGraph;
use crate::route::{RouteResult, reconstruct};
use crate::solver::dijkstra;
use crate::{RoutingError, RoutingResult};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the four alternatives can be
/// solved on Rayon worker threads.
pub trait Router: Send + Sync {
    /// Compute the cheapest route from `from` to `to` under `weights`.
    ///
    /// Returns `Err(InvalidNode)` for ids outside the graph.  A missing path
    /// is `Ok` with `found == false`.
    fn route(
        &self,
        graph: &RoutingGraph<'_>,
        from: NodeId,
        to: NodeId,
        weights: &Weights,
    ) -> RoutingResult<RouteResult>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Weighted Dijkstra over the CSR adjacency, with turn-by-turn directions.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &RoutingGraph<'_>,
        from: NodeId,
        to: NodeId,
        weights: &Weights,
    ) -> RoutingResult<RouteResult> {
        for node in [from, to] {
            if node.index() >= graph.node_count() {
                return Err(RoutingError::InvalidNode(node));
            }
        }

        if from == to {
            return Ok(RouteResult::trivial(from, graph.version));
        }

        let tree = dijkstra(graph, from, to, weights);
        let mut route = reconstruct(graph, &tree);
        debug!(
            "route {} -> {} {weights}: found={} settled={} cost={:.4}",
            graph.network.key(from),
            graph.network.key(to),
            route.found,
            tree.settled,
            route.total_cost,
        );

        if route.found {
            route.directions = synthesize(graph.network, &route.path, &route.path_edges);
        }
        Ok(route)
    }
}
