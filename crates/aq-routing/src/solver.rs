//! Label-setting shortest-path search (Dijkstra).
//!
//! # Frontier
//!
//! A binary min-heap keyed by tentative cost.  Decrease-key is simulated by
//! pushing a fresh entry; an entry whose cost no longer matches the node's
//! best known cost is stale and skipped on pop.  Ties on cost are broken by
//! the lower `NodeId`, so repeated solves settle nodes in the same order.
//!
//! # Node states
//!
//! ```text
//! unvisited (dist = +inf) ──relax──► tentative (in heap) ──pop──► settled
//! ```
//!
//! The search stops as soon as the target is settled, or when the heap is
//! exhausted (target unreachable).  It always terminates: each pop either
//! discards a stale entry or settles a node, and non-negative edge costs
//! mean a settled node is never pushed again.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use aq_core::{ArcId, NodeId, Weights};

use crate::cost::edge_cost;
use crate::graph::RoutingGraph;

/// Heap key: an `f64` cost with a total order.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The labels left behind by one search.
#[derive(Clone, Debug)]
pub struct SearchTree {
    pub source:   NodeId,
    pub target:   NodeId,
    /// `dist[v]` = best known cost to reach `v`; `+inf` if never reached.
    pub dist:     Vec<f64>,
    /// `prev_arc[v]` = adjacency arc that last improved `v`;
    /// `ArcId::INVALID` for the source and for unreached nodes.
    pub prev_arc: Vec<ArcId>,
    /// Number of nodes settled before the search stopped.
    pub settled:  usize,
}

impl SearchTree {
    /// `true` if the target has a finite label, i.e. some path reaches it.
    ///
    /// The search stops when the target is popped or the heap runs dry, so
    /// a finite label here is also the optimal one.
    #[inline]
    pub fn reached(&self) -> bool {
        self.dist[self.target.index()].is_finite()
    }

    /// Final cost of the target; `+inf` if unreachable.
    #[inline]
    pub fn target_cost(&self) -> f64 {
        self.dist[self.target.index()]
    }
}

/// Run Dijkstra from `source` towards `target` over `graph` under `weights`.
///
/// Both ids must be in range for `graph`; the [`Router`](crate::Router)
/// checks this before calling.
///
/// Complexity: O((V + E) log V).
pub fn dijkstra(
    graph:   &RoutingGraph<'_>,
    source:  NodeId,
    target:  NodeId,
    weights: &Weights,
) -> SearchTree {
    let n = graph.node_count();
    let adj = &graph.adjacency;

    let mut dist     = vec![f64::INFINITY; n];
    let mut prev_arc = vec![ArcId::INVALID; n];
    let mut settled  = 0usize;

    dist[source.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap on (cost, node).
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), source)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        settled += 1;

        if node == target {
            break;
        }

        for id in adj.out_arc_ids(node) {
            let arc = adj.arc(id);
            let new_cost = cost + edge_cost(&arc.attrs, weights, &graph.norm);

            if new_cost < dist[arc.to.index()] {
                dist[arc.to.index()] = new_cost;
                prev_arc[arc.to.index()] = id;
                heap.push(Reverse((Cost(new_cost), arc.to)));
            }
        }
    }

    SearchTree { source, target, dist, prev_arc, settled }
}
