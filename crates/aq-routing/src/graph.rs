//! One edge snapshot prepared for search.

use aq_network::{Adjacency, EdgeSet, Normalization, RoadNetwork, compute_normalization};

/// A road network paired with the adjacency and normalisation factors of
/// one [`EdgeSet`].
///
/// Building this is the only O(E) step per snapshot; every solve against
/// the same snapshot (e.g. the four route alternatives) shares it.  Because
/// the adjacency owns copies of the edge attributes, later snapshots never
/// affect a `RoutingGraph` already built.
pub struct RoutingGraph<'n> {
    pub network:   &'n RoadNetwork,
    pub adjacency: Adjacency,
    pub norm:      Normalization,
    /// Version of the snapshot this graph was built from.
    pub version:   u64,
}

impl<'n> RoutingGraph<'n> {
    pub fn new(network: &'n RoadNetwork, edges: &EdgeSet) -> Self {
        Self {
            network,
            adjacency: network.adjacency(edges),
            norm:      compute_normalization(edges),
            version:   edges.version(),
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }
}
