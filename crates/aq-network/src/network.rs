//! Road network nodes, key lookup and spatial snapping.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used
//! to snap arbitrary coordinates (map clicks, geocoder hits) onto the graph.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use aq_core::{GeoPoint, NodeId};

use crate::adjacency::{Adjacency, build_adjacency};
use crate::model::{Edge, EdgeAttrs, Node};
use crate::snapshot::EdgeSet;
use crate::{NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to rank
    /// candidates within one city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// The fixed node table of a road network plus its lookup indexes.
///
/// Edges are not stored here: they arrive as [`EdgeSet`] snapshots that can
/// be replaced independently.  Use [`RoadNetworkBuilder`] to construct.
pub struct RoadNetwork {
    nodes:       Vec<Node>,
    key_index:   FxHashMap<String, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct a network with no nodes.
    pub fn empty() -> Self {
        Self {
            nodes:       Vec::new(),
            key_index:   FxHashMap::default(),
            spatial_idx: RTree::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// The node record for `id`, or `None` if it is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by its external key.
    pub fn node_id(&self, key: &str) -> NetworkResult<NodeId> {
        self.key_index
            .get(key)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(key.to_string()))
    }

    /// The external key of `id`, or `"?"` for an out-of-range id.
    pub fn key(&self, id: NodeId) -> &str {
        self.node(id).map_or("?", |n| n.key.as_str())
    }

    // ── Edge snapshots ────────────────────────────────────────────────────

    /// Validate `edges` against this network's node table.
    pub fn edge_set(&self, edges: Vec<Edge>) -> NetworkResult<EdgeSet> {
        EdgeSet::new(self.node_count(), edges)
    }

    /// Adjacency lists for every node of this network over `edges`.
    pub fn adjacency(&self, edges: &EdgeSet) -> Adjacency {
        build_adjacency(self.node_count(), edges)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] and its initial [`EdgeSet`] incrementally,
/// then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use aq_core::GeoPoint;
/// use aq_network::{EdgeAttrs, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node("A", "City Center", "1 City Square", GeoPoint::new(51.5074, -0.1278)).unwrap();
/// let c = b.add_node("C", "Shopping District", "Oxford Circus", GeoPoint::new(51.5135, -0.1375)).unwrap();
/// b.add_road(a, c, EdgeAttrs::new(1.5, 8.0, 110.0, "Regent Street"));
/// let (net, edges) = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(edges.len(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<Node>,
    key_index: FxHashMap<String, NodeId>,
    edges:     Vec<Edge>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            key_index: FxHashMap::default(),
            edges:     Vec::new(),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(
        &mut self,
        key:     &str,
        name:    &str,
        address: &str,
        pos:     GeoPoint,
    ) -> NetworkResult<NodeId> {
        if self.key_index.contains_key(key) {
            return Err(NetworkError::DuplicateNode(key.to_string()));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.key_index.insert(key.to_string(), id);
        self.nodes.push(Node {
            key:     key.to_string(),
            name:    name.to_string(),
            address: address.to_string(),
            pos,
        });
        Ok(id)
    }

    /// Look up a node added earlier by key.
    pub fn node_id(&self, key: &str) -> NetworkResult<NodeId> {
        self.key_index
            .get(key)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(key.to_string()))
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, attrs: EdgeAttrs) {
        self.edges.push(Edge::new(from, to, attrs));
    }

    /// Convenience: add edges in **both directions** with identical attributes.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, attrs: EdgeAttrs) {
        self.add_directed_edge(a, b, attrs.clone());
        self.add_directed_edge(b, a, attrs);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce the network plus its initial,
    /// validated edge set (version 0).
    pub fn build(self) -> NetworkResult<(RoadNetwork, EdgeSet)> {
        let edges = EdgeSet::new(self.nodes.len(), self.edges)?;

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| NodeEntry {
                point: [n.pos.lat, n.pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let network = RoadNetwork {
            nodes: self.nodes,
            key_index: self.key_index,
            spatial_idx,
        };
        Ok((network, edges))
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
