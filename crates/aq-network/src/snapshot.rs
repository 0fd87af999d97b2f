//! Immutable, versioned edge lists.
//!
//! An [`EdgeSet`] is the unit of publication for live edge data.  Readers
//! hold an `Arc<EdgeSet>` for the duration of a computation; a producer that
//! wants to change AQI values builds a complete new `EdgeSet` and swaps the
//! reference.  There is no API for mutating an edge in place.

use std::ops::Deref;

use aq_core::EdgeId;

use crate::model::Edge;
use crate::{NetworkError, NetworkResult};

/// A validated edge list plus the version number it was published under.
///
/// Every edge in the set references a node below `node_count` and carries
/// finite, non-negative distance, time and AQI values.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSet {
    edges:   Vec<Edge>,
    version: u64,
}

impl EdgeSet {
    /// Validate `edges` against a network with `node_count` nodes.
    ///
    /// Fails on the first edge with an out-of-range endpoint or a negative,
    /// NaN or infinite attribute.  Such an edge would silently corrupt the
    /// shortest-path search, so it is rejected at ingestion.
    pub fn new(node_count: usize, edges: Vec<Edge>) -> NetworkResult<Self> {
        for (index, e) in edges.iter().enumerate() {
            for node in [e.from, e.to] {
                if node.index() >= node_count {
                    return Err(NetworkError::NodeOutOfRange { index, node, node_count });
                }
            }
            if let Some(reason) = e.attrs.defect() {
                return Err(NetworkError::MalformedEdge { index, reason });
            }
        }
        Ok(Self { edges, version: 0 })
    }

    /// The empty edge set (every pair of distinct nodes is unreachable).
    pub fn empty() -> Self {
        Self { edges: Vec::new(), version: 0 }
    }

    /// Re-tag this set with a publication version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Build the successor set by transforming every edge's AQI.
    ///
    /// `f` receives the edge index and the edge; its result becomes the new
    /// AQI.  Topology, distance and time are carried over unchanged.  The
    /// result is validated like any other ingestion.
    pub fn map_aqi<F>(&self, node_count: usize, mut f: F) -> NetworkResult<EdgeSet>
    where
        F: FnMut(EdgeId, &Edge) -> f64,
    {
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| e.with_aqi(f(EdgeId(i as u32), e)))
            .collect();
        EdgeSet::new(node_count, edges).map(|s| s.with_version(self.version + 1))
    }
}

impl Deref for EdgeSet {
    type Target = [Edge];

    fn deref(&self) -> &[Edge] {
        &self.edges
    }
}

impl Default for EdgeSet {
    fn default() -> Self {
        Self::empty()
    }
}
