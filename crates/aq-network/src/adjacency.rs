//! Compressed Sparse Row adjacency over one edge snapshot.
//!
//! Given a `NodeId n`, its outgoing arcs occupy the slice
//!
//! ```text
//! arcs[ out_start[n] .. out_start[n+1] ]
//! ```
//!
//! Arcs are grouped by source node and keep input order within a group, so
//! the search visits neighbours in a deterministic order.  Each arc owns a
//! copy of its edge's attributes: a route reconstructed from the adjacency
//! reports exactly the values the search used, even if a newer snapshot has
//! been published since.

use aq_core::{ArcId, EdgeId, NodeId};

use crate::model::{Edge, EdgeAttrs};

/// One outgoing arc in the CSR arrays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutArc {
    pub from:  NodeId,
    pub to:    NodeId,
    /// Position of the source edge in the snapshot it was built from.
    pub edge:  EdgeId,
    pub attrs: EdgeAttrs,
}

/// Outgoing-arc lists for every node of a network, built from one snapshot.
///
/// Every node in `0..node_count` has an entry, possibly empty, so the
/// search never meets a missing key.
#[derive(Clone, Debug)]
pub struct Adjacency {
    /// CSR row pointer.  Length = `node_count + 1`.
    out_start: Vec<u32>,
    arcs:      Vec<OutArc>,
}

/// Build the adjacency for `node_count` nodes from `edges`.
///
/// Pure function of its inputs.  Edges must reference nodes below
/// `node_count`; [`EdgeSet`](crate::EdgeSet) guarantees this.
///
/// Time complexity: O(V + E) (counting sort by source node).
pub fn build_adjacency(node_count: usize, edges: &[Edge]) -> Adjacency {
    let mut out_start = vec![0u32; node_count + 1];
    for e in edges {
        out_start[e.from.index() + 1] += 1;
    }
    for i in 1..=node_count {
        out_start[i] += out_start[i - 1];
    }
    debug_assert_eq!(out_start[node_count] as usize, edges.len());

    // Scatter into slots; `cursor` tracks the next free slot per node.
    let mut cursor: Vec<u32> = out_start[..node_count].to_vec();
    let mut slots: Vec<Option<OutArc>> = vec![None; edges.len()];
    for (i, e) in edges.iter().enumerate() {
        let slot = &mut cursor[e.from.index()];
        slots[*slot as usize] = Some(OutArc {
            from:  e.from,
            to:    e.to,
            edge:  EdgeId(i as u32),
            attrs: e.attrs.clone(),
        });
        *slot += 1;
    }
    let arcs = slots.into_iter().flatten().collect();

    Adjacency { out_start, arcs }
}

impl Adjacency {
    pub fn node_count(&self) -> usize {
        self.out_start.len() - 1
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// The outgoing arcs of `node`, in snapshot order.
    #[inline]
    pub fn out_arcs(&self, node: NodeId) -> &[OutArc] {
        &self.arcs[self.range(node)]
    }

    /// `ArcId`s of the outgoing arcs of `node`.
    ///
    /// This is a contiguous index range, no heap allocation.
    #[inline]
    pub fn out_arc_ids(&self, node: NodeId) -> impl Iterator<Item = ArcId> + use<> {
        self.range(node).map(|i| ArcId(i as u32))
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> &OutArc {
        &self.arcs[id.index()]
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.range(node).len()
    }

    #[inline]
    fn range(&self, node: NodeId) -> std::ops::Range<usize> {
        let start = self.out_start[node.index()] as usize;
        let end   = self.out_start[node.index() + 1] as usize;
        start..end
    }
}
