//! CSV network loader.
//!
//! # CSV format
//!
//! Two tables.  Nodes, one row per location:
//!
//! ```csv
//! id,name,address,lat,lng
//! A,City Center,1 City Square,51.5074,-0.1278
//! B,Train Station,Liverpool Street,51.5152,-0.0889
//! ```
//!
//! Directed edges, one row per direction:
//!
//! ```csv
//! from,to,distance_km,time_min,aqi,street_name
//! A,B,2.8,12,95,Cheapside
//! B,A,2.8,12,95,Cheapside
//! ```
//!
//! `from`/`to` refer to node `id`s.  Every edge row is validated like any
//! other snapshot: negative or NaN attributes abort the load.

use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use aq_core::GeoPoint;

use crate::model::EdgeAttrs;
use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::snapshot::EdgeSet;
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:      String,
    name:    String,
    address: String,
    lat:     f64,
    lng:     f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:        String,
    to:          String,
    distance_km: f64,
    time_min:    f64,
    aqi:         f64,
    street_name: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from a nodes CSV and an edges CSV on disk.
pub fn load_network_csv(
    nodes_path: &Path,
    edges_path: &Path,
) -> NetworkResult<(RoadNetwork, EdgeSet)> {
    let nodes = std::fs::File::open(nodes_path)?;
    let edges = std::fs::File::open(edges_path)?;
    let loaded = load_network_reader(nodes, edges)?;
    info!(
        "loaded {} nodes and {} edges from {} / {}",
        loaded.0.node_count(),
        loaded.1.len(),
        nodes_path.display(),
        edges_path.display(),
    );
    Ok(loaded)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or for tables embedded
/// with `include_str!`.
pub fn load_network_reader<N: Read, E: Read>(
    nodes: N,
    edges: E,
) -> NetworkResult<(RoadNetwork, EdgeSet)> {
    let mut builder = RoadNetworkBuilder::new();

    let mut node_reader = csv::Reader::from_reader(nodes);
    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        builder.add_node(
            row.id.trim(),
            row.name.trim(),
            row.address.trim(),
            GeoPoint::new(row.lat, row.lng),
        )?;
    }

    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let from = builder.node_id(row.from.trim())?;
        let to = builder.node_id(row.to.trim())?;
        builder.add_directed_edge(
            from,
            to,
            EdgeAttrs::new(row.distance_km, row.time_min, row.aqi, row.street_name.trim()),
        );
    }

    builder.build()
}
