//! `aq-network`: road network, edge snapshots and normalisation.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                |
//! |-------------------|---------------------------------------------------------|
//! | [`model`]         | `Node`, `Edge`, `EdgeAttrs`                             |
//! | [`network`]       | `RoadNetwork` (nodes + R-tree), `RoadNetworkBuilder`    |
//! | [`snapshot`]      | `EdgeSet`: validated, immutable, versioned edge list  |
//! | [`adjacency`]     | `Adjacency` (CSR over one snapshot), `build_adjacency`  |
//! | [`normalization`] | `Normalization`, `compute_normalization`                |
//! | [`loader`]        | CSV loaders for node and edge tables                    |
//! | [`error`]         | `NetworkError`, `NetworkResult<T>`                      |
//!
//! # Static vs. live data
//!
//! Node positions and topology are fixed once a [`RoadNetwork`] is built.
//! Edge attributes (AQI in particular) change over time, so they live in a
//! separate [`EdgeSet`] that is replaced wholesale, never patched in place.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod adjacency;
pub mod error;
pub mod loader;
pub mod model;
pub mod network;
pub mod normalization;
pub mod snapshot;


pub use adjacency::{Adjacency, OutArc, build_adjacency};
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_reader};
pub use model::{Edge, EdgeAttrs, Node};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use normalization::{Normalization, compute_normalization};
pub use snapshot::EdgeSet;
