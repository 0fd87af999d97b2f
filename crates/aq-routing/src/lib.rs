//! `aq-routing`: the multi-criteria route engine.
//!
//! # Pipeline
//!
//! ```text
//! EdgeSet ──► RoutingGraph (adjacency + normalisation)
//!                 │
//!                 ▼
//!   edge_cost ─► dijkstra ─► reconstruct ─► synthesize ─► RouteResult
//!                 ▲
//!   Weights ──────┘          compute_alternatives runs this four times
//! ```
//!
//! # Crate layout
//!
//! | Module             | Contents                                              |
//! |--------------------|-------------------------------------------------------|
//! | [`graph`]          | `RoutingGraph`, one snapshot prepared for search    |
//! | [`cost`]           | `edge_cost`                                           |
//! | [`solver`]         | `dijkstra`, `SearchTree`                              |
//! | [`route`]          | `RouteResult`, `reconstruct`                          |
//! | [`directions`]     | `DirectionStep`, `TurnKind`, `synthesize`             |
//! | [`router`]         | `Router` trait, `DijkstraRouter`                      |
//! | [`alternatives`]   | `RouteKind`, `Alternatives`, `compute_alternatives`   |
//! | [`palette`]        | Route colours and preference labels                   |
//! | [`format`]         | Time/distance/AQI display helpers, AQI categories     |
//! | [`error`]          | `RoutingError`, `RoutingResult<T>`                    |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Solves the four alternatives on Rayon's thread pool.   |
//! | `serde`    | Derives `Serialize` on result types.                   |

pub mod alternatives;
pub mod cost;
pub mod directions;
pub mod error;
pub mod format;
pub mod graph;
pub mod palette;
pub mod route;
pub mod router;
pub mod solver;


pub use alternatives::{Alternatives, LabeledRoute, RouteKind, compute_alternatives, compute_alternatives_with};
pub use cost::edge_cost;
pub use directions::{DirectionStep, StepKind, TurnKind, classify_turn, synthesize};
pub use error::{RoutingError, RoutingResult};
pub use format::{AqiCategory, format_aqi, format_distance, format_time};
pub use graph::RoutingGraph;
pub use palette::{RouteColor, preference_label, route_color};
pub use route::{RouteResult, reconstruct};
pub use router::{DijkstraRouter, Router};
pub use solver::{SearchTree, dijkstra};
