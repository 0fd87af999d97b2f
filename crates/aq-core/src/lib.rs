//! `aq-core`: foundational types for the air-quality-aware route engine.
//!
//! This crate is a dependency of every other `aq-*` crate.  It has no
//! `aq-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `ArcId`                           |
//! | [`geo`]         | `GeoPoint`, haversine distance, initial bearing       |
//! | [`criterion`]   | `Criterion` enum, `Weights` vector                    |
//! | [`tick`]        | `Tick`, `FeedConfig`                                  |
//! | [`rng`]         | `FeedRng` (seeded, deterministic)                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod criterion;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod tick;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use criterion::{Criterion, Weights};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, bearing_delta};
pub use ids::{ArcId, EdgeId, NodeId};
pub use rng::FeedRng;
pub use tick::{FeedConfig, Tick};
