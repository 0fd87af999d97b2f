//! `aq-feed`: the live AQI boundary of the aq route engine.
//!
//! # Data flow
//!
//! ```text
//! AqiSimulator ──step──► EdgeFeed::publish ──► FeedSubscriber callbacks
//!   (drift + clamp)       (atomic Arc swap)          │
//!                                                    ▼
//!                                   LiveAlternatives::trigger (latest wins)
//!                                                    │
//!                                                    ▼
//!                          recompute worker ──► Arc<Alternatives> + observers
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`feed`]      | `EdgeFeed`, `FeedSubscriber`, `SubscriptionId`        |
//! | [`simulator`] | `AqiSimulator`, `SimulatorHandle`                     |
//! | [`coalesce`]  | `LatestSlot`, a latest-wins mailbox                  |
//! | [`live`]      | `LiveAlternatives`, `RouteRequest`, `BundleObserver`  |
//! | [`error`]     | `FeedError`, `FeedResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let (network, edges) = load_network_csv(nodes_path, edges_path)?;
//! let network = Arc::new(network);
//! let feed = Arc::new(EdgeFeed::new(network.node_count(), edges));
//!
//! let live = Arc::new(LiveAlternatives::with_dijkstra(network.clone(), request)?);
//! live.observe(|bundle: &Arc<Alternatives>| println!("v{}", bundle.snapshot_version));
//! live.attach(&feed);
//! let worker = live.spawn_worker()?;
//!
//! let sim = AqiSimulator::new(FeedConfig::default())?.spawn(feed.clone())?;
//! // ...
//! sim.stop();
//! worker.stop();
//! ```

pub mod coalesce;
pub mod error;
pub mod feed;
pub mod live;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use coalesce::LatestSlot;
pub use error::{FeedError, FeedResult};
pub use feed::{EdgeFeed, FeedSubscriber, SubscriptionId};
pub use live::{BundleObserver, LiveAlternatives, RouteRequest, WorkerHandle};
pub use simulator::{AqiSimulator, SimulatorHandle};
