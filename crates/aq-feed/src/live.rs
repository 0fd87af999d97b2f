//! Alternatives bundle kept fresh against the live feed.
//!
//! ```text
//! EdgeFeed::publish ──► trigger ──► LatestSlot ──► worker ──► recompute
//!                                   (latest wins)               │
//!                                                               ▼
//!                                         latest bundle + BundleObservers
//! ```
//!
//! Triggers never block on routing.  While a recomputation runs, newer
//! snapshots overwrite each other in the slot, so at most one
//! recomputation is in flight and at most one is queued.  The queued
//! snapshot is never older than one already queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use aq_core::{NodeId, Weights};
use aq_network::{EdgeSet, RoadNetwork};
use aq_routing::{Alternatives, DijkstraRouter, Router, RoutingError, RoutingGraph, compute_alternatives_with};

use crate::coalesce::LatestSlot;
use crate::feed::{EdgeFeed, SubscriptionId};
use crate::{FeedError, FeedResult};

/// Which route the live bundle tracks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub from:    NodeId,
    pub to:      NodeId,
    /// Weights of the custom alternative.
    pub weights: Weights,
}

/// Receives every bundle the recomputer publishes.
pub trait BundleObserver: Send + Sync {
    fn on_bundle(&self, bundle: &Arc<Alternatives>);
}

impl<F> BundleObserver for F
where
    F: Fn(&Arc<Alternatives>) + Send + Sync,
{
    fn on_bundle(&self, bundle: &Arc<Alternatives>) {
        self(bundle)
    }
}

pub struct LiveAlternatives<R: Router = DijkstraRouter> {
    network:       Arc<RoadNetwork>,
    router:        R,
    request:       RwLock<RouteRequest>,
    pending:       Arc<LatestSlot<Arc<EdgeSet>>>,
    last_snapshot: RwLock<Option<Arc<EdgeSet>>>,
    latest:        RwLock<Option<Arc<Alternatives>>>,
    observers:     Mutex<Vec<Arc<dyn BundleObserver>>>,
    computed:      AtomicU64,
}

impl LiveAlternatives<DijkstraRouter> {
    pub fn with_dijkstra(network: Arc<RoadNetwork>, request: RouteRequest) -> FeedResult<Self> {
        Self::new(network, DijkstraRouter, request)
    }
}

impl<R: Router + 'static> LiveAlternatives<R> {
    pub fn new(network: Arc<RoadNetwork>, router: R, request: RouteRequest) -> FeedResult<Self> {
        check_request(&network, &request)?;
        Ok(Self {
            network,
            router,
            request:       RwLock::new(request),
            pending:       Arc::new(LatestSlot::new()),
            last_snapshot: RwLock::new(None),
            latest:        RwLock::new(None),
            observers:     Mutex::new(Vec::new()),
            computed:      AtomicU64::new(0),
        })
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn request(&self) -> RouteRequest {
        *self.request.read()
    }

    /// Track a different route.  The last seen snapshot is queued again so
    /// the bundle follows without waiting for the next feed update.
    pub fn set_request(&self, request: RouteRequest) -> FeedResult<()> {
        check_request(&self.network, &request)?;
        *self.request.write() = request;
        // Held across the put so a newer trigger cannot slip in between.
        let last = self.last_snapshot.write();
        if let Some(snapshot) = last.as_ref() {
            self.pending.put(Arc::clone(snapshot));
        }
        Ok(())
    }

    pub fn observe<O: BundleObserver + 'static>(&self, observer: O) {
        self.observers.lock().push(Arc::new(observer));
    }

    /// Queue `snapshot` for recomputation, replacing any snapshot still
    /// waiting.
    ///
    /// Feed notifications can arrive out of order; a snapshot older than
    /// the newest one seen is ignored.
    pub fn trigger(&self, snapshot: Arc<EdgeSet>) {
        let mut last = self.last_snapshot.write();
        if let Some(seen) = last.as_ref() {
            if snapshot.version() < seen.version() {
                debug!("snapshot v{} older than v{}; ignored", snapshot.version(), seen.version());
                return;
            }
        }
        *last = Some(Arc::clone(&snapshot));
        if !self.pending.put(snapshot) {
            debug!("recomputer stopped; snapshot ignored");
        }
    }

    /// Subscribe to `feed` and queue its current snapshot.
    ///
    /// The subscription holds only a weak reference, so dropping the last
    /// `Arc<LiveAlternatives>` ends recomputation even if the caller never
    /// unsubscribes.
    pub fn attach(self: &Arc<Self>, feed: &EdgeFeed) -> SubscriptionId {
        let weak: Weak<Self> = Arc::downgrade(self);
        let id = feed.subscribe(move |snapshot: &Arc<EdgeSet>| {
            if let Some(live) = weak.upgrade() {
                live.trigger(Arc::clone(snapshot));
            }
        });
        self.trigger(feed.current());
        id
    }

    /// Recompute for the pending snapshot, if any, on the calling thread.
    pub fn process_pending(&self) -> FeedResult<Option<Arc<Alternatives>>> {
        match self.pending.take() {
            Some(snapshot) => self.recompute(&snapshot).map(Some),
            None => Ok(None),
        }
    }

    /// Compute the bundle for `snapshot` and publish it.
    ///
    /// A bundle older than the one already published is returned but not
    /// published.
    pub fn recompute(&self, snapshot: &EdgeSet) -> FeedResult<Arc<Alternatives>> {
        let request = self.request();
        let graph = RoutingGraph::new(&self.network, snapshot);
        let bundle = Arc::new(compute_alternatives_with(
            &self.router,
            &graph,
            request.from,
            request.to,
            request.weights,
        )?);
        self.computed.fetch_add(1, Ordering::Relaxed);

        {
            let mut latest = self.latest.write();
            if latest.as_ref().is_some_and(|l| l.snapshot_version > bundle.snapshot_version) {
                debug!("bundle for v{} superseded; not published", bundle.snapshot_version);
                return Ok(bundle);
            }
            *latest = Some(Arc::clone(&bundle));
        }

        info!(
            "recomputed {} -> {} at snapshot v{}",
            self.network.key(request.from),
            self.network.key(request.to),
            bundle.snapshot_version,
        );
        let observers: Vec<Arc<dyn BundleObserver>> = self.observers.lock().clone();
        for observer in &observers {
            observer.on_bundle(&bundle);
        }
        Ok(bundle)
    }

    /// The most recently published bundle.
    pub fn latest(&self) -> Option<Arc<Alternatives>> {
        self.latest.read().clone()
    }

    /// Number of recomputations run so far.
    pub fn recomputations(&self) -> u64 {
        self.computed.load(Ordering::Relaxed)
    }

    /// Snapshots dropped because a newer one arrived before they were
    /// processed.
    pub fn coalesced(&self) -> u64 {
        self.pending.replaced()
    }

    /// Process triggers on a background thread until the handle is stopped
    /// or dropped.  Once stopped, further triggers are ignored.
    pub fn spawn_worker(self: &Arc<Self>) -> FeedResult<WorkerHandle> {
        let live = Arc::clone(self);
        let thread = thread::Builder::new()
            .name("aq-feed-recompute".to_owned())
            .spawn(move || {
                while let Some(snapshot) = live.pending.wait() {
                    if let Err(e) = live.recompute(&snapshot) {
                        warn!("recomputation for v{} failed: {e}", snapshot.version());
                    }
                }
                debug!("recompute worker exiting");
            })
            .map_err(|source| FeedError::Spawn { what: "recompute worker", source })?;
        Ok(WorkerHandle { pending: Arc::clone(&self.pending), thread: Some(thread) })
    }
}

fn check_request(network: &RoadNetwork, request: &RouteRequest) -> FeedResult<()> {
    for node in [request.from, request.to] {
        if !network.contains(node) {
            return Err(RoutingError::InvalidNode(node).into());
        }
    }
    Ok(())
}

/// Stops the recompute worker when stopped or dropped.  A snapshot already
/// pending is still processed first.
pub struct WorkerHandle {
    pending: Arc<LatestSlot<Arc<EdgeSet>>>,
    thread:  Option<JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.pending.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("recompute worker panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
