//! Publish/subscribe over immutable edge snapshots.
//!
//! # Publication
//!
//! The feed holds one `Arc<EdgeSet>`.  Publishing builds nothing: the caller
//! hands over a complete replacement, and the feed swaps the reference under
//! a write lock.  Readers clone the `Arc` and keep a consistent snapshot for
//! as long as they need it, no matter how many newer ones are published.
//!
//! # Notification
//!
//! Subscribers are called synchronously on the publishing thread, after the
//! swap and outside every feed lock, in subscription order.  A subscriber
//! may therefore call back into the feed (read `current`, even unsubscribe).
//! Subscribers should return quickly; [`LiveAlternatives`] only enqueues.
//!
//! [`LiveAlternatives`]: crate::LiveAlternatives

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};
use parking_lot::{Mutex, RwLock};

use aq_network::EdgeSet;

use crate::{FeedError, FeedResult};

/// Handle returned by [`EdgeFeed::subscribe`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Receives every snapshot published after subscription.
///
/// Implemented for any `Fn(&Arc<EdgeSet>) + Send + Sync` closure.
pub trait FeedSubscriber: Send + Sync {
    fn on_snapshot(&self, snapshot: &Arc<EdgeSet>);
}

impl<F> FeedSubscriber for F
where
    F: Fn(&Arc<EdgeSet>) + Send + Sync,
{
    fn on_snapshot(&self, snapshot: &Arc<EdgeSet>) {
        self(snapshot)
    }
}

/// The live edge table: one current snapshot plus its subscribers.
pub struct EdgeFeed {
    node_count:  usize,
    current:     RwLock<Arc<EdgeSet>>,
    subscribers: Mutex<Vec<(SubscriptionId, Arc<dyn FeedSubscriber>)>>,
    next_id:     AtomicU64,
}

impl EdgeFeed {
    /// A feed over a network of `node_count` nodes, starting at `initial`.
    pub fn new(node_count: usize, initial: EdgeSet) -> Self {
        Self {
            node_count,
            current:     RwLock::new(Arc::new(initial)),
            subscribers: Mutex::new(Vec::new()),
            next_id:     AtomicU64::new(0),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// The snapshot published most recently.
    pub fn current(&self) -> Arc<EdgeSet> {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version()
    }

    pub fn subscribe<S: FeedSubscriber + 'static>(&self, subscriber: S) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(subscriber)));
        debug!("{id} subscribed");
        id
    }

    /// Remove a subscriber.  Returns `false` if `id` was not subscribed.
    ///
    /// A notification already in progress on another thread may still reach
    /// the removed subscriber once.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.lock();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        let removed = subs.len() != before;
        if removed {
            debug!("{id} unsubscribed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Atomically replace the current snapshot and notify every subscriber.
    ///
    /// `snapshot` must carry a higher version than the current one, so
    /// readers can order the snapshots they see.
    pub fn publish(&self, snapshot: EdgeSet) -> FeedResult<Arc<EdgeSet>> {
        let snapshot = Arc::new(snapshot);
        {
            let mut current = self.current.write();
            if snapshot.version() <= current.version() {
                return Err(FeedError::StaleSnapshot {
                    current: current.version(),
                    offered: snapshot.version(),
                });
            }
            *current = Arc::clone(&snapshot);
        }

        let subscribers: Vec<Arc<dyn FeedSubscriber>> =
            self.subscribers.lock().iter().map(|(_, s)| Arc::clone(s)).collect();
        info!(
            "published edge snapshot v{} ({} edges) to {} subscribers",
            snapshot.version(),
            snapshot.len(),
            subscribers.len(),
        );
        for subscriber in &subscribers {
            subscriber.on_snapshot(&snapshot);
        }
        Ok(snapshot)
    }
}

impl fmt::Debug for EdgeFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeFeed")
            .field("node_count", &self.node_count)
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
