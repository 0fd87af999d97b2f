//! Unit tests for aq-feed.

#[cfg(test)]
mod helpers {
    use aq_core::{GeoPoint, NodeId};
    use aq_network::{EdgeAttrs, EdgeSet, RoadNetwork, RoadNetworkBuilder, load_network_reader};

    /// A→B→C plus a dirty A→C bypass.
    pub fn line() -> (RoadNetwork, EdgeSet, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node("A", "Alpha", "", GeoPoint::new(0.0, 0.0)).unwrap();
        let bb = b.add_node("B", "Bravo", "", GeoPoint::new(0.0, 1.0)).unwrap();
        let c = b.add_node("C", "Charlie", "", GeoPoint::new(0.0, 2.0)).unwrap();
        b.add_directed_edge(a, bb, EdgeAttrs::new(1.0, 1.0, 20.0, "First St"));
        b.add_directed_edge(bb, c, EdgeAttrs::new(1.0, 1.0, 20.0, "Second St"));
        b.add_directed_edge(a, c, EdgeAttrs::new(5.0, 1.0, 190.0, "Bypass"));
        let (net, edges) = b.build().unwrap();
        (net, edges, [a, bb, c])
    }

    pub fn london() -> (RoadNetwork, EdgeSet) {
        load_network_reader(
            include_str!("../../../data/london_nodes.csv").as_bytes(),
            include_str!("../../../data/london_edges.csv").as_bytes(),
        )
        .unwrap()
    }
}

// ── EdgeFeed ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod feed {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use aq_network::EdgeSet;
    use super::helpers::line;
    use crate::{EdgeFeed, FeedError};

    #[test]
    fn publish_swaps_snapshot() {
        let (net, edges, _) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone());
        let before = feed.current();

        let next = edges.map_aqi(net.node_count(), |_, e| e.attrs.aqi + 1.0).unwrap();
        let published = feed.publish(next).unwrap();

        assert_eq!(feed.version(), published.version());
        assert!(Arc::ptr_eq(&feed.current(), &published));
        // Readers holding the old snapshot keep it intact.
        assert_eq!(before.version(), edges.version());
        assert_eq!(before[0].attrs.aqi, 20.0);
        assert_eq!(feed.current()[0].attrs.aqi, 21.0);
    }

    #[test]
    fn stale_snapshot_rejected() {
        let (net, edges, _) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone().with_version(5));
        let err = feed.publish(edges.with_version(5)).unwrap_err();
        assert!(matches!(err, FeedError::StaleSnapshot { current: 5, offered: 5 }));
        assert_eq!(feed.version(), 5);
    }

    #[test]
    fn subscribers_see_each_publish() {
        let (net, edges, _) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone());
        let seen = Arc::new(AtomicU64::new(0));
        let s = Arc::clone(&seen);
        feed.subscribe(move |snap: &Arc<EdgeSet>| {
            s.store(snap.version(), Ordering::SeqCst);
        });

        feed.publish(edges.clone().with_version(3)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        feed.publish(edges.with_version(4)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (net, edges, _) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone());
        let calls = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&calls);
        let id = feed.subscribe(move |_: &Arc<EdgeSet>| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let other = feed.subscribe(|_: &Arc<EdgeSet>| {});
        assert_ne!(id, other);
        assert_eq!(feed.subscriber_count(), 2);

        feed.publish(edges.clone().with_version(1)).unwrap();
        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        feed.publish(edges.with_version(2)).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(feed.subscriber_count(), 1);
    }
}

// ── AqiSimulator ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulator {
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    use aq_core::{FeedConfig, Tick};
    use aq_network::EdgeSet;
    use super::helpers::{line, london};
    use crate::{AqiSimulator, EdgeFeed, FeedError};

    #[test]
    fn drift_stays_within_jitter_and_clamp() {
        let (net, edges) = london();
        let mut sim = AqiSimulator::new(FeedConfig::default()).unwrap();
        let next = sim.drift(net.node_count(), &edges).unwrap();

        assert_eq!(next.len(), edges.len());
        assert_eq!(next.version(), edges.version() + 1);
        for (old, new) in edges.iter().zip(next.iter()) {
            assert_eq!(old.from, new.from);
            assert_eq!(old.to, new.to);
            assert_eq!(old.attrs.distance_km, new.attrs.distance_km);
            assert_eq!(old.attrs.travel_time_min, new.attrs.travel_time_min);
            let lo = (old.attrs.aqi * 0.95).clamp(15.0, 200.0);
            let hi = (old.attrs.aqi * 1.05).clamp(15.0, 200.0);
            assert!(new.attrs.aqi >= lo - 1e-9 && new.attrs.aqi <= hi + 1e-9);
        }
    }

    #[test]
    fn clamp_applies() {
        let (net, edges, _) = line();
        let cfg = FeedConfig { aqi_floor: 50.0, aqi_ceiling: 100.0, ..FeedConfig::default() };
        let mut sim = AqiSimulator::new(cfg).unwrap();
        let next = sim.drift(net.node_count(), &edges).unwrap();
        assert!(next.iter().all(|e| (50.0..=100.0).contains(&e.attrs.aqi)));
    }

    #[test]
    fn same_seed_same_drift() {
        let (net, edges) = london();
        let mut a = AqiSimulator::new(FeedConfig::default()).unwrap();
        let mut b = AqiSimulator::new(FeedConfig::default()).unwrap();
        assert_eq!(a.drift(net.node_count(), &edges).unwrap(), b.drift(net.node_count(), &edges).unwrap());

        let mut c = AqiSimulator::new(FeedConfig { seed: 7, ..FeedConfig::default() }).unwrap();
        let mut d = AqiSimulator::new(FeedConfig::default()).unwrap();
        assert_ne!(c.drift(net.node_count(), &edges).unwrap(), d.drift(net.node_count(), &edges).unwrap());
    }

    #[test]
    fn step_publishes() {
        let (net, edges, _) = line();
        let feed = EdgeFeed::new(net.node_count(), edges);
        let mut sim = AqiSimulator::new(FeedConfig::default()).unwrap();
        sim.step(&feed).unwrap();
        sim.step(&feed).unwrap();
        assert_eq!(sim.tick(), Tick(2));
        assert_eq!(feed.version(), 2);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = FeedConfig { interval_ms: 0, ..FeedConfig::default() };
        assert!(matches!(AqiSimulator::new(cfg), Err(FeedError::Core(_))));
        let cfg = FeedConfig { aqi_floor: 300.0, ..FeedConfig::default() };
        assert!(AqiSimulator::new(cfg).is_err());
    }

    #[test]
    fn background_thread_ticks_until_stopped() {
        let (net, edges, _) = line();
        let feed = Arc::new(EdgeFeed::new(net.node_count(), edges));
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        feed.subscribe(move |snap: &Arc<EdgeSet>| {
            let _ = tx.lock().unwrap().send(snap.version());
        });

        let cfg = FeedConfig { interval_ms: 5, ..FeedConfig::default() };
        let handle = AqiSimulator::new(cfg).unwrap().spawn(Arc::clone(&feed)).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 2);

        let sim = handle.stop().unwrap();
        assert!(sim.tick() >= Tick(2));
        assert_eq!(feed.version(), sim.tick().0);
    }
}

// ── LatestSlot ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod coalesce {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use crate::LatestSlot;

    #[test]
    fn latest_value_wins() {
        let slot = LatestSlot::new();
        assert!(slot.put(1));
        assert!(slot.put(2));
        assert!(slot.put(3));
        assert_eq!(slot.replaced(), 2);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn close_drains_then_ends() {
        let slot = LatestSlot::new();
        slot.put("pending");
        slot.close();
        assert!(!slot.put("late"));
        assert!(slot.is_closed());
        assert_eq!(slot.wait(), Some("pending"));
        assert_eq!(slot.wait(), None);
    }

    #[test]
    fn wait_timeout_expires() {
        let slot: LatestSlot<u32> = LatestSlot::new();
        assert_eq!(slot.wait_timeout(Duration::from_millis(10)), None);
        slot.put(9);
        assert_eq!(slot.wait_timeout(Duration::from_millis(10)), Some(9));
    }

    #[test]
    fn wakes_waiting_consumer() {
        let slot = Arc::new(LatestSlot::new());
        let consumer = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.wait())
        };
        slot.put(42u32);
        assert_eq!(consumer.join().unwrap(), Some(42));
        assert!(!slot.is_pending());
    }
}

// ── LiveAlternatives ──────────────────────────────────────────────────────────

#[cfg(test)]
mod live {
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    use aq_core::{NodeId, Weights};
    use aq_routing::{Alternatives, RouteKind, RoutingError};
    use super::helpers::line;
    use crate::{EdgeFeed, FeedError, LiveAlternatives, RouteRequest};

    fn request(from: NodeId, to: NodeId) -> RouteRequest {
        RouteRequest { from, to, weights: Weights::default() }
    }

    #[test]
    fn attach_queues_current_snapshot() {
        let (net, edges, [a, _, c]) = line();
        let feed = EdgeFeed::new(net.node_count(), edges);
        let live = Arc::new(LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap());
        live.attach(&feed);

        let bundle = live.process_pending().unwrap().unwrap();
        assert_eq!(bundle.snapshot_version, 0);
        assert_eq!(bundle.routes.len(), 4);
        assert!(live.process_pending().unwrap().is_none());
        assert_eq!(live.recomputations(), 1);
    }

    #[test]
    fn rapid_updates_coalesce() {
        let (net, edges, [a, _, c]) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone());
        let live = Arc::new(LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap());
        live.attach(&feed);
        for v in 1..=3 {
            feed.publish(edges.clone().with_version(v)).unwrap();
        }

        let bundle = live.process_pending().unwrap().unwrap();
        assert_eq!(bundle.snapshot_version, 3);
        assert!(live.process_pending().unwrap().is_none());
        assert_eq!(live.recomputations(), 1);
        assert_eq!(live.coalesced(), 3);
        assert_eq!(live.latest().unwrap().snapshot_version, 3);
    }

    #[test]
    fn bundle_tracks_new_aqi() {
        let (net, edges, [a, b, c]) = line();
        let node_count = net.node_count();
        let feed = EdgeFeed::new(node_count, edges.clone());
        let live = Arc::new(LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap());
        live.attach(&feed);
        let first = live.process_pending().unwrap().unwrap();
        assert_eq!(first.get(RouteKind::Cleanest).unwrap().route.path, vec![a, b, c]);

        // The bypass becomes the cleaner option.
        let swapped = edges
            .map_aqi(node_count, |_, e| if e.from == a && e.to == c { 5.0 } else { 150.0 })
            .unwrap();
        feed.publish(swapped).unwrap();
        let second = live.process_pending().unwrap().unwrap();
        assert_eq!(second.get(RouteKind::Cleanest).unwrap().route.path, vec![a, c]);
        assert_eq!(second.snapshot_version, 1);
    }

    #[test]
    fn older_bundle_not_published() {
        let (net, edges, [a, _, c]) = line();
        let live = LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap();
        live.recompute(&edges.clone().with_version(4)).unwrap();
        let old = live.recompute(&edges.with_version(2)).unwrap();
        assert_eq!(old.snapshot_version, 2);
        assert_eq!(live.latest().unwrap().snapshot_version, 4);
    }

    #[test]
    fn out_of_order_trigger_keeps_newest() {
        let (net, edges, [a, _, c]) = line();
        let live = LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap();
        live.trigger(Arc::new(edges.clone().with_version(7)));
        live.trigger(Arc::new(edges.clone().with_version(6)));

        let bundle = live.process_pending().unwrap().unwrap();
        assert_eq!(bundle.snapshot_version, 7);
        assert!(live.process_pending().unwrap().is_none());
        assert_eq!(live.coalesced(), 0);

        // Also ignored once the newer one has already been processed.
        live.trigger(Arc::new(edges.with_version(5)));
        assert!(live.process_pending().unwrap().is_none());
        assert_eq!(live.latest().unwrap().snapshot_version, 7);
    }

    #[test]
    fn set_request_requeues_newest_snapshot() {
        let (net, edges, [a, b, c]) = line();
        let live = LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap();
        live.trigger(Arc::new(edges.clone().with_version(7)));
        live.trigger(Arc::new(edges.with_version(6)));
        live.process_pending().unwrap();

        live.set_request(request(a, b)).unwrap();
        let bundle = live.process_pending().unwrap().unwrap();
        assert_eq!(bundle.snapshot_version, 7);
        assert_eq!(bundle.to, b);
    }

    #[test]
    fn set_request_requeues_last_snapshot() {
        let (net, edges, [a, b, c]) = line();
        let feed = EdgeFeed::new(net.node_count(), edges);
        let live = Arc::new(LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap());
        live.attach(&feed);
        live.process_pending().unwrap();

        live.set_request(request(a, b)).unwrap();
        let bundle = live.process_pending().unwrap().unwrap();
        assert_eq!(bundle.to, b);
        assert_eq!(live.request().to, b);
    }

    #[test]
    fn invalid_request_rejected() {
        let (net, _, [a, _, _]) = line();
        let err = LiveAlternatives::with_dijkstra(Arc::new(net), request(a, NodeId(40))).err().unwrap();
        assert!(matches!(err, FeedError::Routing(RoutingError::InvalidNode(NodeId(40)))));
    }

    #[test]
    fn worker_publishes_to_observers() {
        let (net, edges, [a, _, c]) = line();
        let feed = EdgeFeed::new(net.node_count(), edges.clone());
        let live = Arc::new(LiveAlternatives::with_dijkstra(Arc::new(net), request(a, c)).unwrap());

        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        live.observe(move |bundle: &Arc<Alternatives>| {
            let _ = tx.lock().unwrap().send(bundle.snapshot_version);
        });
        let worker = live.spawn_worker().unwrap();
        live.attach(&feed);
        feed.publish(edges.with_version(7)).unwrap();

        let mut last = 0;
        while last < 7 {
            last = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        worker.stop();
        assert_eq!(live.latest().unwrap().snapshot_version, 7);

        // Stopped: triggers are ignored.
        live.trigger(feed.current());
        assert!(live.process_pending().unwrap().is_none());
    }
}
