//! Simulated live AQI source.
//!
//! Every tick each edge's AQI is scaled by a uniform factor in
//! `1 ± jitter_fraction / 2` and clamped to `[aqi_floor, aqi_ceiling]`.  The
//! whole replacement edge list is built before it is published, so no
//! reader ever sees a partly updated table.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, info, warn};

use aq_core::{FeedConfig, FeedRng, Tick};
use aq_network::EdgeSet;

use crate::{EdgeFeed, FeedError, FeedResult};

pub struct AqiSimulator {
    config: FeedConfig,
    rng:    FeedRng,
    tick:   Tick,
}

impl AqiSimulator {
    pub fn new(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;
        let rng = FeedRng::new(config.seed);
        Ok(Self { config, rng, tick: Tick::ZERO })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Number of ticks simulated so far.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Build the successor of `current` without publishing it.
    pub fn drift(&mut self, node_count: usize, current: &EdgeSet) -> FeedResult<EdgeSet> {
        let cfg = &self.config;
        let rng = &mut self.rng;
        let next = current.map_aqi(node_count, |_, edge| {
            let factor = 1.0 + rng.centered() * cfg.jitter_fraction;
            (edge.attrs.aqi * factor).clamp(cfg.aqi_floor, cfg.aqi_ceiling)
        })?;
        Ok(next)
    }

    /// Advance one tick: drift the feed's current snapshot and publish it.
    pub fn step(&mut self, feed: &EdgeFeed) -> FeedResult<Arc<EdgeSet>> {
        let current = feed.current();
        let next = self.drift(feed.node_count(), &current)?;
        self.tick = self.tick.next();
        debug!("{}: drifted {} edges to v{}", self.tick, next.len(), next.version());
        feed.publish(next)
    }

    /// Run [`step`](Self::step) every `interval_ms` on a background thread
    /// until the returned handle is stopped or dropped.
    pub fn spawn(self, feed: Arc<EdgeFeed>) -> FeedResult<SimulatorHandle> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("aq-feed-sim".to_owned())
            .spawn(move || self.run(&feed, &flag))
            .map_err(|source| FeedError::Spawn { what: "simulator", source })?;
        Ok(SimulatorHandle { stop, thread: Some(thread) })
    }

    fn run(mut self, feed: &EdgeFeed, stop: &AtomicBool) -> AqiSimulator {
        let interval = self.config.interval();
        info!("AQI simulation started: every {interval:?}, jitter {}", self.config.jitter_fraction);
        loop {
            let deadline = Instant::now() + interval;
            loop {
                if stop.load(Ordering::Acquire) {
                    info!("AQI simulation stopped after {}", self.tick);
                    return self;
                }
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::park_timeout(deadline - now);
            }
            if let Err(e) = self.step(feed) {
                warn!("{}: AQI update skipped: {e}", self.tick);
            }
        }
    }
}

/// Stops the background simulator when stopped or dropped.
pub struct SimulatorHandle {
    stop:   Arc<AtomicBool>,
    thread: Option<JoinHandle<AqiSimulator>>,
}

impl SimulatorHandle {
    /// Stop the simulator and return it, e.g. to inspect how many ticks ran.
    ///
    /// Returns `None` if the simulator thread panicked.
    pub fn stop(mut self) -> Option<AqiSimulator> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<AqiSimulator> {
        self.stop.store(true, Ordering::Release);
        let thread = self.thread.take()?;
        thread.thread().unpark();
        thread.join().ok()
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
