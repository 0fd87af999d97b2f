//! london: air-quality-aware route alternatives across central London.
//!
//! Loads the bundled 24-node sample network, prints the four route
//! alternatives between two landmarks with turn-by-turn directions, then
//! runs the simulated live AQI feed for a few ticks and prints every
//! recomputed bundle.
//!
//! ```text
//! london [FROM TO] [--config feed.json]
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see feed and solver logs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;

use aq_core::{FeedConfig, Weights};
use aq_feed::{AqiSimulator, EdgeFeed, LiveAlternatives, RouteRequest};
use aq_network::{RoadNetwork, load_network_csv};
use aq_routing::{
    Alternatives, AqiCategory, LabeledRoute, RouteKind, compute_alternatives, format_aqi,
    format_distance, format_time, preference_label,
};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Notting Hill → Docklands crosses both parks and arterial roads.
const DEFAULT_FROM: &str = "W";
const DEFAULT_TO:   &str = "T";

const CUSTOM_WEIGHTS: Weights = Weights::fixed(0.33, 0.33, 0.34);

/// Live bundles to print before shutting the feed down.
const LIVE_UPDATES: u64 = 3;

/// Demo feed cadence when no config file is given.
const DEMO_INTERVAL_MS: u64 = 1_000;

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    from:   String,
    to:     String,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut keys = Vec::new();
    let mut config = None;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        if arg == "--config" {
            config = Some(PathBuf::from(it.next().context("--config needs a path")?));
        } else {
            keys.push(arg);
        }
    }
    let (from, to) = match keys.as_slice() {
        [] => (DEFAULT_FROM.to_owned(), DEFAULT_TO.to_owned()),
        [from, to] => (from.clone(), to.clone()),
        _ => bail!("usage: london [FROM TO] [--config feed.json]"),
    };
    Ok(Args { from, to, config })
}

fn load_feed_config(path: Option<&Path>) -> Result<FeedConfig> {
    let Some(path) = path else {
        return Ok(FeedConfig { interval_ms: DEMO_INTERVAL_MS, ..FeedConfig::default() });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading feed config {}", path.display()))?;
    let config: FeedConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing feed config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn path_keys(network: &RoadNetwork, route: &LabeledRoute) -> String {
    route
        .route
        .path
        .iter()
        .map(|&n| network.key(n))
        .collect::<Vec<_>>()
        .join(" → ")
}

fn print_bundle(network: &RoadNetwork, bundle: &Alternatives) {
    println!(
        "{:<20} {:>9} {:>10} {:>5}  {:<32} {:<20} Path",
        "Route", "Distance", "Time", "AQI", "Air quality", "Colour"
    );
    println!("{}", "-".repeat(110));
    for alt in bundle.iter() {
        if !alt.route.found {
            println!("{:<20} no route found", alt.label);
            continue;
        }
        let r = &alt.route;
        println!(
            "{:<20} {:>9} {:>10} {:>5}  {:<32} {:<20} {}",
            alt.label,
            format_distance(r.total_distance_km),
            format_time(r.total_time_min),
            format_aqi(r.average_aqi),
            AqiCategory::of(r.average_aqi).label(),
            alt.color.css(),
            path_keys(network, alt),
        );
    }
}

fn print_directions(alt: &LabeledRoute) {
    println!("{} directions:", alt.label);
    for step in &alt.route.directions {
        println!(
            "  {} {:<60} {:>8} {:>8}",
            step.icon(),
            step.instruction,
            format_distance(step.cumulative_distance_km),
            format_time(step.cumulative_time_min),
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let args = parse_args()?;
    let feed_config = load_feed_config(args.config.as_deref())?;

    // 1. Load the sample network.
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let (network, edges) = load_network_csv(
        &data.join("london_nodes.csv"),
        &data.join("london_edges.csv"),
    )?;
    let from = network.node_id(&args.from)?;
    let to = network.node_id(&args.to)?;

    println!("=== london: air-quality-aware routing ===");
    println!(
        "Network: {} nodes, {} edges  |  {} → {}",
        network.node_count(),
        edges.len(),
        network.node(from).map_or("?", |n| n.name.as_str()),
        network.node(to).map_or("?", |n| n.name.as_str()),
    );
    println!("Custom weights {CUSTOM_WEIGHTS}: {}", preference_label(&CUSTOM_WEIGHTS));
    println!();

    // 2. One-shot alternatives on the static table.
    let bundle = compute_alternatives(&network, &edges, from, to, CUSTOM_WEIGHTS)?;
    print_bundle(&network, &bundle);
    println!();
    if let Some(custom) = bundle.get(RouteKind::Custom) {
        print_directions(custom);
        println!();
    }

    // 3. Live feed: drift AQI and keep the bundle fresh.
    let network = Arc::new(network);
    let feed = Arc::new(EdgeFeed::new(network.node_count(), edges));
    let live = Arc::new(LiveAlternatives::with_dijkstra(
        Arc::clone(&network),
        RouteRequest { from, to, weights: CUSTOM_WEIGHTS },
    )?);

    let (tx, rx) = mpsc::channel::<Arc<Alternatives>>();
    live.observe(move |bundle: &Arc<Alternatives>| {
        let _ = tx.send(Arc::clone(bundle));
    });
    let worker = live.spawn_worker()?;
    live.attach(&feed);

    info!("starting AQI feed: {feed_config:?}");
    let wait = feed_config.interval() * 4 + Duration::from_secs(5);
    let simulator = AqiSimulator::new(feed_config)?.spawn(Arc::clone(&feed))?;

    let mut printed = 0;
    while printed < LIVE_UPDATES {
        let bundle = rx.recv_timeout(wait).context("live feed stalled")?;
        if bundle.snapshot_version == 0 {
            continue;
        }
        println!("── live update: snapshot v{} ──", bundle.snapshot_version);
        print_bundle(&network, &bundle);
        println!();
        printed += 1;
    }

    let ticks = simulator.stop().map(|s| s.tick());
    worker.stop();
    println!(
        "Feed stopped after {} ticks; {} recomputations, {} snapshots coalesced.",
        ticks.map_or_else(|| "?".to_owned(), |t| t.0.to_string()),
        live.recomputations(),
        live.coalesced(),
    );

    Ok(())
}
