//! The four named route alternatives.
//!
//! One [`RoutingGraph`] is built per request and every solve reads it, so
//! all four routes are computed against the same edge snapshot and are
//! directly comparable.

use std::collections::BTreeMap;

use log::debug;

use aq_core::{NodeId, Weights};
use aq_network::{EdgeSet, RoadNetwork};

use crate::graph::RoutingGraph;
use crate::palette::{RouteColor, route_color};
use crate::route::RouteResult;
use crate::router::{DijkstraRouter, Router};
use crate::RoutingResult;

/// Which alternative a route is.  Ordered the way the bundle lists them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteKind {
    Custom,
    Shortest,
    Fastest,
    Cleanest,
}

impl RouteKind {
    pub const ALL: [RouteKind; 4] = [
        RouteKind::Custom,
        RouteKind::Shortest,
        RouteKind::Fastest,
        RouteKind::Cleanest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RouteKind::Custom   => "Custom Route",
            RouteKind::Shortest => "Shortest Route",
            RouteKind::Fastest  => "Fastest Route",
            RouteKind::Cleanest => "Cleanest Air Route",
        }
    }

    /// Key used by downstream consumers (`"custom"`, `"shortest"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Custom   => "custom",
            RouteKind::Shortest => "shortest",
            RouteKind::Fastest  => "fastest",
            RouteKind::Cleanest => "cleanest",
        }
    }

    /// Weight vector of this alternative; `custom` is used for `Custom`.
    pub fn weights(self, custom: Weights) -> Weights {
        match self {
            RouteKind::Custom   => custom,
            RouteKind::Shortest => Weights::SHORTEST,
            RouteKind::Fastest  => Weights::FASTEST,
            RouteKind::Cleanest => Weights::CLEANEST,
        }
    }

    pub fn color(self, custom: &Weights) -> RouteColor {
        match self {
            RouteKind::Custom   => route_color(custom),
            RouteKind::Shortest => RouteColor::Blue,
            RouteKind::Fastest  => RouteColor::Orange,
            RouteKind::Cleanest => RouteColor::Green,
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route decorated for display.  Label and colour never influence the
/// path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LabeledRoute {
    pub kind:    RouteKind,
    pub label:   &'static str,
    pub color:   RouteColor,
    pub weights: Weights,
    pub route:   RouteResult,
}

/// The alternatives bundle: one route per [`RouteKind`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Alternatives {
    pub from: NodeId,
    pub to:   NodeId,
    pub routes: BTreeMap<RouteKind, LabeledRoute>,
    /// Version of the snapshot all four routes were computed against.
    pub snapshot_version: u64,
}

impl Alternatives {
    pub fn get(&self, kind: RouteKind) -> Option<&LabeledRoute> {
        self.routes.get(&kind)
    }

    /// Routes in `RouteKind` order.
    pub fn iter(&self) -> impl Iterator<Item = &LabeledRoute> {
        self.routes.values()
    }

    /// `true` if any alternative found a route.  All four share the same
    /// reachability, since edge costs never make an edge impassable.
    pub fn any_found(&self) -> bool {
        self.routes.values().any(|r| r.route.found)
    }
}

/// Compute all four alternatives from `from` to `to` over `edges` with
/// the default Dijkstra router.
pub fn compute_alternatives(
    network: &RoadNetwork,
    edges:   &EdgeSet,
    from:    NodeId,
    to:      NodeId,
    custom:  Weights,
) -> RoutingResult<Alternatives> {
    let graph = RoutingGraph::new(network, edges);
    compute_alternatives_with(&DijkstraRouter, &graph, from, to, custom)
}

/// Compute all four alternatives over an already prepared graph with
/// `router`.
///
/// With the `parallel` feature the four solves run on Rayon's pool; the
/// result is identical either way.
pub fn compute_alternatives_with<R: Router + ?Sized>(
    router: &R,
    graph:  &RoutingGraph<'_>,
    from:   NodeId,
    to:     NodeId,
    custom: Weights,
) -> RoutingResult<Alternatives> {
    let solve = |kind: RouteKind| -> RoutingResult<LabeledRoute> {
        let weights = kind.weights(custom);
        let route = router.route(graph, from, to, &weights)?;
        Ok(LabeledRoute {
            kind,
            label: kind.label(),
            color: kind.color(&custom),
            weights,
            route,
        })
    };

    #[cfg(not(feature = "parallel"))]
    let solved: RoutingResult<Vec<LabeledRoute>> = RouteKind::ALL.into_iter().map(solve).collect();

    #[cfg(feature = "parallel")]
    let solved: RoutingResult<Vec<LabeledRoute>> = {
        use rayon::prelude::*;
        RouteKind::ALL.into_par_iter().map(solve).collect()
    };

    let routes: BTreeMap<RouteKind, LabeledRoute> =
        solved?.into_iter().map(|r| (r.kind, r)).collect();

    debug!(
        "alternatives {} -> {} at snapshot v{}: {} routes",
        graph.network.key(from),
        graph.network.key(to),
        graph.version,
        routes.len(),
    );

    Ok(Alternatives { from, to, routes, snapshot_version: graph.version })
}
