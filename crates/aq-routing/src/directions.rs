//! Turn-by-turn direction synthesis.
//!
//! Each traversed edge becomes one `Turn` step, bracketed by a `Start` step
//! at the first node and an `End` step at the last.  Turns are classified
//! from the change in great-circle bearing between consecutive segments.

use std::sync::Arc;

use aq_core::{NodeId, bearing_delta};
use aq_network::{OutArc, RoadNetwork};

/// Turn classification by signed bearing change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnKind {
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
}

impl TurnKind {
    /// Leading words of the instruction, e.g. `"Turn right"`.
    pub fn verb(self) -> &'static str {
        match self {
            TurnKind::Straight    => "Continue straight",
            TurnKind::SlightLeft  => "Turn slightly left",
            TurnKind::SlightRight => "Turn slightly right",
            TurnKind::Left        => "Turn left",
            TurnKind::Right       => "Turn right",
            TurnKind::SharpLeft   => "Make a sharp left",
            TurnKind::SharpRight  => "Make a sharp right",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TurnKind::Straight    => "⬆️",
            TurnKind::SlightLeft  => "↖️",
            TurnKind::SlightRight => "↗️",
            TurnKind::Left        => "⬅️",
            TurnKind::Right       => "➡️",
            TurnKind::SharpLeft   => "↩️",
            TurnKind::SharpRight  => "↪️",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnKind::Straight    => "straight",
            TurnKind::SlightLeft  => "slight-left",
            TurnKind::SlightRight => "slight-right",
            TurnKind::Left        => "left",
            TurnKind::Right       => "right",
            TurnKind::SharpLeft   => "sharp-left",
            TurnKind::SharpRight  => "sharp-right",
        }
    }
}

impl std::fmt::Display for TurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the turn from bearing `prev_deg` onto bearing `next_deg`.
///
/// | `|delta|`     | class    |
/// |---------------|----------|
/// | `< 20`        | straight |
/// | `[20, 70)`    | slight   |
/// | `[70, 120)`   | turn     |
/// | `>= 120`      | sharp    |
///
/// Positive deltas turn right, negative left.
pub fn classify_turn(prev_deg: f64, next_deg: f64) -> TurnKind {
    let d = bearing_delta(prev_deg, next_deg);
    let a = d.abs();
    let right = d > 0.0;
    if a < 20.0 {
        TurnKind::Straight
    } else if a < 70.0 {
        if right { TurnKind::SlightRight } else { TurnKind::SlightLeft }
    } else if a < 120.0 {
        if right { TurnKind::Right } else { TurnKind::Left }
    } else if right {
        TurnKind::SharpRight
    } else {
        TurnKind::SharpLeft
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Start,
    Turn,
    End,
}

/// One human-readable instruction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectionStep {
    pub kind: StepKind,
    /// Turn classification; `None` for start and end steps.
    pub turn: Option<TurnKind>,
    pub instruction: String,
    /// Street for turn steps, node address for start and end steps.
    pub street_name: Arc<str>,
    /// Length of this step's edge, km (0 for start and end).
    pub distance_km: f64,
    /// Travel time of this step's edge, minutes (0 for start and end).
    pub time_min: f64,
    /// Running distance up to and including this step, one decimal.
    pub cumulative_distance_km: f64,
    /// Running time up to and including this step, whole minutes.
    pub cumulative_time_min: f64,
    /// Edge AQI rounded to an integer; turn steps only.
    pub aqi: Option<u32>,
    /// Node reached by this step.
    pub node: NodeId,
}

impl DirectionStep {
    pub fn icon(&self) -> &'static str {
        match (self.kind, self.turn) {
            (StepKind::Start, _)         => "🚗",
            (StepKind::End, _)           => "🏁",
            (StepKind::Turn, Some(turn)) => turn.icon(),
            (StepKind::Turn, None)       => TurnKind::Straight.icon(),
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn air_quality_note(aqi: f64) -> &'static str {
    if aqi < 50.0 {
        " (Excellent air quality)"
    } else if aqi < 100.0 {
        " (Good air quality)"
    } else if aqi > 120.0 {
        " (Poor air quality)"
    } else {
        ""
    }
}

/// Turn `path` and its `path_edges` into a start/turn.../end step sequence.
///
/// `path_edges[i]` must connect `path[i]` to `path[i + 1]`.  Paths with
/// fewer than two nodes produce no steps.
pub fn synthesize(network: &RoadNetwork, path: &[NodeId], path_edges: &[OutArc]) -> Vec<DirectionStep> {
    if path.len() < 2 || path_edges.len() + 1 != path.len() {
        return Vec::new();
    }
    let nodes = network.nodes();
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Vec::new();
    };

    let mut steps = Vec::with_capacity(path_edges.len() + 2);
    steps.push(DirectionStep {
        kind: StepKind::Start,
        turn: None,
        instruction: format!("Start at {}", nodes[first.index()].name),
        street_name: Arc::from(nodes[first.index()].address.as_str()),
        distance_km: 0.0,
        time_min: 0.0,
        cumulative_distance_km: 0.0,
        cumulative_time_min: 0.0,
        aqi: None,
        node: first,
    });

    let mut cum_distance = 0.0;
    let mut cum_time = 0.0;
    let mut prev_bearing: Option<f64> = None;

    for (i, arc) in path_edges.iter().enumerate() {
        let from = nodes[path[i].index()].pos;
        let to = nodes[path[i + 1].index()].pos;
        let bearing = from.bearing_deg(to);

        cum_distance += arc.attrs.distance_km;
        cum_time += arc.attrs.travel_time_min;

        let (turn, lead) = match prev_bearing {
            None       => (TurnKind::Straight, "Head"),
            Some(prev) => {
                let turn = classify_turn(prev, bearing);
                (turn, turn.verb())
            }
        };

        steps.push(DirectionStep {
            kind: StepKind::Turn,
            turn: Some(turn),
            instruction: format!(
                "{lead} onto {}{}",
                arc.attrs.street_name,
                air_quality_note(arc.attrs.aqi),
            ),
            street_name: arc.attrs.street_name.clone(),
            distance_km: arc.attrs.distance_km,
            time_min: arc.attrs.travel_time_min,
            cumulative_distance_km: round1(cum_distance),
            cumulative_time_min: cum_time.round(),
            aqi: Some(arc.attrs.aqi.round() as u32),
            node: path[i + 1],
        });
        prev_bearing = Some(bearing);
    }

    steps.push(DirectionStep {
        kind: StepKind::End,
        turn: None,
        instruction: format!("Arrive at {}", nodes[last.index()].name),
        street_name: Arc::from(nodes[last.index()].address.as_str()),
        distance_km: 0.0,
        time_min: 0.0,
        cumulative_distance_km: round1(cum_distance),
        cumulative_time_min: cum_time.round(),
        aqi: None,
        node: last,
    });
    steps
}
