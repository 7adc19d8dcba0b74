//! Turn-by-turn directions from a node path.
//!
//! A path is walked edge by edge.  At every interior node the change in
//! initial bearing between the incoming and outgoing edge is classified by
//! [`TurnThresholds`].  Consecutive edges collapse into one
//! [`NavigationStep`] while the street stays the same and the turn is
//! [`Direction::Straight`].

use std::fmt;

use wf_core::NodeIdx;
use wf_graph::SpatialGraph;

use crate::{RouteError, RouteResult};

pub const METRES_PER_MILE: f64 = 1609.344;

// ── Direction ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Start,
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    Arrive,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Start       => "Start",
            Direction::Straight    => "Go straight",
            Direction::SlightLeft  => "Slight left",
            Direction::SlightRight => "Slight right",
            Direction::Left        => "Turn left",
            Direction::Right       => "Turn right",
            Direction::SharpLeft   => "Sharp left",
            Direction::SharpRight  => "Sharp right",
            Direction::Arrive      => "Arrive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── NavigationStep ────────────────────────────────────────────────────────────

/// One instruction: a manoeuvre followed by a stretch along one street.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationStep {
    pub direction:  Direction,
    pub distance_m: f64,
    /// `None` for unnamed roads and for the final `Arrive` step.
    pub street:     Option<String>,
}

impl NavigationStep {
    pub fn arrive() -> Self {
        Self { direction: Direction::Arrive, distance_m: 0.0, street: None }
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_m / METRES_PER_MILE
    }
}

impl fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == Direction::Arrive {
            return f.write_str("You have arrived at your destination.");
        }
        write!(
            f,
            "{} on {} and continue for {:.3} miles.",
            self.direction,
            self.street.as_deref().unwrap_or("unknown road"),
            self.distance_miles(),
        )
    }
}

// ── TurnThresholds ────────────────────────────────────────────────────────────

/// Bearing-change bands, in degrees, used to classify a turn.
///
/// `|Δ| < straight_deg` is straight, `< slight_deg` slight, `< turn_deg` a
/// normal turn, anything larger sharp.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnThresholds {
    pub straight_deg: f64,
    pub slight_deg:   f64,
    pub turn_deg:     f64,
}

impl Default for TurnThresholds {
    fn default() -> Self {
        Self { straight_deg: 15.0, slight_deg: 30.0, turn_deg: 100.0 }
    }
}

impl TurnThresholds {
    /// Classify a bearing change.  Positive `delta_deg` turns right.
    pub fn classify(&self, delta_deg: f64) -> Direction {
        let delta = normalize_delta(delta_deg);
        let right = delta > 0.0;
        let mag = delta.abs();
        if mag < self.straight_deg {
            Direction::Straight
        } else if mag < self.slight_deg {
            if right { Direction::SlightRight } else { Direction::SlightLeft }
        } else if mag < self.turn_deg {
            if right { Direction::Right } else { Direction::Left }
        } else if right {
            Direction::SharpRight
        } else {
            Direction::SharpLeft
        }
    }
}

/// Map any angle difference into (−180, 180].
pub fn normalize_delta(delta_deg: f64) -> f64 {
    let d = delta_deg.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

// ── DirectionsBuilder ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct DirectionsBuilder {
    thresholds: TurnThresholds,
}

impl DirectionsBuilder {
    pub fn new(thresholds: TurnThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> TurnThresholds {
        self.thresholds
    }

    /// Build steps for a path of adjacent nodes.
    ///
    /// Empty input yields no steps; a single node yields one `Arrive`.
    /// Fails with [`RouteError::NotAdjacent`] if two consecutive nodes share
    /// no edge.
    ///
    /// A zero-length edge (two nodes at one position) has no bearing of its
    /// own: it continues straight, and the next turn is measured from the
    /// last edge that had one.
    pub fn build(&self, graph: &SpatialGraph, path: &[NodeIdx]) -> RouteResult<Vec<NavigationStep>> {
        if path.is_empty() {
            return Ok(Vec::new());
        }

        let mut steps = Vec::new();
        let mut current: Option<NavigationStep> = None;
        let mut heading: Option<f64> = None;

        for (i, pair) in path.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let edge = graph
                .edge_between(a, b)
                .ok_or_else(|| RouteError::NotAdjacent(graph.node_id(a), graph.node_id(b)))?;
            let street = graph.street_name(edge);
            let length = graph.edge_length_m(edge);

            let heading_out = (length > 0.0).then(|| graph.position(a).bearing_deg(graph.position(b)));

            let turn = match (i, heading, heading_out) {
                (0, _, _) => Direction::Start,
                (_, Some(h_in), Some(h_out)) => self.thresholds.classify(h_out - h_in),
                _ => Direction::Straight,
            };
            heading = heading_out.or(heading);

            match current.as_mut() {
                Some(step) if turn == Direction::Straight && step.street.as_deref() == street => {
                    step.distance_m += length;
                }
                _ => {
                    steps.extend(current.take());
                    current = Some(NavigationStep {
                        direction:  turn,
                        distance_m: length,
                        street:     street.map(str::to_owned),
                    });
                }
            }
        }

        steps.extend(current);
        steps.push(NavigationStep::arrive());
        Ok(steps)
    }
}

/// Render steps as numbered lines: `"1. Start on ... miles."`.
pub fn numbered_lines(steps: &[NavigationStep]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect()
}
