//! Path finding trait plus the A* and Dijkstra implementations.
//!
//! # Pluggability
//!
//! `wf-service` calls routing through the [`PathFinder`] trait, so callers
//! can swap in other engines (contraction hierarchies, bidirectional search)
//! without touching the service layer.  [`AStar`] is the default;
//! [`Dijkstra`] runs the same search with a zero heuristic and is kept as the
//! reference implementation for tests.
//!
//! # Cost units
//!
//! All costs are great-circle **metres**, the same metric the graph stores
//! as edge length.  The A* heuristic is therefore admissible and consistent.

use tracing::debug;

use wf_core::{GeoPoint, NodeId, NodeIdx};
use wf_graph::SpatialGraph;

use crate::frontier::Frontier;
use crate::RouteResult;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Result of a path query: node indices from source to target, inclusive.
///
/// An empty path means the target is unreachable from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    nodes:  Vec<NodeIdx>,
    cost_m: f64,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    /// Total length in metres.  Zero for empty and single-node paths.
    pub fn cost_m(&self) -> f64 {
        self.cost_m
    }

    /// External identifiers of the path's nodes, in order.
    pub fn node_ids(&self, graph: &SpatialGraph) -> Vec<NodeId> {
        self.nodes.iter().map(|&n| graph.node_id(n)).collect()
    }

    pub fn into_nodes(self) -> Vec<NodeIdx> {
        self.nodes
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve concurrent
/// requests from Rayon workers.
pub trait PathFinder: Send + Sync {
    /// Shortest path from `from` to `to`.
    ///
    /// Returns an empty [`Path`] when no path exists and a single-node path
    /// when `from == to`.
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeIdx, to: NodeIdx) -> Path;
}

/// A* with the great-circle distance to the target as heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PathFinder for AStar {
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeIdx, to: NodeIdx) -> Path {
        search(graph, from, to, |n| graph.distance(n, to))
    }
}

/// Uniform-cost search; A* with a zero heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl PathFinder for Dijkstra {
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeIdx, to: NodeIdx) -> Path {
        search(graph, from, to, |_| 0.0)
    }
}

/// Snap `start` and `end` to their nearest connected nodes, then search.
///
/// Fails only when the graph has no connected nodes to snap to.
pub fn route<F>(graph: &SpatialGraph, finder: &F, start: GeoPoint, end: GeoPoint) -> RouteResult<Path>
where
    F: PathFinder + ?Sized,
{
    let from = graph.nearest_node(start)?;
    let to = graph.nearest_node(end)?;
    Ok(finder.shortest_path(graph, from, to))
}

// ── Search internals ──────────────────────────────────────────────────────────

fn search<H>(graph: &SpatialGraph, from: NodeIdx, to: NodeIdx, heuristic: H) -> Path
where
    H: Fn(NodeIdx) -> f64,
{
    if from == to {
        return Path { nodes: vec![from], cost_m: 0.0 };
    }

    let n = graph.node_count();
    // best[v] = lowest known cost (m) from `from` to v.
    let mut best   = vec![f64::INFINITY; n];
    // parent[v] = predecessor on the best known path; INVALID if unreached.
    let mut parent = vec![NodeIdx::INVALID; n];
    let mut frontier = Frontier::new(n);

    best[from.index()] = 0.0;
    frontier.push(from, heuristic(from));

    let mut expanded = 0usize;
    while let Some((node, _)) = frontier.pop_min() {
        if node == to {
            debug!(expanded, cost_m = best[to.index()], "path found");
            return reconstruct(&parent, to, best[to.index()]);
        }
        expanded += 1;

        let g = best[node.index()];
        for nb in graph.neighbors(node) {
            let candidate = g + nb.length_m;
            if candidate < best[nb.node.index()] {
                best[nb.node.index()] = candidate;
                parent[nb.node.index()] = node;
                // Re-pushing a settled node reopens it.
                frontier.push(nb.node, candidate + heuristic(nb.node));
            }
        }
    }

    debug!(expanded, "target unreachable");
    Path::empty()
}

fn reconstruct(parent: &[NodeIdx], to: NodeIdx, cost_m: f64) -> Path {
    let mut nodes = vec![to];
    let mut cur = to;
    while parent[cur.index()].is_valid() {
        cur = parent[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Path { nodes, cost_m }
}
