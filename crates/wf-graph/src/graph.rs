//! Road network representation and builder.
//!
//! # Data layout
//!
//! Nodes and edges live in flat arrays addressed by [`NodeIdx`] and
//! [`EdgeIdx`].  Every undirected edge is stored once; adjacency uses
//! **Compressed Sparse Row (CSR)** format holding both directions.  Given a
//! `NodeIdx n`, its incident half-edges occupy the slice:
//!
//! ```text
//! adj_node[ adj_start[n] .. adj_start[n+1] ]
//! adj_edge[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Half-edges are laid out in edge-insertion order, so `neighbors()` is
//! deterministic and matches the order roads were added to the builder.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the *connected* nodes answers nearest-node
//! queries.  Isolated nodes (typically named points of interest) stay in the
//! graph for search but are never snapped to, since a route could not leave
//! them.

use rustc_hash::FxHashMap;
use tracing::info;

use wf_core::{EdgeIdx, GeoPoint, NodeId, NodeIdx, StreetId};

use crate::names::{Location, NameIndex};
use crate::snap::SnapIndex;
use crate::{GraphError, GraphResult};

/// One half-edge seen from a node: the node on the other side, the edge that
/// leads there, and the edge's length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub node:     NodeIdx,
    pub edge:     EdgeIdx,
    pub length_m: f64,
}

// ── SpatialGraph ──────────────────────────────────────────────────────────────

/// Undirected weighted road graph with nearest-node and name lookups.
///
/// Do not construct directly; use [`SpatialGraphBuilder`] or
/// [`load_graph`](crate::load_graph).
pub struct SpatialGraph {
    // ── Node data (indexed by NodeIdx) ────────────────────────────────────
    node_id:   Vec<NodeId>,
    node_pos:  Vec<GeoPoint>,
    node_name: Vec<Option<String>>,
    id_to_idx: FxHashMap<NodeId, NodeIdx>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    adj_start: Vec<u32>,
    adj_node:  Vec<NodeIdx>,
    adj_edge:  Vec<EdgeIdx>,

    // ── Edge data (indexed by EdgeIdx) ────────────────────────────────────
    edge_a:        Vec<NodeIdx>,
    edge_b:        Vec<NodeIdx>,
    edge_length_m: Vec<f64>,
    edge_street:   Vec<StreetId>,
    streets:       Vec<String>,

    // ── Lookups ───────────────────────────────────────────────────────────
    snap:  SnapIndex,
    names: NameIndex,
}

impl SpatialGraph {
    /// Construct an empty graph.  Every snapping request against it fails
    /// with [`GraphError::NoConnectedNodes`].
    pub fn empty() -> Self {
        SpatialGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_id.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_a.len()
    }

    /// Number of nodes with at least one incident edge.
    pub fn connected_node_count(&self) -> usize {
        self.snap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_id.is_empty()
    }

    // ── Node accessors ────────────────────────────────────────────────────

    #[inline]
    pub fn node_id(&self, node: NodeIdx) -> NodeId {
        self.node_id[node.index()]
    }

    /// Arena index of the node with map id `id`, if present.
    #[inline]
    pub fn node_index(&self, id: NodeId) -> Option<NodeIdx> {
        self.id_to_idx.get(&id).copied()
    }

    #[inline]
    pub fn position(&self, node: NodeIdx) -> GeoPoint {
        self.node_pos[node.index()]
    }

    pub fn node_name(&self, node: NodeIdx) -> Option<&str> {
        self.node_name[node.index()].as_deref()
    }

    // ── Edge accessors ────────────────────────────────────────────────────

    #[inline]
    pub fn edge_endpoints(&self, edge: EdgeIdx) -> (NodeIdx, NodeIdx) {
        (self.edge_a[edge.index()], self.edge_b[edge.index()])
    }

    #[inline]
    pub fn edge_length_m(&self, edge: EdgeIdx) -> f64 {
        self.edge_length_m[edge.index()]
    }

    #[inline]
    pub fn edge_street(&self, edge: EdgeIdx) -> StreetId {
        self.edge_street[edge.index()]
    }

    /// Street name carried by `edge`, or `None` for unnamed roads.
    pub fn street_name(&self, edge: EdgeIdx) -> Option<&str> {
        let street = self.edge_street[edge.index()];
        street.is_valid().then(|| self.streets[street.index()].as_str())
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    #[inline]
    fn adj_range(&self, node: NodeIdx) -> std::ops::Range<usize> {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        start..end
    }

    /// Nodes adjacent to `node` with the connecting edge and its length.
    ///
    /// A node reachable over parallel edges appears once per edge.  Order is
    /// the order in which the edges were added to the builder.
    #[inline]
    pub fn neighbors(&self, node: NodeIdx) -> impl Iterator<Item = Neighbor> + '_ {
        self.adj_range(node).map(move |i| {
            let edge = self.adj_edge[i];
            Neighbor {
                node: self.adj_node[i],
                edge,
                length_m: self.edge_length_m[edge.index()],
            }
        })
    }

    /// Number of half-edges incident to `node`.
    #[inline]
    pub fn degree(&self, node: NodeIdx) -> usize {
        self.adj_range(node).len()
    }

    /// The shortest edge joining `a` and `b`, if they are adjacent.
    pub fn edge_between(&self, a: NodeIdx, b: NodeIdx) -> Option<EdgeIdx> {
        self.neighbors(a)
            .filter(|n| n.node == b)
            .min_by(|x, y| x.length_m.total_cmp(&y.length_m))
            .map(|n| n.edge)
    }

    /// Great-circle distance in metres between two arbitrary nodes.
    ///
    /// Edge lengths are computed with the same metric, so this never
    /// overestimates the graph distance and is safe as an A* heuristic.
    #[inline]
    pub fn distance(&self, a: NodeIdx, b: NodeIdx) -> f64 {
        self.node_pos[a.index()].distance_m(self.node_pos[b.index()])
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The connected node closest to `pos` in the locally flat projection.
    ///
    /// Equidistant candidates resolve to the lowest [`NodeId`].
    pub fn nearest_node(&self, pos: GeoPoint) -> GraphResult<NodeIdx> {
        self.snap.nearest(pos).ok_or(GraphError::NoConnectedNodes)
    }

    /// Up to `k` connected nodes nearest to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeIdx> {
        self.snap.k_nearest(pos, k)
    }

    // ── Name search ───────────────────────────────────────────────────────

    /// Distinct place names whose normalised form starts with the normalised
    /// `prefix`.  Case and punctuation are ignored.
    pub fn locations_by_prefix(&self, prefix: &str) -> Vec<String> {
        self.names.by_prefix(prefix, &self.node_name)
    }

    /// Every named node whose normalised name equals the normalised `name`.
    pub fn locations_by_name(&self, name: &str) -> Vec<Location> {
        self.names
            .exact(name)
            .iter()
            .map(|&n| Location {
                lat:  self.node_pos[n.index()].lat,
                lon:  self.node_pos[n.index()].lon,
                name: self.node_name[n.index()].clone().unwrap_or_default(),
                id:   self.node_id[n.index()],
            })
            .collect()
    }
}

// ── SpatialGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`SpatialGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use wf_core::{GeoPoint, NodeId};
/// use wf_graph::SpatialGraphBuilder;
///
/// let mut b = SpatialGraphBuilder::new();
/// b.add_node(NodeId(1), GeoPoint::new(37.870, -122.260), None).unwrap();
/// b.add_node(NodeId(2), GeoPoint::new(37.871, -122.260), Some("Oxford St & Hearst")).unwrap();
/// b.add_edge(NodeId(1), NodeId(2), Some("Oxford Street")).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct SpatialGraphBuilder {
    node_id:   Vec<NodeId>,
    node_pos:  Vec<GeoPoint>,
    node_name: Vec<Option<String>>,
    id_to_idx: FxHashMap<NodeId, NodeIdx>,

    raw_edges:    Vec<RawEdge>,
    streets:      Vec<String>,
    street_index: FxHashMap<String, StreetId>,
}

struct RawEdge {
    a:        NodeIdx,
    b:        NodeIdx,
    length_m: f64,
    street:   StreetId,
}

impl SpatialGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            node_id:      Vec::with_capacity(nodes),
            node_pos:     Vec::with_capacity(nodes),
            node_name:    Vec::with_capacity(nodes),
            id_to_idx:    FxHashMap::default(),
            raw_edges:    Vec::with_capacity(edges),
            streets:      Vec::new(),
            street_index: FxHashMap::default(),
        }
    }

    /// Add a node.  Blank names are stored as `None`.
    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint, name: Option<&str>) -> GraphResult<NodeIdx> {
        if self.id_to_idx.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let idx = NodeIdx(self.node_id.len() as u32);
        self.node_id.push(id);
        self.node_pos.push(pos);
        self.node_name.push(non_blank(name).map(str::to_owned));
        self.id_to_idx.insert(id, idx);
        Ok(idx)
    }

    /// Add an undirected edge between two existing nodes.  Its length is the
    /// great-circle distance between them.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, street: Option<&str>) -> GraphResult<EdgeIdx> {
        let ia = self.node_index(a).ok_or(GraphError::UnknownNode(a))?;
        let ib = self.node_index(b).ok_or(GraphError::UnknownNode(b))?;
        if ia == ib {
            return Err(GraphError::SelfLoop(a));
        }
        let street = self.intern_street(street);
        let length_m = self.node_pos[ia.index()].distance_m(self.node_pos[ib.index()]);

        let idx = EdgeIdx(self.raw_edges.len() as u32);
        self.raw_edges.push(RawEdge { a: ia, b: ib, length_m, street });
        Ok(idx)
    }

    /// Add one edge per consecutive pair of `refs`, all carrying `street`.
    ///
    /// Consecutive repeats of the same node are skipped.  Returns the number
    /// of edges added.
    pub fn add_way(&mut self, street: Option<&str>, refs: &[NodeId]) -> GraphResult<usize> {
        if let Some(missing) = refs.iter().find(|id| !self.contains(**id)) {
            return Err(GraphError::UnknownNode(*missing));
        }
        let mut added = 0;
        for pair in refs.windows(2) {
            if pair[0] == pair[1] {
                continue;
            }
            self.add_edge(pair[0], pair[1], street)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIdx> {
        self.id_to_idx.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_idx.contains_key(&id)
    }

    pub fn node_count(&self) -> usize { self.node_id.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn intern_street(&mut self, street: Option<&str>) -> StreetId {
        let Some(name) = non_blank(street) else {
            return StreetId::INVALID;
        };
        if let Some(&id) = self.street_index.get(name) {
            return id;
        }
        let id = StreetId(self.streets.len() as u32);
        self.streets.push(name.to_owned());
        self.street_index.insert(name.to_owned(), id);
        id
    }

    /// Consume the builder and produce a [`SpatialGraph`].
    ///
    /// Time complexity: O(N + E) for the CSR arrays + O(N log N) for the
    /// R-tree bulk load and name index.
    pub fn build(self) -> SpatialGraph {
        let node_count = self.node_id.len();
        let edge_count = self.raw_edges.len();

        // Degree count, then prefix sum into the CSR row pointer.
        let mut adj_start = vec![0u32; node_count + 1];
        for e in &self.raw_edges {
            adj_start[e.a.index() + 1] += 1;
            adj_start[e.b.index() + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[node_count] as usize, edge_count * 2);

        // Scatter half-edges in edge order so each node's slice keeps the
        // insertion order of its roads.
        let mut cursor: Vec<u32> = adj_start[..node_count].to_vec();
        let mut adj_node = vec![NodeIdx::INVALID; edge_count * 2];
        let mut adj_edge = vec![EdgeIdx::INVALID; edge_count * 2];
        for (i, e) in self.raw_edges.iter().enumerate() {
            let edge = EdgeIdx(i as u32);
            for (from, to) in [(e.a, e.b), (e.b, e.a)] {
                let slot = cursor[from.index()] as usize;
                adj_node[slot] = to;
                adj_edge[slot] = edge;
                cursor[from.index()] += 1;
            }
        }

        let connected: Vec<NodeIdx> = (0..node_count)
            .filter(|&i| adj_start[i + 1] > adj_start[i])
            .map(|i| NodeIdx(i as u32))
            .collect();
        let snap = SnapIndex::build(&connected, &self.node_pos, &self.node_id);
        let names = NameIndex::build(&self.node_name);

        info!(
            nodes = node_count,
            edges = edge_count,
            connected = connected.len(),
            streets = self.streets.len(),
            "spatial graph built"
        );

        SpatialGraph {
            node_id: self.node_id,
            node_pos: self.node_pos,
            node_name: self.node_name,
            id_to_idx: self.id_to_idx,
            adj_start,
            adj_node,
            adj_edge,
            edge_a:        self.raw_edges.iter().map(|e| e.a).collect(),
            edge_b:        self.raw_edges.iter().map(|e| e.b).collect(),
            edge_length_m: self.raw_edges.iter().map(|e| e.length_m).collect(),
            edge_street:   self.raw_edges.iter().map(|e| e.street).collect(),
            streets: self.streets,
            snap,
            names,
        }
    }
}

impl Default for SpatialGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
