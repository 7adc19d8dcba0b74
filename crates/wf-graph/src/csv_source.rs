//! CSV graph source.
//!
//! # CSV format
//!
//! Two files.  Nodes, one row per node (`name` may be empty):
//!
//! ```csv
//! id,lat,lon,name
//! 22,37.84,-122.27,
//! 46,37.88,-122.25,Hearst & Euclid
//! ```
//!
//! Ways, one row per road; `refs` is a space-separated list of node ids in
//! travel order and each consecutive pair becomes an undirected edge:
//!
//! ```csv
//! id,name,refs
//! 100,Euclid Avenue,22 46 66
//! 101,,66 63
//! ```
//!
//! Ways are applied after all nodes, so row order between files does not
//! matter.  A way that references an unknown node id fails the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wf_core::{GeoPoint, NodeId};

use crate::{GraphError, GraphResult, GraphSource, SpatialGraphBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:   u64,
    lat:  f64,
    lon:  f64,
    name: Option<String>,
}

#[derive(Deserialize)]
struct WayRecord {
    id:   u64,
    name: Option<String>,
    refs: String,
}

// ── CsvSource ─────────────────────────────────────────────────────────────────

/// Reads a nodes table and a ways table from any `Read` sources.
pub struct CsvSource<N: Read, W: Read> {
    nodes: N,
    ways:  W,
}

impl<N: Read, W: Read> CsvSource<N, W> {
    /// Useful for testing (pass `std::io::Cursor`s) or in-memory fixtures.
    pub fn new(nodes: N, ways: W) -> Self {
        Self { nodes, ways }
    }
}

impl CsvSource<File, File> {
    pub fn from_paths(nodes: &Path, ways: &Path) -> GraphResult<Self> {
        Ok(Self::new(File::open(nodes)?, File::open(ways)?))
    }
}

impl<N: Read, W: Read> GraphSource for CsvSource<N, W> {
    fn populate(self, builder: &mut SpatialGraphBuilder) -> GraphResult<()> {
        let mut nodes = csv::Reader::from_reader(self.nodes);
        for row in nodes.deserialize::<NodeRecord>() {
            let row = row.map_err(|e| GraphError::Parse(format!("nodes: {e}")))?;
            builder.add_node(NodeId(row.id), GeoPoint::new(row.lat, row.lon), row.name.as_deref())?;
        }

        let mut ways = csv::Reader::from_reader(self.ways);
        for row in ways.deserialize::<WayRecord>() {
            let row = row.map_err(|e| GraphError::Parse(format!("ways: {e}")))?;
            let refs = parse_refs(row.id, &row.refs)?;
            builder.add_way(row.name.as_deref(), &refs)?;
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_refs(way: u64, refs: &str) -> GraphResult<Vec<NodeId>> {
    refs.split_whitespace()
        .map(|r| {
            r.parse::<u64>().map(NodeId).map_err(|_| {
                GraphError::Parse(format!("way {way}: invalid node ref {r:?}"))
            })
        })
        .collect()
}
