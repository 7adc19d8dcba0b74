//! OSM PBF source — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use wf_graph::{load_graph, osm::PbfSource};
//!
//! let graph = load_graph(PbfSource::new(Path::new("berkeley.osm.pbf")))?;
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways whose class is in [`is_routable`] become edges.
//! Every way is treated as two-way.  Nodes are kept if a routable way
//! references them or if they carry a `name` tag; the latter feed place-name
//! search even when no road touches them.
//!
//! # Memory note
//!
//! The reader buffers every OSM node position in a `HashMap<i64, _>` for the
//! first pass because ways reference nodes by id.  The map is freed before
//! the graph is built.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use osmpbf::{Element, ElementReader};
use tracing::debug;

use wf_core::{GeoPoint, NodeId};

use crate::{GraphError, GraphResult, GraphSource, SpatialGraphBuilder};

/// Reads an `.osm.pbf` extract.
pub struct PbfSource {
    path: PathBuf,
}

impl PbfSource {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }
}

struct OsmNode {
    pos:  GeoPoint,
    name: Option<String>,
}

struct OsmWay {
    refs: Vec<i64>,
    name: Option<String>,
}

impl GraphSource for PbfSource {
    fn populate(self, builder: &mut SpatialGraphBuilder) -> GraphResult<()> {
        // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
        let reader = ElementReader::from_path(&self.path)
            .map_err(|e| GraphError::Osm(e.to_string()))?;

        let mut all_nodes: HashMap<i64, OsmNode> = HashMap::new();
        let mut road_ways: Vec<OsmWay> = Vec::new();

        reader
            .for_each(|elem| match elem {
                Element::Node(n) => {
                    let name = n.tags().find(|(k, _)| *k == "name").map(|(_, v)| v.to_owned());
                    all_nodes.insert(n.id(), OsmNode { pos: GeoPoint::new(n.lat(), n.lon()), name });
                }
                Element::DenseNode(n) => {
                    let name = n.tags().find(|(k, _)| *k == "name").map(|(_, v)| v.to_owned());
                    all_nodes.insert(n.id(), OsmNode { pos: GeoPoint::new(n.lat(), n.lon()), name });
                }
                Element::Way(w) => {
                    // Collect tags eagerly so &str lifetimes don't escape the closure.
                    let tags: Vec<(&str, &str)> = w.tags().collect();
                    let routable = tags
                        .iter()
                        .any(|(k, v)| *k == "highway" && is_routable(v));
                    if routable {
                        let name = tags
                            .iter()
                            .find(|(k, _)| *k == "name")
                            .map(|(_, v)| (*v).to_owned());
                        road_ways.push(OsmWay { refs: w.refs().collect(), name });
                    }
                }
                _ => {}
            })
            .map_err(|e| GraphError::Osm(e.to_string()))?;

        // ── Phase 2: pick nodes, in id order so builds are reproducible ──────
        let mut keep: BTreeSet<i64> = road_ways
            .iter()
            .flat_map(|w| w.refs.iter().copied())
            .collect();
        keep.extend(
            all_nodes
                .iter()
                .filter(|(_, n)| n.name.is_some())
                .map(|(id, _)| *id),
        );

        for osm_id in &keep {
            if let Some(node) = all_nodes.get(osm_id) {
                builder.add_node(NodeId(*osm_id as u64), node.pos, node.name.as_deref())?;
            }
        }
        drop(all_nodes);

        // ── Phase 3: ways, skipping refs to nodes missing from the extract ──
        let mut skipped = 0usize;
        for way in &road_ways {
            let refs: Vec<NodeId> = way
                .refs
                .iter()
                .map(|&r| NodeId(r as u64))
                .filter(|id| builder.contains(*id))
                .collect();
            skipped += way.refs.len() - refs.len();
            builder.add_way(way.name.as_deref(), &refs)?;
        }
        debug!(ways = road_ways.len(), skipped_refs = skipped, "OSM ways applied");

        Ok(())
    }
}

/// `true` for `highway` values that carry routable traffic.
pub fn is_routable(highway: &str) -> bool {
    matches!(
        highway,
        "motorway"
            | "trunk"
            | "primary"
            | "secondary"
            | "tertiary"
            | "unclassified"
            | "residential"
            | "living_street"
            | "motorway_link"
            | "trunk_link"
            | "primary_link"
            | "secondary_link"
            | "tertiary_link"
    )
}
