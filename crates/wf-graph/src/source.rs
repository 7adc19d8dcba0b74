//! The seam between map-data parsing and the graph.
//!
//! Parsing raw map data is not the graph's concern.  A [`GraphSource`] feeds
//! nodes, names, and ways into a [`SpatialGraphBuilder`]; [`load_graph`]
//! drives it and freezes the result.  Closures work as sources too, which is
//! how tests and demos describe small fixtures inline.

use tracing::debug;

use crate::{GraphResult, SpatialGraph, SpatialGraphBuilder};

/// Anything that can populate a graph builder.
pub trait GraphSource {
    fn populate(self, builder: &mut SpatialGraphBuilder) -> GraphResult<()>;
}

impl<F> GraphSource for F
where
    F: FnOnce(&mut SpatialGraphBuilder) -> GraphResult<()>,
{
    fn populate(self, builder: &mut SpatialGraphBuilder) -> GraphResult<()> {
        self(builder)
    }
}

/// Build an immutable [`SpatialGraph`] from `source`.
pub fn load_graph<S: GraphSource>(source: S) -> GraphResult<SpatialGraph> {
    let mut builder = SpatialGraphBuilder::new();
    source.populate(&mut builder)?;
    debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "graph source populated"
    );
    Ok(builder.build())
}
