//! Graph-subsystem error type.

use thiserror::Error;

use wf_core::NodeId;

/// Errors produced by `wf-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} was added twice")]
    DuplicateNode(NodeId),

    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("edge from node {0} to itself")]
    SelfLoop(NodeId),

    #[error("graph has no connected nodes to snap to")]
    NoConnectedNodes,

    #[error("map data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
