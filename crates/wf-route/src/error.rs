//! Routing error type.

use thiserror::Error;

use wf_core::NodeId;
use wf_graph::GraphError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("nodes {0} and {1} are consecutive in the path but not adjacent")]
    NotAdjacent(NodeId, NodeId),
}

pub type RouteResult<T> = Result<T, RouteError>;
