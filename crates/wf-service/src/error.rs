use thiserror::Error;

use wf_graph::GraphError;
use wf_tiles::TileError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service configuration error: {0}")]
    Config(String),

    #[error("graph load failed: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Tiles(#[from] TileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
