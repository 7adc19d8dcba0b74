//! Tile selection error type.

use thiserror::Error;

use wf_core::BoundingBox;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("query box {0} lies outside the map region")]
    OutOfBounds(BoundingBox),

    #[error("invalid viewport {width} x {height} px")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid query box: {0}")]
    InvalidBox(String),

    #[error("invalid tile pyramid: {0}")]
    InvalidPyramid(String),
}

pub type TileResult<T> = Result<T, TileError>;
