//! Core error type.
//!
//! Sub-crates define their own error enums; `WfError` only covers validation
//! of the core value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WfError {
    #[error("invalid bounding box: {0}")]
    InvalidBox(String),
}

/// Shorthand result type for `wf-core`.
pub type WfResult<T> = Result<T, WfError>;
