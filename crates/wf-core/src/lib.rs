//! `wf-core` — foundational types for the `wayfinder` routing engine.
//!
//! This crate is a dependency of every other `wf-*` crate.  It has no `wf-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `NodeId` (map-data id), `NodeIdx`, `EdgeIdx`, `StreetId`  |
//! | [`geo`]   | `GeoPoint`, haversine distance, initial bearing           |
//! | [`bbox`]  | `BoundingBox` (upper-left / lower-right corners)          |
//! | [`error`] | `WfError`, `WfResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod bbox;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bbox::BoundingBox;
pub use error::{WfError, WfResult};
pub use geo::GeoPoint;
pub use ids::{EdgeIdx, NodeId, NodeIdx, StreetId};
