//! `wf-graph` — road network, nearest-node snapping, and place-name search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`graph`]      | `SpatialGraph` (CSR arena), `SpatialGraphBuilder`, `Neighbor` |
//! | [`names`]      | `Location`, name normalisation                                |
//! | [`source`]     | `GraphSource` trait, `load_graph`                             |
//! | [`csv_source`] | `CsvSource` (nodes + ways CSV tables)                         |
//! | [`osm`]        | `PbfSource` (feature = `"osm"` only)                          |
//! | [`fixtures`]   | `tiny_graph` and its CSV tables                               |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                                |
//!
//! The graph is immutable once built and is `Send + Sync`, so a single
//! instance can be shared behind an `Arc` by every request handler.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod csv_source;
pub mod error;
pub mod fixtures;
pub mod graph;
pub mod names;
pub mod source;

mod snap;

#[cfg(feature = "osm")]
pub mod osm;


pub use csv_source::CsvSource;
pub use error::{GraphError, GraphResult};
pub use graph::{Neighbor, SpatialGraph, SpatialGraphBuilder};
pub use names::{Location, clean_name};
pub use source::{GraphSource, load_graph};
