//! `wf-service` — the request surface of the wayfinder engine.
//!
//! [`MapService`] bundles a loaded [`SpatialGraph`](wf_graph::SpatialGraph),
//! a [`TileSelector`](wf_tiles::TileSelector), a path finder, and a
//! directions builder, and answers the requests a map web page makes:
//!
//! | Method                     | Answers                                         |
//! |----------------------------|-------------------------------------------------|
//! | `rasterize`                | which tiles to draw and where they sit          |
//! | `route`                    | node ids of the shortest path                   |
//! | `directions`               | turn-by-turn steps for a path                   |
//! | `route_with_directions`    | both, as a serialisable [`RouteResponse`]       |
//! | `search_by_prefix`         | place names for autocomplete                    |
//! | `search_full`              | full location records for a name                |
//! | `overlay`                  | route line in raster pixel space                |
//! | `route_many`               | a batch of routes (Rayon with `parallel`)       |
//!
//! Failures inside a request never escape as errors: they become empty
//! results or a `success = false` response, logged at `warn`.  Only loading
//! the map returns [`ServiceError`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | `route_many` runs on Rayon's thread pool.            |
//! | `osm`      | `from_config` honours `osm_pbf`.                     |

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;


pub use api::{RasterRequest, RasterResponse, RouteRequest, RouteResponse, Segment};
pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use logging::init_tracing;
pub use service::MapService;
