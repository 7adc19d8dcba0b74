//! [`MapService`] — one loaded map and everything a request needs from it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wf_core::{NodeId, NodeIdx};
use wf_graph::{CsvSource, GraphSource, Location, SpatialGraph, load_graph};
use wf_route::{AStar, DirectionsBuilder, NavigationStep, PathFinder, numbered_lines, route};
use wf_tiles::TileSelector;

use crate::api::{RasterRequest, RasterResponse, RouteRequest, RouteResponse, Segment};
use crate::{ServiceConfig, ServiceError, ServiceResult};

/// Request-level facade over a graph, a tile selector, and a path finder.
///
/// Every method takes `&self`; the graph sits behind an `Arc` and is never
/// mutated, so one service can answer requests from many threads.  Cloning is
/// cheap when `F` is.
///
/// # Example
///
/// ```rust,ignore
/// let service = MapService::load(CsvSource::from_paths(nodes, ways)?, &ServiceConfig::default())?;
/// let path = service.route(&RouteRequest::new(start, end));
/// let text = service.route_with_directions(&RouteRequest::new(start, end)).directions;
/// ```
#[derive(Clone)]
pub struct MapService<F: PathFinder = AStar> {
    graph:      Arc<SpatialGraph>,
    selector:   TileSelector,
    finder:     F,
    directions: DirectionsBuilder,
}

impl MapService<AStar> {
    /// Wrap an already built graph.  Fails if `config.pyramid` is invalid.
    pub fn new(graph: impl Into<Arc<SpatialGraph>>, config: &ServiceConfig) -> ServiceResult<Self> {
        Self::with_finder(graph, config, AStar)
    }

    /// Build the graph from `source`, then wrap it.
    pub fn load<S: GraphSource>(source: S, config: &ServiceConfig) -> ServiceResult<Self> {
        let graph = load_graph(source)?;
        Self::new(graph, config)
    }

    /// Build the graph from the files named in `config`.
    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        config.validate()?;

        if let Some(pbf) = &config.osm_pbf {
            #[cfg(feature = "osm")]
            {
                return Self::load(wf_graph::osm::PbfSource::new(pbf), config);
            }
            #[cfg(not(feature = "osm"))]
            {
                return Err(ServiceError::Config(format!(
                    "osm_pbf {} given but the `osm` feature is disabled",
                    pbf.display()
                )));
            }
        }

        match (&config.nodes_csv, &config.ways_csv) {
            (Some(nodes), Some(ways)) => Self::load(CsvSource::from_paths(nodes, ways)?, config),
            _ => Err(ServiceError::Config("no graph source configured".into())),
        }
    }
}

impl<F: PathFinder> MapService<F> {
    pub fn with_finder(
        graph: impl Into<Arc<SpatialGraph>>,
        config: &ServiceConfig,
        finder: F,
    ) -> ServiceResult<Self> {
        let selector = TileSelector::new(config.pyramid)?;
        let graph = graph.into();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            max_depth = config.pyramid.max_depth,
            "map service ready"
        );
        Ok(Self {
            graph,
            selector,
            finder,
            directions: DirectionsBuilder::new(config.turn_thresholds),
        })
    }

    pub fn graph(&self) -> &Arc<SpatialGraph> {
        &self.graph
    }

    pub fn selector(&self) -> &TileSelector {
        &self.selector
    }

    // ── Raster ────────────────────────────────────────────────────────────

    /// Tiles and covering box for a viewport; `success = false` on any
    /// invalid or out-of-region request.
    pub fn rasterize(&self, req: &RasterRequest) -> RasterResponse {
        match self.selector.select(&req.bbox(), req.width, req.height) {
            Ok(sel) => sel.into(),
            Err(e) => {
                warn!(error = %e, "raster request rejected");
                RasterResponse::failed()
            }
        }
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Node ids of the shortest path between the snapped endpoints.  Empty
    /// when no path exists or the graph has nothing to snap to.
    pub fn route(&self, req: &RouteRequest) -> Vec<NodeId> {
        match route(&self.graph, &self.finder, req.start(), req.end()) {
            Ok(path) => {
                if path.is_empty() {
                    debug!(start = %req.start(), end = %req.end(), "no route between endpoints");
                }
                path.node_ids(&self.graph)
            }
            Err(e) => {
                warn!(error = %e, "route request degraded to empty");
                Vec::new()
            }
        }
    }

    /// Turn-by-turn steps for a path previously returned by [`route`](Self::route).
    ///
    /// Unknown ids or non-adjacent neighbours yield no steps.
    pub fn directions(&self, path: &[NodeId]) -> Vec<NavigationStep> {
        let Some(nodes) = self.resolve(path) else {
            return Vec::new();
        };
        match self.directions.build(&self.graph, &nodes) {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, "directions request degraded to empty");
                Vec::new()
            }
        }
    }

    /// Route and render the directions as numbered `<br>`-separated text.
    pub fn route_with_directions(&self, req: &RouteRequest) -> RouteResponse {
        let path = self.route(req);
        let text: String = numbered_lines(&self.directions(&path))
            .into_iter()
            .map(|line| format!("{line} <br>"))
            .collect();
        RouteResponse { routing_success: !path.is_empty(), directions: text }
    }

    /// Answer a batch of routing requests.
    ///
    /// With the `parallel` feature the batch runs on Rayon's thread pool;
    /// results keep the request order either way.
    pub fn route_many(&self, reqs: &[RouteRequest]) -> Vec<Vec<NodeId>> {
        #[cfg(not(feature = "parallel"))]
        {
            reqs.iter().map(|r| self.route(r)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            reqs.par_iter().map(|r| self.route(r)).collect()
        }
    }

    // ── Search ────────────────────────────────────────────────────────────

    pub fn search_by_prefix(&self, text: &str) -> Vec<String> {
        self.graph.locations_by_prefix(text)
    }

    pub fn search_full(&self, text: &str) -> Vec<Location> {
        self.graph.locations_by_name(text)
    }

    // ── Overlay ───────────────────────────────────────────────────────────

    /// Route polyline in the pixel space of a `width_px × height_px` image
    /// of `raster`.  Ids missing from the graph are skipped.
    pub fn overlay(&self, path: &[NodeId], raster: &RasterResponse, width_px: u32, height_px: u32) -> Vec<Segment> {
        if !raster.success || path.len() < 2 || width_px == 0 || height_px == 0 {
            return Vec::new();
        }
        let bbox = raster.raster_box();
        let x_scale = width_px as f64 / bbox.lon_span();
        let y_scale = height_px as f64 / bbox.lat_span();
        if !(x_scale.is_finite() && y_scale.is_finite()) {
            return Vec::new();
        }

        let pixels: Vec<(i32, i32)> = path
            .iter()
            .filter_map(|&id| self.graph.node_index(id))
            .map(|n| {
                let p = self.graph.position(n);
                (
                    ((p.lon - bbox.ul_lon) * x_scale) as i32,
                    ((bbox.ul_lat - p.lat) * y_scale) as i32,
                )
            })
            .collect();

        pixels
            .windows(2)
            .map(|w| Segment { x0: w[0].0, y0: w[0].1, x1: w[1].0, y1: w[1].1 })
            .collect()
    }

    fn resolve(&self, path: &[NodeId]) -> Option<Vec<NodeIdx>> {
        let mut nodes = Vec::with_capacity(path.len());
        for &id in path {
            match self.graph.node_index(id) {
                Some(n) => nodes.push(n),
                None => {
                    warn!(node = %id, "directions requested for unknown node");
                    return None;
                }
            }
        }
        Some(nodes)
    }
}
