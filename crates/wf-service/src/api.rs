//! Request and response records exchanged with the (external) web layer.

use serde::{Deserialize, Serialize};

use wf_core::{BoundingBox, GeoPoint};
use wf_tiles::TileSelection;

// ── Raster ────────────────────────────────────────────────────────────────────

/// Map area the browser wants drawn, and the size it will be drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterRequest {
    pub ul_lon: f64,
    pub ul_lat: f64,
    pub lr_lon: f64,
    pub lr_lat: f64,
    /// Viewport width in pixels.
    pub width:  f64,
    /// Viewport height in pixels.
    pub height: f64,
}

impl RasterRequest {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            ul_lon: self.ul_lon,
            ul_lat: self.ul_lat,
            lr_lon: self.lr_lon,
            lr_lat: self.lr_lat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterResponse {
    pub success:       bool,
    pub depth:         u8,
    /// Tile image names, row-major.
    pub render_grid:   Vec<Vec<String>>,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
}

impl RasterResponse {
    /// Response for a request that could not be served.
    pub fn failed() -> Self {
        Self {
            success:       false,
            depth:         0,
            render_grid:   Vec::new(),
            raster_ul_lon: 0.0,
            raster_ul_lat: 0.0,
            raster_lr_lon: 0.0,
            raster_lr_lat: 0.0,
        }
    }

    pub fn raster_box(&self) -> BoundingBox {
        BoundingBox {
            ul_lon: self.raster_ul_lon,
            ul_lat: self.raster_ul_lat,
            lr_lon: self.raster_lr_lon,
            lr_lat: self.raster_lr_lat,
        }
    }
}

impl From<TileSelection> for RasterResponse {
    fn from(sel: TileSelection) -> Self {
        Self {
            success:       true,
            depth:         sel.depth,
            render_grid:   sel.keys(),
            raster_ul_lon: sel.covering.ul_lon,
            raster_ul_lat: sel.covering.ul_lat,
            raster_lr_lon: sel.covering.lr_lon,
            raster_lr_lat: sel.covering.lr_lat,
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat:   f64,
    pub end_lon:   f64,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start_lat: start.lat,
            start_lon: start.lon,
            end_lat:   end.lat,
            end_lon:   end.lon,
        }
    }

    pub fn start(&self) -> GeoPoint {
        GeoPoint::new(self.start_lat, self.start_lon)
    }

    pub fn end(&self) -> GeoPoint {
        GeoPoint::new(self.end_lat, self.end_lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routing_success: bool,
    /// Numbered, `<br>`-separated instructions, e.g.
    /// `"1. Start on Euclid Avenue and continue for 2.971 miles. <br>"`.
    pub directions:      String,
}

// ── Overlay ───────────────────────────────────────────────────────────────────

/// One straight piece of the route line, in raster pixel coordinates
/// (origin at the raster's upper-left corner, y growing downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}
