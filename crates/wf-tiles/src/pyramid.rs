//! Tile pyramid geometry.
//!
//! Tiles are laid out in plain longitude/latitude degrees (no Mercator
//! projection): at depth `d` the root box is cut into a `2^d × 2^d` grid of
//! equal-degree cells.  Row 0 is the northern edge, column 0 the western.

use std::fmt;

use wf_core::{BoundingBox, GeoPoint};

use crate::{TileError, TileResult};

/// Upper-left latitude of the default (Berkeley) root region.
pub const ROOT_UL_LAT: f64 = 37.892195547244356;
pub const ROOT_UL_LON: f64 = -122.2998046875;
pub const ROOT_LR_LAT: f64 = 37.82280243352756;
pub const ROOT_LR_LON: f64 = -122.2119140625;

pub const TILE_SIZE_PX: u32 = 256;
pub const MAX_DEPTH: u8 = 7;

/// Deepest level a pyramid may be configured with; keeps `2^depth` tile
/// indices inside `u32`.
pub const DEPTH_LIMIT: u8 = 30;

// ── TileCoord ─────────────────────────────────────────────────────────────────

/// One tile of the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub depth: u8,
    /// North-south index, 0 at the root's northern edge.
    pub row:   u32,
    /// West-east index, 0 at the root's western edge.
    pub col:   u32,
}

impl TileCoord {
    pub fn new(depth: u8, row: u32, col: u32) -> Self {
        Self { depth, row, col }
    }

    /// Image file name, e.g. `d7_x84_y28.png`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}.png", self.depth, self.col, self.row)
    }
}

// ── TilePyramid ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TilePyramid {
    pub root:         BoundingBox,
    pub tile_size_px: u32,
    pub max_depth:    u8,
}

impl Default for TilePyramid {
    fn default() -> Self {
        Self {
            root: BoundingBox {
                ul_lon: ROOT_UL_LON,
                ul_lat: ROOT_UL_LAT,
                lr_lon: ROOT_LR_LON,
                lr_lat: ROOT_LR_LAT,
            },
            tile_size_px: TILE_SIZE_PX,
            max_depth:    MAX_DEPTH,
        }
    }
}

impl TilePyramid {
    /// Check that the root has positive area, tiles have a size, and
    /// `max_depth` is at most [`DEPTH_LIMIT`].
    pub fn validate(&self) -> TileResult<()> {
        self.root
            .validate()
            .map_err(|e| TileError::InvalidPyramid(format!("root: {e}")))?;
        if !(self.root.lon_span() > 0.0 && self.root.lat_span() > 0.0) {
            return Err(TileError::InvalidPyramid(format!("root {} has zero area", self.root)));
        }
        if self.tile_size_px == 0 {
            return Err(TileError::InvalidPyramid("tile_size_px must be positive".into()));
        }
        if self.max_depth > DEPTH_LIMIT {
            return Err(TileError::InvalidPyramid(format!(
                "max_depth {} exceeds {DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Tiles along one side at `depth`.
    #[inline]
    pub fn tiles_per_side(&self, depth: u8) -> u32 {
        1u32 << depth
    }

    /// Longitude degrees spanned by one tile at `depth`.
    #[inline]
    pub fn tile_lon_span(&self, depth: u8) -> f64 {
        self.root.lon_span() / self.tiles_per_side(depth) as f64
    }

    /// Latitude degrees spanned by one tile at `depth`.
    #[inline]
    pub fn tile_lat_span(&self, depth: u8) -> f64 {
        self.root.lat_span() / self.tiles_per_side(depth) as f64
    }

    /// Longitude degrees per pixel at `depth`.
    pub fn lon_dpp(&self, depth: u8) -> f64 {
        self.tile_lon_span(depth) / self.tile_size_px as f64
    }

    /// Shallowest depth whose resolution is at least `lon_dpp`, or
    /// `max_depth` if none is fine enough.
    pub fn depth_for(&self, lon_dpp: f64) -> u8 {
        (0..=self.max_depth)
            .find(|&d| self.lon_dpp(d) <= lon_dpp)
            .unwrap_or(self.max_depth)
    }

    /// Geographic extent of one tile.
    pub fn tile_bounds(&self, tile: TileCoord) -> BoundingBox {
        let lon = self.tile_lon_span(tile.depth);
        let lat = self.tile_lat_span(tile.depth);
        BoundingBox {
            ul_lon: self.root.ul_lon + tile.col as f64 * lon,
            ul_lat: self.root.ul_lat - tile.row as f64 * lat,
            lr_lon: self.root.ul_lon + (tile.col + 1) as f64 * lon,
            lr_lat: self.root.ul_lat - (tile.row + 1) as f64 * lat,
        }
    }

    /// Tile at `depth` containing `point`, or `None` outside the root.
    pub fn tile_at(&self, depth: u8, point: GeoPoint) -> Option<TileCoord> {
        if !self.root.contains_point(point) {
            return None;
        }
        Some(TileCoord {
            depth,
            row: self.row_of(depth, point.lat),
            col: self.col_of(depth, point.lon),
        })
    }

    /// Column index of `lon`, clamped into the grid.
    pub(crate) fn col_of(&self, depth: u8, lon: f64) -> u32 {
        let raw = ((lon - self.root.ul_lon) / self.tile_lon_span(depth)).floor();
        self.clamp_index(depth, raw)
    }

    /// Row index of `lat`, clamped into the grid.
    pub(crate) fn row_of(&self, depth: u8, lat: f64) -> u32 {
        let raw = ((self.root.ul_lat - lat) / self.tile_lat_span(depth)).floor();
        self.clamp_index(depth, raw)
    }

    fn clamp_index(&self, depth: u8, raw: f64) -> u32 {
        let last = (self.tiles_per_side(depth) - 1) as f64;
        raw.clamp(0.0, last) as u32
    }
}
