//! Viewport → tile grid selection.

use tracing::debug;

use wf_core::BoundingBox;

use crate::{TileCoord, TileError, TilePyramid, TileResult};

/// Tiles to draw for one viewport.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSelection {
    pub depth:    u8,
    /// Row-major: `grid[r][c]`, north row first, west column first.
    pub grid:     Vec<Vec<TileCoord>>,
    /// Union of the selected tiles.
    pub covering: BoundingBox,
}

impl TileSelection {
    /// Image file names, in the same layout as [`grid`](Self::grid).
    pub fn keys(&self) -> Vec<Vec<String>> {
        self.grid
            .iter()
            .map(|row| row.iter().map(TileCoord::key).collect())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.grid.iter().flatten().copied()
    }
}

/// Picks the depth and tile range for a requested box and viewport.
#[derive(Debug, Clone, Default)]
pub struct TileSelector {
    pyramid: TilePyramid,
}

impl TileSelector {
    /// Fails with [`TileError::InvalidPyramid`] unless `pyramid` validates.
    pub fn new(pyramid: TilePyramid) -> TileResult<Self> {
        pyramid.validate()?;
        Ok(Self { pyramid })
    }

    pub fn pyramid(&self) -> &TilePyramid {
        &self.pyramid
    }

    /// Select tiles for `query` shown at `width × height` pixels.
    ///
    /// The depth is the shallowest whose longitude resolution is at least as
    /// fine as the viewport's.  Parts of `query` outside the root are
    /// dropped, so `covering` only spans the intersection with the root.
    pub fn select(&self, query: &BoundingBox, width: f64, height: f64) -> TileResult<TileSelection> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TileError::InvalidViewport { width, height });
        }
        query.validate().map_err(|e| TileError::InvalidBox(e.to_string()))?;
        if !self.pyramid.root.intersects(query) {
            return Err(TileError::OutOfBounds(*query));
        }

        let p = &self.pyramid;
        let depth = p.depth_for(query.lon_span() / width);

        let first_col = p.col_of(depth, query.ul_lon);
        let last_col = p.col_of(depth, query.lr_lon);
        let first_row = p.row_of(depth, query.ul_lat);
        let last_row = p.row_of(depth, query.lr_lat);

        let grid: Vec<Vec<TileCoord>> = (first_row..=last_row)
            .map(|row| {
                (first_col..=last_col)
                    .map(|col| TileCoord { depth, row, col })
                    .collect()
            })
            .collect();

        let ul = p.tile_bounds(TileCoord { depth, row: first_row, col: first_col });
        let lr = p.tile_bounds(TileCoord { depth, row: last_row, col: last_col });
        let covering = BoundingBox {
            ul_lon: ul.ul_lon,
            ul_lat: ul.ul_lat,
            lr_lon: lr.lr_lon,
            lr_lat: lr.lr_lat,
        };

        debug!(
            depth,
            rows = grid.len(),
            cols = last_col - first_col + 1,
            "tiles selected"
        );
        Ok(TileSelection { depth, grid, covering })
    }
}
