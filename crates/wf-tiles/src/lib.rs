//! `wf-tiles` — which map images to draw for a viewport.
//!
//! The map is pre-rendered as a quadtree of square image tiles over one fixed
//! root region.  Depth 0 is a single tile covering the root; each level
//! splits every tile into four.  A tile is named by its depth, column and row
//! (`d{depth}_x{col}_y{row}.png`).
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`pyramid`]  | `TilePyramid` (root box, tile size, depth), `TileCoord` |
//! | [`selector`] | `TileSelector`, `TileSelection`                       |
//! | [`error`]    | `TileError`, `TileResult<T>`                          |

pub mod error;
pub mod pyramid;
pub mod selector;


pub use error::{TileError, TileResult};
pub use pyramid::{TileCoord, TilePyramid};
pub use selector::{TileSelection, TileSelector};
