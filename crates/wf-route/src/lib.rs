//! `wf-route` — shortest paths and turn-by-turn directions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`frontier`]   | `Frontier`, an indexed min-heap with decrease-key       |
//! | [`finder`]     | `PathFinder` trait, `AStar`, `Dijkstra`, `Path`, `route` |
//! | [`directions`] | `DirectionsBuilder`, `NavigationStep`, `Direction`      |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                          |
//!
//! # Outcomes
//!
//! "No route" is not an error.  Endpoints in disconnected components yield
//! an empty [`Path`]; only an empty graph (nothing to snap to) or malformed
//! node sequences surface as [`RouteError`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on steps and thresholds.   |

pub mod directions;
pub mod error;
pub mod finder;
pub mod frontier;

#[cfg(test)]
mod tests;

pub use directions::{Direction, DirectionsBuilder, NavigationStep, TurnThresholds, numbered_lines};
pub use error::{RouteError, RouteResult};
pub use finder::{AStar, Dijkstra, Path, PathFinder, route};
pub use frontier::Frontier;
