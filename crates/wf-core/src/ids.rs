//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two families of ids exist:
//!
//! - [`NodeId`] is the stable 64-bit identifier carried by the map data.  It
//!   is what callers see in routes and search results.
//! - Arena indices ([`NodeIdx`], [`EdgeIdx`], [`StreetId`]) address the flat
//!   `Vec`s inside the graph.  They are only meaningful for the graph that
//!   produced them.
//!
//! All ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed arena index wrapper around a primitive integer.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "none": a node not yet reached by a search, or the
            /// street of an unnamed edge.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_index! {
    /// Position of a node in the graph's node arrays.
    pub struct NodeIdx(u32);
}

typed_index! {
    /// Position of an undirected edge in the graph's edge arrays.
    pub struct EdgeIdx(u32);
}

typed_index! {
    /// Position of an interned street name.
    pub struct StreetId(u32);
}

/// Identifier of a map node as assigned by the map data (e.g. an OSM node id).
///
/// Unique within a graph and stable for its lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    #[inline]
    fn from(raw: u64) -> Self {
        NodeId(raw)
    }
}
