//! Small hand-built graphs shared by tests and demos.
//!
//! The tiny graph is a tree over seven road nodes in north Berkeley:
//!
//! ```text
//!              46 ──── Hearst ──── 66
//!             /                    |  \
//!        Euclid               Shattuck  (55 via Bancroft from 63)
//!           /                      |
//!   11 ── 22                       63 ── Bancroft ── 55
//!  Cedar                           |
//!                                  41
//! ```
//!
//! plus four isolated, named points of interest that only search can see.

use std::io::Cursor;

use crate::{CsvSource, GraphResult, SpatialGraph, load_graph};

pub const TINY_NODES_CSV: &str = "\
id,lat,lon,name
11,37.83,-122.28,
22,37.84,-122.27,
41,37.83,-122.25,
46,37.88,-122.25,
55,37.87,-122.24,
63,37.85,-122.24,
66,37.88,-122.23,
90,37.8756,-122.2605,Top Dog
91,37.8801,-122.2412,Top of the Hill Lookout
92,37.8567,-122.2670,Berkeley Bowl
93,37.8681,-122.2578,top dog!
";

pub const TINY_WAYS_CSV: &str = "\
id,name,refs
1,Cedar Street,11 22
2,Euclid Avenue,22 46
3,Hearst Avenue,46 66
4,Shattuck Avenue,41 63 66
5,Bancroft Way,63 55
";

/// Load the tiny graph from the embedded CSV tables.
pub fn tiny_graph() -> GraphResult<SpatialGraph> {
    load_graph(CsvSource::new(
        Cursor::new(TINY_NODES_CSV),
        Cursor::new(TINY_WAYS_CSV),
    ))
}
