//! Sample requests against the tiny north-Berkeley fixture.

use wf_core::GeoPoint;
use wf_service::{RasterRequest, RouteRequest};

/// `(label, from, to)` for each demo trip.  Every endpoint sits on or next to
/// a road node of `wf_graph::fixtures::tiny_graph`.
pub const TRIPS: [(&str, GeoPoint, GeoPoint); 4] = [
    ("Cedar & Euclid → Hearst & Shattuck", GeoPoint { lat: 37.84, lon: -122.27 }, GeoPoint { lat: 37.88, lon: -122.23 }),
    ("Cedar & Euclid → Cedar west end",    GeoPoint { lat: 37.84, lon: -122.27 }, GeoPoint { lat: 37.83, lon: -122.28 }),
    ("South Shattuck → Hearst & Euclid",   GeoPoint { lat: 37.83, lon: -122.25 }, GeoPoint { lat: 37.88, lon: -122.25 }),
    ("Hearst & Shattuck → Bancroft east",  GeoPoint { lat: 37.88, lon: -122.23 }, GeoPoint { lat: 37.87, lon: -122.24 }),
];

pub fn trip_requests() -> Vec<RouteRequest> {
    TRIPS.iter().map(|(_, from, to)| RouteRequest::new(*from, *to)).collect()
}

/// A 892 × 875 px browser window over the Hearst corridor.
pub fn campus_viewport() -> RasterRequest {
    RasterRequest {
        ul_lon: -122.241632,
        ul_lat: 37.87655,
        lr_lon: -122.24053,
        lr_lat: 37.87548,
        width:  892.0,
        height: 875.0,
    }
}

/// The whole map at one tile's width.
pub fn overview_viewport() -> RasterRequest {
    RasterRequest {
        ul_lon: -122.2998046875,
        ul_lat: 37.892195547244356,
        lr_lon: -122.2119140625,
        lr_lat: 37.82280243352756,
        width:  256.0,
        height: 256.0,
    }
}
