//! berkeley — end-to-end walk through the wayfinder engine.
//!
//! Without arguments the demo uses the embedded seven-intersection fixture.
//! Pass a JSON service config to load real CSV tables (or an OSM extract
//! with `--features osm`):
//!
//! ```text
//! cargo run -p berkeley -- config.json
//! RUST_LOG=debug cargo run -p berkeley
//! ```

mod landmarks;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use wf_graph::fixtures::tiny_graph;
use wf_service::{MapService, RouteRequest, ServiceConfig, init_tracing};

use landmarks::{TRIPS, campus_viewport, overview_viewport, trip_requests};

fn main() -> Result<()> {
    init_tracing();

    // 1. Load the map.
    let t0 = Instant::now();
    let service = match std::env::args().nth(1) {
        Some(path) => {
            let config = ServiceConfig::from_path(Path::new(&path))
                .with_context(|| format!("reading config {path}"))?;
            MapService::from_config(&config).context("loading graph")?
        }
        None => MapService::new(tiny_graph()?, &ServiceConfig::default())?,
    };
    let graph = service.graph();
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "map loaded");
    println!("=== berkeley — wayfinder demo ===");
    println!(
        "Graph: {} nodes ({} on roads), {} edges",
        graph.node_count(),
        graph.connected_node_count(),
        graph.edge_count()
    );
    println!();

    // 2. Tile selection.
    for (label, req) in [("campus", campus_viewport()), ("overview", overview_viewport())] {
        let raster = service.rasterize(&req);
        println!("Raster [{label}] depth {} success {}", raster.depth, raster.success);
        for row in &raster.render_grid {
            println!("  {}", row.join(" "));
        }
    }
    println!();

    // 3. Routes with directions.
    for (label, from, to) in TRIPS {
        let req = RouteRequest::new(from, to);
        let path = service.route(&req);
        let ids: Vec<String> = path.iter().map(|id| id.to_string()).collect();
        println!("{label}: [{}]", ids.join(", "));
        for (i, step) in service.directions(&path).iter().enumerate() {
            println!("  {}. {step}", i + 1);
        }
    }
    println!();

    // 4. Batch routing (parallel with `--features parallel`).
    let t1 = Instant::now();
    let batch = service.route_many(&trip_requests());
    println!(
        "Batch of {} routes in {:.3} ms, {} succeeded",
        batch.len(),
        t1.elapsed().as_secs_f64() * 1e3,
        batch.iter().filter(|p| !p.is_empty()).count()
    );

    // 5. Overlay of the first trip on the overview raster.
    let overview = service.rasterize(&overview_viewport());
    if let Some(first) = batch.first() {
        let segments = service.overlay(first, &overview, 256, 256);
        println!("Overlay segments: {}", serde_json::to_string(&segments)?);
    }
    println!();

    // 6. Search.
    println!("Prefix \"top\": {:?}", service.search_by_prefix("top"));
    let hits = service.search_full("top dog");
    println!("Full \"top dog\":\n{}", serde_json::to_string_pretty(&hits)?);

    // 7. The JSON a web front end would receive.
    let response = service.route_with_directions(&trip_requests()[2]);
    println!("Route response:\n{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
