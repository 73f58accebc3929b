//! berkeley — route between two coordinates on a Berkeley road network.
//!
//! Without `--pbf` the network is a small synthetic grid of downtown
//! streets.  With the `osm` feature and `--pbf <file>`, real road data is
//! loaded instead.
//!
//! ```text
//! RUST_LOG=debug cargo run -p berkeley -- --from -122.2815,37.8716 --to -122.2590,37.8660
//! ```

mod network;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use bm_core::{GeoPoint, MapConfig};
use bm_graph::RoadGraph;
use bm_route::{Cancellation, Navigator};
use bm_spatial::SpatialIndex;

use network::build_network;

#[derive(Parser, Debug)]
#[command(about = "Shortest road route between two coordinates")]
struct Args {
    /// Start as `lon,lat`.
    #[arg(long, default_value = "-122.2815,37.8716")]
    from: String,

    /// Destination as `lon,lat`.
    #[arg(long, default_value = "-122.2590,37.8660")]
    to: String,

    /// OSM PBF extract to load instead of the synthetic grid.
    #[arg(long)]
    pbf: Option<PathBuf>,

    /// Abandon the search after this many milliseconds.
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,
}

fn parse_lon_lat(s: &str) -> Result<GeoPoint> {
    let (lon, lat) = s
        .split_once(',')
        .with_context(|| format!("expected `lon,lat`, got `{s}`"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("bad longitude in `{s}`"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude in `{s}`"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn load_graph(pbf: Option<&PathBuf>) -> Result<RoadGraph> {
    match pbf {
        None => Ok(build_network()?),
        #[cfg(feature = "osm")]
        Some(path) => Ok(bm_graph::osm::load_from_pbf(path)?),
        #[cfg(not(feature = "osm"))]
        Some(path) => bail!("{} given but built without the `osm` feature", path.display()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MapConfig::default();
    config.validate()?;
    let start = parse_lon_lat(&args.from)?;
    let dest = parse_lon_lat(&args.to)?;
    for p in [start, dest] {
        if !config.contains(p) {
            info!("{p} lies outside the configured map box");
        }
    }

    // 1. Road graph.
    let t0 = Instant::now();
    let graph = load_graph(args.pbf.as_ref())?;
    if graph.is_empty() {
        bail!("road graph is empty");
    }
    println!(
        "Road graph: {} intersections, {} segments ({:.3} s)",
        graph.node_count(),
        graph.edge_count(),
        t0.elapsed().as_secs_f64()
    );

    // 2. Spatial index.
    let t1 = Instant::now();
    let index = SpatialIndex::build(&graph, config.projection());
    println!(
        "Spatial index: {} points, depth {} ({:.3} s)",
        index.len(),
        index.depth(),
        t1.elapsed().as_secs_f64()
    );

    // 3. Route.
    let nav = Navigator::new(&graph, &index);
    let cancel = Cancellation::with_timeout(Duration::from_millis(args.timeout_ms));
    let t2 = Instant::now();
    let route = nav.route_between_with(start, dest, &cancel)?;
    println!(
        "Route: {} intersections, {:.3} mi ({:.3} s)",
        route.nodes.len(),
        route.total_miles,
        t2.elapsed().as_secs_f64()
    );
    println!();

    // 4. Turn table.
    println!("{:<4} {:<28} {:>10} {:>9}", "#", "Intersection", "Leg (mi)", "Bearing");
    println!("{}", "-".repeat(54));
    for (i, &node) in route.nodes.iter().enumerate() {
        let name = graph.name(node)?.map(str::to_owned).unwrap_or_else(|| node.to_string());
        match route.nodes.get(i + 1) {
            Some(&next) => println!(
                "{:<4} {:<28} {:>10.3} {:>9.1}",
                i,
                name,
                graph.distance(node, next)?,
                graph.bearing(node, next)?
            ),
            None => println!("{:<4} {:<28} {:>10} {:>9}", i, name, "-", "-"),
        }
    }

    Ok(())
}
