//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use bm_graph::osm::load_from_pbf;
//!
//! let graph = load_from_pbf(Path::new("berkeley.osm.pbf"))?;
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways of the road classes listed in [`is_road`] are
//! kept.  Footways, buildings, POIs and relations are ignored.  Every kept
//! way is treated as two-way; the graph is undirected.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, …>` for the first
//! pass (ways reference node IDs that may appear anywhere in the file).
//! The map is freed once road nodes have been handed to the builder.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::debug;
use osmpbf::{Element, ElementReader};

use bm_core::{GeoPoint, NodeId, WayId};

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::GraphError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a road graph from an OSM PBF file.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] when the file cannot be opened or parsed,
/// and whatever [`RoadGraphBuilder::build`] rejects — in particular
/// [`GraphError::DanglingReference`] when the extract was clipped so that a
/// kept way references a node the file does not contain.
pub fn load_from_pbf(path: &Path) -> Result<RoadGraph, GraphError> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, OsmNode> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), OsmNode::new(n.lat(), n.lon(), n.tags()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), OsmNode::new(n.lat(), n.lon(), n.tags()));
            }
            Element::Way(w) => {
                let highway = w.tags().find(|(k, _)| *k == "highway").map(|(_, v)| v);
                if highway.is_some_and(is_road) {
                    road_ways.push(OsmWay { id: w.id(), refs: w.refs().collect() });
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 3: build graph ──────────────────────────────────────────────
    let mut builder = RoadGraphBuilder::with_capacity(road_node_ids.len(), road_ways.len());

    for osm_id in &road_node_ids {
        if let Some(node) = all_nodes.remove(osm_id) {
            match node.name {
                Some(name) => builder.add_named_node(NodeId(*osm_id), node.pos, name),
                None => builder.add_node(NodeId(*osm_id), node.pos),
            }
        }
    }
    debug!(
        "osm: {} road ways, {} road nodes, {} other nodes discarded",
        road_ways.len(),
        builder.node_count(),
        all_nodes.len(),
    );

    // Free the full node map — no longer needed.
    drop(all_nodes);
    drop(road_node_ids);

    for way in road_ways {
        builder.add_way(WayId(way.id), way.refs.into_iter().map(NodeId));
    }

    builder.build()
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmNode {
    pos:  GeoPoint,
    name: Option<String>,
}

impl OsmNode {
    fn new<'a>(lat: f64, lon: f64, mut tags: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let name = tags.find(|(k, _)| *k == "name").map(|(_, v)| v.to_owned());
        Self { pos: GeoPoint::new(lat, lon), name }
    }
}

struct OsmWay {
    id:   i64,
    refs: Vec<i64>,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` for the `highway` values that make up the routable road network.
fn is_road(highway: &str) -> bool {
    matches!(
        highway,
        "motorway" | "motorway_link"
            | "trunk" | "trunk_link"
            | "primary" | "primary_link"
            | "secondary" | "secondary_link"
            | "tertiary" | "tertiary_link"
            | "unclassified"
            | "residential"
            | "living_street"
    )
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{is_road, load_from_pbf};
    use crate::GraphError;

    #[test]
    fn road_classes() {
        assert!(is_road("residential"));
        assert!(is_road("motorway_link"));
        assert!(!is_road("footway"));
        assert!(!is_road("cycleway"));
        assert!(!is_road("service"));
    }

    #[test]
    fn missing_file_is_osm_error() {
        let result = load_from_pbf(Path::new("/nonexistent/berkeley.osm.pbf"));
        assert!(matches!(result, Err(GraphError::Osm(_))));
    }
}
