//! Synthetic downtown Berkeley street grid.
//!
//! A handful of real intersections around campus, joined the way the
//! streets actually run, so routes between them look plausible on a map.

use bm_core::{GeoPoint, NodeId, WayId};
use bm_graph::{GraphResult, RoadGraph, RoadGraphBuilder};

/// East–west streets, north to south, with their latitude.
const STREETS: [(&str, f64); 5] = [
    ("Hearst",     37.8736),
    ("University", 37.8717),
    ("Center",     37.8702),
    ("Bancroft",   37.8678),
    ("Dwight",     37.8640),
];

/// North–south avenues, west to east.  `lons[row]` is where the avenue
/// crosses `STREETS[row]`; `None` where it does not reach that far.
const AVENUES: [(&str, [Option<f64>; 5]); 5] = [
    ("Sacramento", [Some(-122.2830), Some(-122.2818), Some(-122.2810), Some(-122.2800), Some(-122.2788)]),
    ("MLK",        [Some(-122.2745), Some(-122.2736), Some(-122.2731), Some(-122.2723), Some(-122.2711)]),
    ("Shattuck",   [Some(-122.2680), Some(-122.2682), Some(-122.2681), Some(-122.2678), Some(-122.2670)]),
    ("Oxford",     [Some(-122.2662), Some(-122.2664), Some(-122.2663), Some(-122.2660), Some(-122.2650)]),
    ("Telegraph",  [None,            None,            None,            Some(-122.2590), Some(-122.2586)]),
];

fn intersection(row: usize, col: usize) -> NodeId {
    NodeId((row * 10 + col + 1) as i64)
}

pub fn build_network() -> GraphResult<RoadGraph> {
    let mut b = RoadGraphBuilder::new();

    for (row, (street, lat)) in STREETS.iter().enumerate() {
        for (col, (avenue, lons)) in AVENUES.iter().enumerate() {
            if let Some(lon) = lons[row] {
                b.add_named_node(intersection(row, col), GeoPoint::new(*lat, lon), format!("{street} & {avenue}"));
            }
        }
    }

    // One way per street and per avenue, through every crossing it has.
    let mut way = 0;
    for row in 0..STREETS.len() {
        let refs = (0..AVENUES.len())
            .filter(|&col| AVENUES[col].1[row].is_some())
            .map(|col| intersection(row, col));
        b.add_way(WayId(way), refs);
        way += 1;
    }
    for (col, (_, lons)) in AVENUES.iter().enumerate() {
        let refs = (0..STREETS.len())
            .filter(|&row| lons[row].is_some())
            .map(|row| intersection(row, col));
        b.add_way(WayId(way), refs);
        way += 1;
    }

    // A survey marker on no street; dropped at build.
    b.add_named_node(NodeId(999), GeoPoint::new(37.8750, -122.2500), "Survey marker");

    b.build()
}
