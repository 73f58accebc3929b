//! Unit tests for bm-graph.
//!
//! All tests use hand-crafted graphs so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use bm_core::{GeoPoint, NodeId, WayId};
    use crate::{RoadGraph, RoadGraphBuilder};

    /// A small Berkeley-flavoured network.
    ///
    /// ```text
    ///   1 ── 2 ── 3
    ///   │         │
    ///   4 ─────── 5        6 (on no way)
    /// ```
    ///
    /// Ways: 10 = [1, 2, 3], 11 = [3, 5, 4, 1].
    pub fn square() -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        b.add_named_node(NodeId(1), GeoPoint::new(37.870, -122.270), "Shattuck & Center");
        b.add_node(NodeId(2), GeoPoint::new(37.870, -122.265));
        b.add_node(NodeId(3), GeoPoint::new(37.870, -122.260));
        b.add_node(NodeId(4), GeoPoint::new(37.865, -122.270));
        b.add_node(NodeId(5), GeoPoint::new(37.865, -122.260));
        b.add_node(NodeId(6), GeoPoint::new(37.880, -122.250));
        b.add_way(WayId(10), [NodeId(1), NodeId(2), NodeId(3)]);
        b.add_way(WayId(11), [NodeId(3), NodeId(5), NodeId(4), NodeId(1)]);
        b.build().unwrap()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use bm_core::{GeoPoint, NodeId, WayId};
    use crate::{GraphError, RoadGraph, RoadGraphBuilder};

    #[test]
    fn empty_build() {
        let g = RoadGraphBuilder::new().build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(RoadGraph::empty().is_empty());
    }

    #[test_log::test]
    fn isolated_nodes_pruned() {
        let g = super::helpers::square();
        assert_eq!(g.node_count(), 5);
        assert!(!g.contains(NodeId(6)));
        for id in g.node_ids() {
            assert!(g.neighbors(id).next().is_some(), "{id} has no neighbors");
        }
    }

    #[test]
    fn ways_become_consecutive_segments() {
        let g = super::helpers::square();
        assert_eq!(g.edge_count(), 5);
        let n2: Vec<_> = g.neighbors(NodeId(2)).collect();
        assert_eq!(n2, vec![NodeId(1), NodeId(3)]);
        let n1: Vec<_> = g.neighbors(NodeId(1)).collect();
        assert_eq!(n1, vec![NodeId(2), NodeId(4)]);
        // 1 and 3 share a way but are not consecutive in it.
        assert!(!g.neighbors(NodeId(1)).any(|n| n == NodeId(3)));
    }

    #[test]
    fn dangling_reference_aborts_build() {
        let mut b = RoadGraphBuilder::new();
        b.add_node(NodeId(1), GeoPoint::new(0.0, 0.0));
        b.add_node(NodeId(2), GeoPoint::new(0.0, 0.001));
        b.add_way(WayId(7), [NodeId(1), NodeId(2)]);
        b.add_way(WayId(8), [NodeId(2), NodeId(99)]);
        match b.build() {
            Err(GraphError::DanglingReference { way, node }) => {
                assert_eq!(way, WayId(8));
                assert_eq!(node, NodeId(99));
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("graph built despite a dangling reference"),
        }
    }

    #[test]
    fn dangling_reference_in_single_node_way() {
        let mut b = RoadGraphBuilder::new();
        b.add_way(WayId(1), [NodeId(5)]);
        assert!(matches!(b.build(), Err(GraphError::DanglingReference { .. })));
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut b = RoadGraphBuilder::new();
        b.add_node(NodeId(1), GeoPoint::new(0.0, 0.0));
        b.add_node(NodeId(1), GeoPoint::new(1.0, 1.0));
        assert!(matches!(b.build(), Err(GraphError::DuplicateNode(NodeId(1)))));
    }

    #[test]
    fn repeated_segments_and_self_loops_collapse() {
        let mut b = RoadGraphBuilder::with_capacity(3, 3);
        b.add_node(NodeId(1), GeoPoint::new(0.0, 0.0));
        b.add_node(NodeId(2), GeoPoint::new(0.0, 0.001));
        b.add_node(NodeId(3), GeoPoint::new(0.0, 0.002));
        b.add_way(WayId(1), [NodeId(1), NodeId(2), NodeId(2), NodeId(3)]);
        b.add_way(WayId(2), [NodeId(3), NodeId(2)]);
        b.add_way(WayId(3), [NodeId(3)]);
        assert_eq!(b.way_count(), 3);
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(NodeId(2)).count(), 2);
        assert!(!g.neighbors(NodeId(2)).any(|n| n == NodeId(2)));
    }

    #[test]
    fn self_loop_only_node_is_pruned() {
        let mut b = RoadGraphBuilder::new();
        b.add_node(NodeId(1), GeoPoint::new(0.0, 0.0));
        b.add_way(WayId(1), [NodeId(1), NodeId(1)]);
        assert!(b.build().unwrap().is_empty());
    }
}

// ── Lookups ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lookup {
    use bm_core::NodeId;
    use crate::GraphError;

    #[test]
    fn coordinates() {
        let g = super::helpers::square();
        assert_eq!(g.lat(NodeId(4)).unwrap(), 37.865);
        assert_eq!(g.lon(NodeId(4)).unwrap(), -122.270);
    }

    #[test]
    fn missing_node_is_an_error_not_zero() {
        let g = super::helpers::square();
        assert!(matches!(g.lat(NodeId(6)), Err(GraphError::NodeNotFound(NodeId(6)))));
        assert!(matches!(g.lon(NodeId(42)), Err(GraphError::NodeNotFound(_))));
        assert!(g.distance(NodeId(1), NodeId(42)).is_err());
        assert!(g.bearing(NodeId(42), NodeId(1)).is_err());
        assert!(g.name(NodeId(42)).is_err());
    }

    #[test]
    fn missing_node_has_no_neighbors() {
        let g = super::helpers::square();
        assert_eq!(g.neighbors(NodeId(42)).count(), 0);
    }

    #[test]
    fn names() {
        let g = super::helpers::square();
        assert_eq!(g.name(NodeId(1)).unwrap(), Some("Shattuck & Center"));
        assert_eq!(g.name(NodeId(2)).unwrap(), None);
    }

    #[test]
    fn distance_between_non_adjacent_nodes() {
        let g = super::helpers::square();
        // 1 → 5 is a diagonal; no segment joins them.
        let d = g.distance(NodeId(1), NodeId(5)).unwrap();
        let legs = g.distance(NodeId(1), NodeId(4)).unwrap() + g.distance(NodeId(4), NodeId(5)).unwrap();
        assert!(d > 0.0 && d < legs);
        assert!((d - g.distance(NodeId(5), NodeId(1)).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn bearings() {
        let g = super::helpers::square();
        // 1 → 2 heads due east, 1 → 4 due south.
        assert!((g.bearing(NodeId(1), NodeId(2)).unwrap() - 90.0).abs() < 0.01);
        assert!((g.bearing(NodeId(1), NodeId(4)).unwrap().abs() - 180.0).abs() < 0.01);
    }

    #[test]
    fn dense_index_agrees_with_ids() {
        let g = super::helpers::square();
        for id in g.node_ids() {
            let ix = g.index_of(id).unwrap();
            assert_eq!(g.id_at(ix), id);
            assert_eq!(g.pos_at(ix), g.pos(id).unwrap());
            let by_ix: Vec<_> = g.neighbors_at(ix).map(|j| g.id_at(j)).collect();
            let by_id: Vec<_> = g.neighbors(id).collect();
            assert_eq!(by_ix, by_id);
            assert_eq!(g.degree_at(ix), by_id.len());
        }
        assert!(g.index_of(NodeId(6)).is_none());
    }
}

// ── Randomised invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use bm_core::{GeoPoint, NodeId, WayId};
    use crate::{RoadGraph, RoadGraphBuilder};

    fn random_graph(seed: u64, nodes: i64, ways: i64) -> RoadGraph {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut b = RoadGraphBuilder::new();
        for id in 0..nodes {
            b.add_node(
                NodeId(id),
                GeoPoint::new(rng.gen_range(37.80..37.90), rng.gen_range(-122.30..-122.20)),
            );
        }
        for w in 0..ways {
            let len = rng.gen_range(1..6);
            let refs: Vec<NodeId> = (0..len).map(|_| NodeId(rng.gen_range(0..nodes))).collect();
            b.add_way(WayId(w), refs);
        }
        b.build().unwrap()
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        for seed in 0..5 {
            let g = random_graph(seed, 200, 120);
            for a in g.node_ids() {
                for b in g.neighbors(a) {
                    assert!(g.neighbors(b).any(|n| n == a), "{a} → {b} has no reverse");
                }
            }
        }
    }

    #[test]
    fn no_isolated_nodes_survive() {
        for seed in 0..5 {
            let g = random_graph(seed, 300, 40);
            assert!(g.node_count() < 300, "sparse ways should leave nodes to prune");
            for id in g.node_ids() {
                assert!(g.neighbors(id).next().is_some());
            }
        }
    }

    #[test]
    fn node_ids_ascending() {
        let g = random_graph(9, 100, 80);
        let ids: Vec<_> = g.node_ids().collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
