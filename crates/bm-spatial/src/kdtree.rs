//! Balanced 2-D KD-tree over projected intersection coordinates.
//!
//! # Layout
//!
//! Tree nodes live in one `Vec` (the arena) and refer to their children by
//! position, so the whole tree is a single allocation with no shared or
//! cyclic ownership.  Each entry holds a graph [`NodeId`] and its projected
//! point, never a copy of the graph's node data.
//!
//! # Construction
//!
//! Points are split at the median of the active axis, alternating `x`,
//! `y`, `x`, … by depth.  Coordinates compare with `f64::total_cmp`, and
//! equal coordinates fall back to id order, so the same input always
//! produces the same tree.  Median selection is linear per level, giving
//! O(n log n) construction and depth ⌈log2(n + 1)⌉.
//!
//! # Queries
//!
//! Standard branch-and-bound descent: visit the child on the query's side
//! of the splitting line first, then the other child only if the line is
//! strictly closer than the best point found so far.  Equidistant points
//! are not ordered: the answer is whichever one the descent reaches first,
//! which is fixed for a given input set.

use std::cmp::Ordering;

use log::{debug, warn};

use bm_core::{GeoPoint, NodeId, Projection};
use bm_graph::RoadGraph;

use crate::{SpatialError, SpatialResult};

// ── Tree node ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, p: [f64; 2]) -> f64 {
        match self {
            Axis::X => p[0],
            Axis::Y => p[1],
        }
    }

    #[inline]
    fn flip(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

struct KdNode {
    id:    NodeId,
    point: [f64; 2],
    axis:  Axis,
    left:  Option<u32>,
    right: Option<u32>,
}

/// Best candidate seen so far during a descent.
struct Nearest {
    id:    NodeId,
    dist2: f64,
}

impl Nearest {
    /// Only a strictly closer candidate replaces the current one, so among
    /// equidistant points the first one the descent reaches is kept.
    #[inline]
    fn offer(&mut self, id: NodeId, dist2: f64) {
        if dist2 < self.dist2 {
            self.id = id;
            self.dist2 = dist2;
        }
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Immutable nearest-neighbor index over road-graph intersections.
///
/// Holds ids into the graph it was built from; look coordinates and
/// neighbors up there.  Queries take `&self`, so one index can serve any
/// number of threads at once.
pub struct SpatialIndex {
    nodes:      Vec<KdNode>,
    root:       Option<u32>,
    depth:      usize,
    projection: Projection,
}

impl SpatialIndex {
    /// Index every node of `graph`.
    pub fn build(graph: &RoadGraph, projection: Projection) -> Self {
        let points = (0..graph.node_count()).map(|ix| (graph.id_at(ix), graph.pos_at(ix)));
        Self::from_points(points, projection)
    }

    /// Index an arbitrary set of `(id, position)` pairs.
    ///
    /// Points whose projection is not finite cannot be compared and are
    /// left out.
    pub fn from_points(
        points: impl IntoIterator<Item = (NodeId, GeoPoint)>,
        projection: Projection,
    ) -> Self {
        let mut entries: Vec<(NodeId, [f64; 2])> = points
            .into_iter()
            .filter_map(|(id, pos)| {
                let p = projection.project(pos);
                if p[0].is_finite() && p[1].is_finite() {
                    Some((id, p))
                } else {
                    warn!("spatial index: skipping {id}, projection of {pos} is not finite");
                    None
                }
            })
            .collect();
        entries.sort_unstable_by_key(|e| e.0);

        let mut nodes = Vec::with_capacity(entries.len());
        let mut depth = 0;
        let root = build_subtree(&mut entries, Axis::X, 1, &mut nodes, &mut depth);

        debug!("spatial index: {} points, depth {}", nodes.len(), depth);
        Self { nodes, root, depth, projection }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels from the root to the deepest leaf.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Id of the indexed node nearest `(lon, lat)` in projected space.
    ///
    /// When several nodes are equally near, one of them is returned; which
    /// one depends only on the indexed set, not on insertion order.
    pub fn closest(&self, lon: f64, lat: f64) -> SpatialResult<NodeId> {
        self.closest_to(GeoPoint::new(lat, lon))
    }

    pub fn closest_to(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        if !pos.is_finite() {
            return Err(SpatialError::InvalidCoordinate(pos));
        }
        let query = self.projection.project(pos);
        if !(query[0].is_finite() && query[1].is_finite()) {
            return Err(SpatialError::InvalidCoordinate(pos));
        }

        let mut best = Nearest { id: NodeId::INVALID, dist2: f64::INFINITY };
        if let Some(root) = self.root {
            self.descend(root, query, &mut best);
        }
        if best.id.is_valid() {
            Ok(best.id)
        } else {
            Err(SpatialError::EmptyIndex)
        }
    }

    /// Resolve many coordinates at once, preserving input order.
    ///
    /// With the `parallel` Cargo feature the queries run on Rayon's thread
    /// pool.
    pub fn closest_many(&self, positions: &[GeoPoint]) -> Vec<SpatialResult<NodeId>> {
        #[cfg(not(feature = "parallel"))]
        {
            positions.iter().map(|&p| self.closest_to(p)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            positions.par_iter().map(|&p| self.closest_to(p)).collect()
        }
    }

    fn descend(&self, ix: u32, query: [f64; 2], best: &mut Nearest) {
        let node = &self.nodes[ix as usize];
        best.offer(node.id, dist2(node.point, query));

        // Signed offset of the query from the splitting line.
        let offset = node.axis.of(query) - node.axis.of(node.point);
        let (near, far) = if offset < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.descend(child, query, best);
        }
        if let Some(child) = far {
            if offset * offset < best.dist2 {
                self.descend(child, query, best);
            }
        }
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

fn axis_order(axis: Axis, a: &(NodeId, [f64; 2]), b: &(NodeId, [f64; 2])) -> Ordering {
    axis.of(a.1).total_cmp(&axis.of(b.1)).then(a.0.cmp(&b.0))
}

/// Place the median of `entries` on `axis` into the arena, recurse on both
/// halves, and return the median's arena position.
fn build_subtree(
    entries: &mut [(NodeId, [f64; 2])],
    axis:    Axis,
    level:   usize,
    arena:   &mut Vec<KdNode>,
    depth:   &mut usize,
) -> Option<u32> {
    if entries.is_empty() {
        return None;
    }
    *depth = (*depth).max(level);

    let mid = entries.len() / 2;
    entries.select_nth_unstable_by(mid, |a, b| axis_order(axis, a, b));
    let (lower, rest) = entries.split_at_mut(mid);
    let (&mut (id, point), upper) = rest.split_first_mut()?;

    let slot = arena.len() as u32;
    arena.push(KdNode { id, point, axis, left: None, right: None });

    let left = build_subtree(lower, axis.flip(), level + 1, arena, depth);
    let right = build_subtree(upper, axis.flip(), level + 1, arena, depth);
    let node = &mut arena[slot as usize];
    node.left = left;
    node.right = right;

    Some(slot)
}

#[inline]
fn dist2(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}
