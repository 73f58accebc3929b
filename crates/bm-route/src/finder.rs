//! Query-layer entry points.
//!
//! [`PathFinder`] binds a router to one graph and answers id-to-id
//! queries.  [`Navigator`] adds the spatial index in front of it so callers
//! can ask for a route between two raw coordinates.
//!
//! # Example
//!
//! ```
//! use bm_core::{GeoPoint, NodeId, Projection, WayId};
//! use bm_graph::RoadGraphBuilder;
//! use bm_route::{Navigator, PathFinder};
//! use bm_spatial::SpatialIndex;
//!
//! let mut b = RoadGraphBuilder::new();
//! b.add_node(NodeId(1), GeoPoint::new(37.870, -122.270));
//! b.add_node(NodeId(2), GeoPoint::new(37.870, -122.265));
//! b.add_node(NodeId(3), GeoPoint::new(37.865, -122.265));
//! b.add_way(WayId(1), [NodeId(1), NodeId(2), NodeId(3)]);
//! let graph = b.build().unwrap();
//!
//! let path = PathFinder::new(&graph).shortest_path(NodeId(1), NodeId(3)).unwrap();
//! assert_eq!(path, vec![NodeId(1), NodeId(2), NodeId(3)]);
//!
//! let index = SpatialIndex::build(&graph, Projection::default());
//! let nav = Navigator::new(&graph, &index);
//! let route = nav
//!     .route_between(GeoPoint::new(37.8701, -122.2699), GeoPoint::new(37.8651, -122.2651))
//!     .unwrap();
//! assert_eq!(route.nodes, path);
//! ```

use bm_core::{GeoPoint, NodeId};
use bm_graph::RoadGraph;
use bm_spatial::SpatialIndex;

use crate::{AStar, Cancellation, Route, RouteResult, Router};

// ── PathFinder ────────────────────────────────────────────────────────────────

/// Shortest-path queries over one graph.
///
/// Holds no per-query state; each call allocates its own frontier, so a
/// single `PathFinder` can be shared across threads.
pub struct PathFinder<'g, R: Router = AStar> {
    graph:  &'g RoadGraph,
    router: R,
}

impl<'g> PathFinder<'g, AStar> {
    pub fn new(graph: &'g RoadGraph) -> Self {
        Self { graph, router: AStar }
    }
}

impl<'g, R: Router> PathFinder<'g, R> {
    pub fn with_router(graph: &'g RoadGraph, router: R) -> Self {
        Self { graph, router }
    }

    pub fn graph(&self) -> &'g RoadGraph {
        self.graph
    }

    /// Node ids from `start` to `dest` inclusive, in travel order.
    pub fn shortest_path(&self, start: NodeId, dest: NodeId) -> RouteResult<Vec<NodeId>> {
        self.route(start, dest).map(Route::into_nodes)
    }

    pub fn route(&self, start: NodeId, dest: NodeId) -> RouteResult<Route> {
        self.route_with(start, dest, &Cancellation::none())
    }

    /// Like [`route`](Self::route), giving up when `cancel` fires.
    pub fn route_with(&self, start: NodeId, dest: NodeId, cancel: &Cancellation) -> RouteResult<Route> {
        self.router.route(self.graph, start, dest, cancel)
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Coordinate-to-coordinate routing: snap both ends to their nearest
/// intersections, then search between them.
///
/// The index must have been built from the same graph.
pub struct Navigator<'g, R: Router = AStar> {
    index:  &'g SpatialIndex,
    finder: PathFinder<'g, R>,
}

impl<'g> Navigator<'g, AStar> {
    pub fn new(graph: &'g RoadGraph, index: &'g SpatialIndex) -> Self {
        Self { index, finder: PathFinder::new(graph) }
    }
}

impl<'g, R: Router> Navigator<'g, R> {
    pub fn with_finder(finder: PathFinder<'g, R>, index: &'g SpatialIndex) -> Self {
        Self { index, finder }
    }

    /// Nearest intersection to `pos`.
    pub fn snap(&self, pos: GeoPoint) -> RouteResult<NodeId> {
        Ok(self.index.closest_to(pos)?)
    }

    pub fn route_between(&self, start: GeoPoint, dest: GeoPoint) -> RouteResult<Route> {
        self.route_between_with(start, dest, &Cancellation::none())
    }

    pub fn route_between_with(
        &self,
        start: GeoPoint,
        dest: GeoPoint,
        cancel: &Cancellation,
    ) -> RouteResult<Route> {
        let from = self.snap(start)?;
        let to = self.snap(dest)?;
        self.finder.route_with(from, to, cancel)
    }
}
