//! Routing trait and the route value it produces.
//!
//! # Pluggability
//!
//! [`PathFinder`](crate::PathFinder) calls routing via the [`Router`] trait,
//! so applications can swap in custom implementations (contraction
//! hierarchies, bidirectional search) without touching the query layer.
//! The default [`AStar`](crate::AStar) is sufficient for a city-sized map.
//!
//! # Cost units
//!
//! All costs are great-circle **miles** (f64).

use bm_core::NodeId;
use bm_graph::RoadGraph;

use crate::{Cancellation, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the intersections to pass through, in
/// travel order, and the total distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from start to destination, both inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of segment lengths along `nodes`, in miles.
    pub total_miles: f64,
}

impl Route {
    /// The single-node route from `node` to itself.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], total_miles: 0.0 }
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn dest(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Consecutive `(from, to)` pairs, one per road segment travelled.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`.  Each call owns its own search
/// state, so one router and one graph can serve concurrent queries.
pub trait Router: Send + Sync {
    /// Compute the shortest route from `start` to `dest`.
    ///
    /// `start == dest` yields [`Route::trivial`].  Fails with
    /// [`RouteError::Unreachable`](crate::RouteError::Unreachable) when the
    /// two lie in different components.
    fn route(
        &self,
        graph: &RoadGraph,
        start: NodeId,
        dest: NodeId,
        cancel: &Cancellation,
    ) -> RouteResult<Route>;
}
