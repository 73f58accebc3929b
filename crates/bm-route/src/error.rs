//! Routing error type.

use thiserror::Error;

use bm_core::NodeId;
use bm_graph::GraphError;
use bm_spatial::SpatialError;

/// Errors produced by `bm-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// An endpoint is not in the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A coordinate could not be snapped to the graph.
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("no route from {from} to {to}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("search cancelled after expanding {expanded} nodes")]
    Cancelled { expanded: usize },

    /// The search reached the destination but the predecessor links do not
    /// lead back to the start.  This is a bug, not a property of the query.
    #[error("internal error: predecessor chain broken at {node}")]
    BrokenPredecessorChain { node: NodeId },
}

impl RouteError {
    /// `true` for invariant violations, `false` for ordinary query failures.
    pub fn is_internal(&self) -> bool {
        matches!(self, RouteError::BrokenPredecessorChain { .. })
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
