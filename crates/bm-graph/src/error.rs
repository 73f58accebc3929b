//! Graph-construction and lookup error type.

use thiserror::Error;

use bm_core::{NodeId, WayId};

/// Errors produced by `bm-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("{way} references {node}, which is not in the node set")]
    DanglingReference { way: WayId, node: NodeId },

    #[error("{0} added more than once")]
    DuplicateNode(NodeId),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
