//! `bm-graph` — the road graph every query runs over.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`graph`] | `RoadGraph` (CSR adjacency), `RoadGraphBuilder`            |
//! | [`osm`]   | `load_from_pbf` (feature = `"osm"` only)                   |
//! | [`error`] | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |

pub mod error;
pub mod graph;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
