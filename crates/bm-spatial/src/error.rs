//! Spatial-index error type.

use thiserror::Error;

use bm_core::GeoPoint;

/// Errors produced by `bm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("nearest-neighbor query against an empty index")]
    EmptyIndex,

    #[error("query coordinate {0} is not finite")]
    InvalidCoordinate(GeoPoint),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
