//! Core error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `SpatialError`,
//! `RouteError`); this one only covers what `bm-core` itself can reject.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `bm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
