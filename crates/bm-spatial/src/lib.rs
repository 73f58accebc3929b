//! `bm-spatial` — nearest-intersection lookup.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`kdtree`] | `SpatialIndex` (balanced 2-D KD-tree, arena storage)      |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `closest_many` fans queries out over Rayon.               |

pub mod error;
pub mod kdtree;


pub use error::{SpatialError, SpatialResult};
pub use kdtree::SpatialIndex;
