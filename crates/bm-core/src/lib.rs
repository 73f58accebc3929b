//! `bm-core` — foundational types for the `bearmaps` routing workspace.
//!
//! This crate is a dependency of every other `bm-*` crate.  It intentionally
//! has no `bm-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WayId`                                     |
//! | [`geo`]         | `GeoPoint`, haversine distance, initial bearing       |
//! | [`projection`]  | `Projection` (transverse Mercator flattening)         |
//! | [`config`]      | `MapConfig`                                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod projection;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MapConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_MILES, GeoPoint};
pub use ids::{NodeId, WayId};
pub use projection::Projection;
