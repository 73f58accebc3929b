//! `bm-route` — shortest paths over the road graph.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`router`]    | `Router` trait, `Route`                                 |
//! | [`astar`]     | `AStar` (default router)                                |
//! | [`dijkstra`]  | `Dijkstra` (uninformed reference router)                |
//! | [`finder`]    | `PathFinder` (graph-bound search), `Navigator` (coordinate queries) |
//! | [`cancel`]    | `Cancellation` (flag and/or deadline)                   |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                          |
//!
//! # Typical flow
//!
//! ```text
//! (lon, lat) ──SpatialIndex::closest──▶ NodeId ──PathFinder::shortest_path──▶ [NodeId]
//! ```
//!
//! [`Navigator`] bundles both steps.

pub mod astar;
pub mod cancel;
pub mod dijkstra;
pub mod error;
pub mod finder;
pub mod router;

mod frontier;


pub use astar::AStar;
pub use cancel::Cancellation;
pub use dijkstra::Dijkstra;
pub use error::{RouteError, RouteResult};
pub use finder::{Navigator, PathFinder};
pub use router::{Route, Router};
