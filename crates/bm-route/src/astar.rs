//! A* search with a great-circle heuristic.
//!
//! Edge cost is the great-circle length of the segment; the heuristic is
//! the great-circle distance to the destination.  A road between two points
//! is never shorter than the arc between them, and the arc satisfies the
//! triangle inequality, so the heuristic is admissible and consistent: a
//! node popped once is final and is never reopened.

use log::{debug, trace};

use bm_core::NodeId;
use bm_graph::{GraphError, RoadGraph};

use crate::frontier::{Frontier, FrontierEntry, NO_PRED, reconstruct};
use crate::{Cancellation, Route, RouteError, RouteResult, Router};

/// The default router.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl Router for AStar {
    fn route(
        &self,
        graph: &RoadGraph,
        start: NodeId,
        dest: NodeId,
        cancel: &Cancellation,
    ) -> RouteResult<Route> {
        astar(graph, start, dest, cancel)
    }
}

fn astar(
    graph: &RoadGraph,
    start: NodeId,
    dest: NodeId,
    cancel: &Cancellation,
) -> RouteResult<Route> {
    let start_ix = graph.index_of(start).ok_or(GraphError::NodeNotFound(start))?;
    let dest_ix = graph.index_of(dest).ok_or(GraphError::NodeNotFound(dest))?;
    if start_ix == dest_ix {
        return Ok(Route::trivial(start));
    }
    trace!("a*: {start} → {dest}");

    let goal = graph.pos_at(dest_ix);
    let heuristic = |ix: usize| graph.pos_at(ix).distance_miles(goal);

    let n = graph.node_count();
    // cost[v] = best known distance (miles) from start to v.
    let mut cost   = vec![f64::INFINITY; n];
    let mut pred   = vec![NO_PRED; n];
    let mut closed = vec![false; n];
    let mut frontier = Frontier::new();

    cost[start_ix] = 0.0;
    frontier.push(FrontierEntry { priority: heuristic(start_ix), node: start_ix as u32 });

    let mut expanded = 0usize;
    while let Some(FrontierEntry { node, .. }) = frontier.pop() {
        if cancel.is_cancelled() {
            debug!("a*: {start} → {dest} cancelled after {expanded} expansions");
            return Err(RouteError::Cancelled { expanded });
        }

        let u = node as usize;
        if closed[u] {
            continue;
        }
        if u == dest_ix {
            debug!("a*: {start} → {dest} found after {expanded} expansions, {:.3} mi", cost[u]);
            return reconstruct(graph, &pred, start_ix, dest_ix);
        }
        closed[u] = true;
        expanded += 1;

        for v in graph.neighbors_at(u) {
            if closed[v] {
                continue;
            }
            let through_u = cost[u] + graph.distance_at(u, v);
            if through_u < cost[v] {
                cost[v] = through_u;
                pred[v] = u as u32;
                frontier.push(FrontierEntry { priority: through_u + heuristic(v), node: v as u32 });
            }
        }
    }

    debug!("a*: {start} → {dest} unreachable, {expanded} nodes expanded");
    Err(RouteError::Unreachable { from: start, to: dest })
}
