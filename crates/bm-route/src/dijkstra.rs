//! Uninformed Dijkstra search.
//!
//! Explores strictly by distance from the start.  Slower than
//! [`AStar`](crate::AStar) on the same query but carries no assumptions
//! about the cost metric, which makes it the yardstick A* is checked
//! against.

use log::debug;

use bm_core::NodeId;
use bm_graph::{GraphError, RoadGraph};

use crate::frontier::{Frontier, FrontierEntry, NO_PRED, reconstruct};
use crate::{Cancellation, Route, RouteError, RouteResult, Router};

#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl Router for Dijkstra {
    fn route(
        &self,
        graph: &RoadGraph,
        start: NodeId,
        dest: NodeId,
        cancel: &Cancellation,
    ) -> RouteResult<Route> {
        dijkstra(graph, start, dest, cancel)
    }
}

fn dijkstra(
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

    let n = graph.node_count();
    // dist[v] = best known distance (miles) from start to v.
    let mut dist = vec![f64::INFINITY; n];
    let mut pred = vec![NO_PRED; n];
    let mut frontier = Frontier::new();

    dist[start_ix] = 0.0;
    frontier.push(FrontierEntry { priority: 0.0, node: start_ix as u32 });

    let mut expanded = 0usize;
    while let Some(FrontierEntry { priority, node }) = frontier.pop() {
        if cancel.is_cancelled() {
            return Err(RouteError::Cancelled { expanded });
        }

        let u = node as usize;
        if u == dest_ix {
            debug!("dijkstra: {start} → {dest} found after {expanded} expansions");
            return reconstruct(graph, &pred, start_ix, dest_ix);
        }

        // Skip stale heap entries.
        if priority > dist[u] {
            continue;
        }
        expanded += 1;

        for v in graph.neighbors_at(u) {
            let new_dist = priority + graph.distance_at(u, v);
            if new_dist < dist[v] {
                dist[v] = new_dist;
                pred[v] = u as u32;
                frontier.push(FrontierEntry { priority: new_dist, node: v as u32 });
            }
        }
    }

    Err(RouteError::Unreachable { from: start, to: dest })
}
