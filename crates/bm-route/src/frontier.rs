//! Search state shared by the routers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bm_graph::RoadGraph;

use crate::{Route, RouteError, RouteResult};

/// Marks a node no search has reached.
pub(crate) const NO_PRED: u32 = u32::MAX;

/// One frontier entry.  Stale entries are left in the heap and skipped when
/// popped; nothing is ever re-prioritised in place.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FrontierEntry {
    pub priority: f64,
    pub node:     u32,
}

/// Lowest priority first, lower node index on ties.
///
/// `BinaryHeap` pops its greatest element, so the comparison is reversed.
fn lowest_priority_first(a: &FrontierEntry, b: &FrontierEntry) -> Ordering {
    b.priority
        .total_cmp(&a.priority)
        .then_with(|| b.node.cmp(&a.node))
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        lowest_priority_first(self, other)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

pub(crate) type Frontier = BinaryHeap<FrontierEntry>;

/// Walk `pred` back from `dest` to `start` and price the path.
///
/// A missing link, or a chain longer than the graph (a cycle), means the
/// search left inconsistent state behind.
pub(crate) fn reconstruct(
    graph: &RoadGraph,
    pred:  &[u32],
    start: usize,
    dest:  usize,
) -> RouteResult<Route> {
    let mut path = vec![dest];
    let mut cur = dest;
    while cur != start {
        let prev = pred[cur];
        if prev == NO_PRED || path.len() > pred.len() {
            return Err(RouteError::BrokenPredecessorChain { node: graph.id_at(cur) });
        }
        cur = prev as usize;
        path.push(cur);
    }
    path.reverse();

    let total_miles = path.windows(2).map(|w| graph.distance_at(w[0], w[1])).sum();
    Ok(Route {
        nodes: path.into_iter().map(|ix| graph.id_at(ix)).collect(),
        total_miles,
    })
}
