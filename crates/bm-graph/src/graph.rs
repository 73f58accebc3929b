//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Map data identifies intersections by sparse 64-bit ids.  At build time
//! every surviving node is assigned a dense index (its position in the
//! ascending id order) and the undirected adjacency is stored in
//! **Compressed Sparse Row (CSR)** format over those indices:
//!
//! ```text
//! adj[ adj_start[i] .. adj_start[i+1] ]
//! ```
//!
//! holds the neighbor indices of node `i`, sorted ascending.  Each road
//! segment appears twice, once from each end, so the neighbor relation is
//! symmetric by construction.
//!
//! Id-based accessors (`neighbors`, `lat`, `distance`, …) are the public
//! query surface.  Index-based accessors (`index_of`, `neighbors_at`, …)
//! exist for search loops that keep per-node state in flat `Vec`s.

use log::debug;
use rustc_hash::FxHashMap;

use bm_core::{GeoPoint, NodeId, WayId};

use crate::{GraphError, GraphResult};

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable, undirected graph of intersections joined by road segments.
///
/// Every node has at least one neighbor; isolated nodes are pruned by
/// [`RoadGraphBuilder::build`].  Connectivity is not guaranteed: two
/// nodes may sit in different components.
pub struct RoadGraph {
    /// Node id per dense index, ascending.
    ids: Vec<NodeId>,
    /// Position per dense index.
    pos: Vec<GeoPoint>,
    /// Optional display name per dense index.
    names: Vec<Option<Box<str>>>,
    /// Reverse of `ids`.
    index: FxHashMap<NodeId, u32>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    adj_start: Vec<u32>,
    adj: Vec<u32>,
}

impl RoadGraph {
    /// A graph with no nodes.  Every lookup against it fails with
    /// [`GraphError::NodeNotFound`].
    pub fn empty() -> Self {
        Self {
            ids:       Vec::new(),
            pos:       Vec::new(),
            names:     Vec::new(),
            index:     FxHashMap::default(),
            adj_start: vec![0],
            adj:       Vec::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of undirected road segments.
    pub fn edge_count(&self) -> usize {
        self.adj.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    // ── Id-based queries ──────────────────────────────────────────────────

    /// All node ids, ascending.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Ids adjacent to `id`, ascending.  Empty if `id` is not in the graph.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let slice: &[u32] = match self.index_of(id) {
            Some(ix) => self.adj_slice(ix),
            None => &[],
        };
        slice.iter().map(move |&j| self.ids[j as usize])
    }

    pub fn pos(&self, id: NodeId) -> GraphResult<GeoPoint> {
        self.index_of(id)
            .map(|ix| self.pos[ix])
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub fn lat(&self, id: NodeId) -> GraphResult<f64> {
        self.pos(id).map(|p| p.lat)
    }

    pub fn lon(&self, id: NodeId) -> GraphResult<f64> {
        self.pos(id).map(|p| p.lon)
    }

    /// Display name of `id`, if the source data gave it one.
    pub fn name(&self, id: NodeId) -> GraphResult<Option<&str>> {
        self.index_of(id)
            .map(|ix| self.names[ix].as_deref())
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Great-circle distance in miles between any two nodes, adjacent or not.
    pub fn distance(&self, a: NodeId, b: NodeId) -> GraphResult<f64> {
        Ok(self.pos(a)?.distance_miles(self.pos(b)?))
    }

    /// Initial compass bearing in degrees from `a` towards `b`.
    pub fn bearing(&self, a: NodeId, b: NodeId) -> GraphResult<f64> {
        Ok(self.pos(a)?.bearing_deg(self.pos(b)?))
    }

    // ── Dense-index access ────────────────────────────────────────────────

    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).map(|&ix| ix as usize)
    }

    #[inline]
    pub fn id_at(&self, ix: usize) -> NodeId {
        self.ids[ix]
    }

    #[inline]
    pub fn pos_at(&self, ix: usize) -> GeoPoint {
        self.pos[ix]
    }

    /// Neighbor indices of the node at `ix`.  Contiguous slice scan, no
    /// allocation.
    #[inline]
    pub fn neighbors_at(&self, ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj_slice(ix).iter().map(|&j| j as usize)
    }

    #[inline]
    pub fn degree_at(&self, ix: usize) -> usize {
        self.adj_slice(ix).len()
    }

    #[inline]
    pub fn distance_at(&self, a: usize, b: usize) -> f64 {
        self.pos[a].distance_miles(self.pos[b])
    }

    #[inline]
    fn adj_slice(&self, ix: usize) -> &[u32] {
        let start = self.adj_start[ix] as usize;
        let end   = self.adj_start[ix + 1] as usize;
        &self.adj[start..end]
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Collect raw nodes and ways, then call [`build`](Self::build).
///
/// Nodes and ways may be added in any order; references are only checked
/// at build time.
///
/// # Example
///
/// ```
/// use bm_core::{GeoPoint, NodeId, WayId};
/// use bm_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_node(NodeId(1), GeoPoint::new(37.870, -122.260));
/// b.add_node(NodeId(2), GeoPoint::new(37.871, -122.259));
/// b.add_node(NodeId(3), GeoPoint::new(37.875, -122.250)); // on no way
/// b.add_way(WayId(10), [NodeId(1), NodeId(2)]);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2); // node 3 pruned
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct RoadGraphBuilder {
    nodes:      FxHashMap<NodeId, RawNode>,
    duplicates: Vec<NodeId>,
    ways:       Vec<RawWay>,
}

struct RawNode {
    pos:  GeoPoint,
    name: Option<String>,
}

struct RawWay {
    id:   WayId,
    refs: Vec<NodeId>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:      FxHashMap::default(),
            duplicates: Vec::new(),
            ways:       Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and ways to reduce
    /// reallocations when bulk-loading from OSM.
    pub fn with_capacity(nodes: usize, ways: usize) -> Self {
        Self {
            nodes:      FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            duplicates: Vec::new(),
            ways:       Vec::with_capacity(ways),
        }
    }

    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint) {
        self.insert(id, RawNode { pos, name: None });
    }

    pub fn add_named_node(&mut self, id: NodeId, pos: GeoPoint, name: impl Into<String>) {
        self.insert(id, RawNode { pos, name: Some(name.into()) });
    }

    /// Add a way.  Each consecutive pair of `refs` becomes an undirected
    /// road segment.
    pub fn add_way(&mut self, id: WayId, refs: impl IntoIterator<Item = NodeId>) {
        self.ways.push(RawWay { id, refs: refs.into_iter().collect() });
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn way_count(&self) -> usize { self.ways.len() }

    fn insert(&mut self, id: NodeId, node: RawNode) {
        if self.nodes.insert(id, node).is_some() {
            self.duplicates.push(id);
        }
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Fails without producing a graph if a node id was added twice or a
    /// way references a node that was never added.  Segments that repeat a
    /// node (`a → a`) or duplicate an earlier segment collapse; nodes left
    /// with no neighbors are dropped.
    ///
    /// Time complexity: O(E log E) for segment dedup + O(N log N) for id
    /// ordering, where N = nodes, E = segments.
    pub fn build(self) -> GraphResult<RoadGraph> {
        if let Some(&id) = self.duplicates.first() {
            return Err(GraphError::DuplicateNode(id));
        }

        // Reject dangling references before touching anything else.
        for way in &self.ways {
            if let Some(&node) = way.refs.iter().find(|r| !self.nodes.contains_key(*r)) {
                return Err(GraphError::DanglingReference { way: way.id, node });
            }
        }

        // Normalized (low, high) segments, deduplicated.
        let mut segments: Vec<(NodeId, NodeId)> = self
            .ways
            .iter()
            .flat_map(|w| w.refs.windows(2))
            .filter(|pair| pair[0] != pair[1])
            .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
            .collect();
        segments.sort_unstable();
        segments.dedup();

        // Only nodes touched by a segment survive.
        let mut ids: Vec<NodeId> = segments.iter().flat_map(|&(a, b)| [a, b]).collect();
        ids.sort_unstable();
        ids.dedup();
        let pruned = self.nodes.len() - ids.len();

        let index: FxHashMap<NodeId, u32> = ids
            .iter()
            .enumerate()
            .map(|(ix, &id)| (id, ix as u32))
            .collect();

        // CSR row pointer from degrees.
        let node_count = ids.len();
        let mut adj_start = vec![0u32; node_count + 1];
        for (a, b) in &segments {
            adj_start[index[a] as usize + 1] += 1;
            adj_start[index[b] as usize + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }

        let mut fill = adj_start.clone();
        let mut adj = vec![0u32; segments.len() * 2];
        for (a, b) in &segments {
            let (ia, ib) = (index[a], index[b]);
            adj[fill[ia as usize] as usize] = ib;
            fill[ia as usize] += 1;
            adj[fill[ib as usize] as usize] = ia;
            fill[ib as usize] += 1;
        }
        for ix in 0..node_count {
            adj[adj_start[ix] as usize..adj_start[ix + 1] as usize].sort_unstable();
        }

        let mut nodes = self.nodes;
        let (pos, names): (Vec<GeoPoint>, Vec<Option<Box<str>>>) = ids
            .iter()
            .filter_map(|id| nodes.remove(id))
            .map(|n| (n.pos, n.name.map(String::into_boxed_str)))
            .unzip();
        debug_assert_eq!(pos.len(), node_count);

        debug!(
            "built road graph: {} nodes, {} segments from {} ways ({} isolated nodes pruned)",
            node_count,
            segments.len(),
            self.ways.len(),
            pruned,
        );

        Ok(RoadGraph { ids, pos, names, index, adj_start, adj })
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
