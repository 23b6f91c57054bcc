//! Route graph representation and rebuild.
//!
//! # Data layout
//!
//! Nodes live in an arena `Vec<MapNode>`; a node's position in that arena is
//! its [`NodeIdx`] for the lifetime of one rebuild.  Adjacency is one
//! `Vec<RouteEdge>` per node.  A name→index `FxHashMap` (keys are short
//! city names, hashed constantly during rebuild and queries) resolves the
//! string endpoints the registries speak in.
//!
//! Every undirected route record becomes two directed edges, so Dijkstra
//! never needs to know about undirectedness.

use rustc_hash::FxHashMap;
use tracing::warn;

use courier_core::{CityId, LayoutPoint, NodeIdx};
use courier_registry::{split_route_key, CityRegistry, RouteRegistry};

/// Canvas point new nodes are spread around.
pub(crate) const CANVAS_CENTER: LayoutPoint = LayoutPoint { x: 400.0, y: 300.0 };
/// Radius of the initial placement circle.
const SPREAD_RADIUS: f32 = 250.0;

// ── Node and edge data ────────────────────────────────────────────────────────

/// One city as the graph sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub id: CityId,
    pub name: String,
    pub pos: LayoutPoint,
}

/// One directed edge out of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RouteEdge {
    pub to: NodeIdx,
    pub weight: u32,
    pub blocked: bool,
}

/// One undirected link, reported once (lower arena index first) by
/// [`RouteGraph::links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkView {
    pub a: NodeIdx,
    pub b: NodeIdx,
    pub weight: u32,
    pub blocked: bool,
}

/// What a rebuild produced, for logging and sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RebuildSummary {
    /// Nodes materialized.
    pub cities: usize,
    /// Undirected links materialized (directed edge count is double this).
    pub links: usize,
    /// Route records dropped: malformed key or an endpoint not in the city
    /// registry.
    pub skipped: usize,
}

// ── RouteGraph ────────────────────────────────────────────────────────────────

/// The routing and visualization view of the registries.
///
/// Starts empty; call [`rebuild`](Self::rebuild) after any registry mutation.
#[derive(Default)]
pub struct RouteGraph {
    nodes: Vec<MapNode>,
    adjacency: Vec<Vec<RouteEdge>>,
    by_name: FxHashMap<String, NodeIdx>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw away all graph state and re-derive it from the registries.
    ///
    /// City positions are taken from the registry; a record still carrying
    /// the unset sentinel is placed on a circle around the canvas center
    /// (stable across rebuilds, since slot order and count drive the angle).
    /// Route records whose key does not parse, or whose endpoints are not
    /// both registered cities, are counted in `skipped` and logged; a stale
    /// record is a transient condition, never a failure.
    pub fn rebuild(&mut self, cities: &CityRegistry, routes: &RouteRegistry) -> RebuildSummary {
        self.nodes.clear();
        self.adjacency.clear();
        self.by_name.clear();

        let active = cities.active_count();
        let angle_step = if active > 0 {
            std::f32::consts::TAU / active as f32
        } else {
            0.0
        };

        for (slot, record) in cities.iter().enumerate() {
            let pos = if record.pos.is_unset() {
                let angle = slot as f32 * angle_step;
                LayoutPoint::new(
                    CANVAS_CENTER.x + SPREAD_RADIUS * angle.cos(),
                    CANVAS_CENTER.y + SPREAD_RADIUS * angle.sin(),
                )
            } else {
                record.pos
            };
            let idx = NodeIdx(self.nodes.len() as u32);
            self.nodes.push(MapNode { id: record.id, name: record.name.clone(), pos });
            self.adjacency.push(Vec::new());
            self.by_name.insert(record.name.clone(), idx);
        }

        let mut summary = RebuildSummary { cities: self.nodes.len(), ..Default::default() };

        for record in routes.iter() {
            let (a, b) = match split_route_key(&record.key) {
                Ok(pair) => pair,
                Err(_) => {
                    warn!(key = %record.key, "skipping malformed route key");
                    summary.skipped += 1;
                    continue;
                }
            };
            let (Some(&ia), Some(&ib)) = (self.by_name.get(a), self.by_name.get(b)) else {
                warn!(key = %record.key, "skipping route with unregistered endpoint");
                summary.skipped += 1;
                continue;
            };
            self.push_edge(ia, ib, record.distance, record.blocked);
            self.push_edge(ib, ia, record.distance, record.blocked);
            summary.links += 1;
        }

        summary
    }

    fn push_edge(&mut self, from: NodeIdx, to: NodeIdx, weight: u32, blocked: bool) {
        debug_assert!(
            from.index() < self.nodes.len() && to.index() < self.nodes.len(),
            "edge endpoints must be arena indices from this rebuild"
        );
        self.adjacency[from.index()].push(RouteEdge { to, weight, blocked });
    }

    // ── Read accessors ────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn node_idx(&self, name: &str) -> Option<NodeIdx> {
        self.by_name.get(name).copied()
    }

    pub fn node(&self, name: &str) -> Option<&MapNode> {
        self.node_idx(name).map(|idx| &self.nodes[idx.index()])
    }

    /// Each undirected link once, lower arena index first.
    pub fn links(&self) -> impl Iterator<Item = LinkView> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, edges)| {
            edges
                .iter()
                .filter(move |edge| from < edge.to.index())
                .map(move |edge| LinkView {
                    a: NodeIdx(from as u32),
                    b: edge.to,
                    weight: edge.weight,
                    blocked: edge.blocked,
                })
        })
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.links().count()
    }

    /// Move one node on the canvas without a rebuild (drag-and-drop).
    ///
    /// Returns `false` when the name is not in the current graph (e.g. the
    /// city was registered after the last rebuild); the caller's next refresh
    /// will pick the position up from the registry instead.
    pub fn set_node_position(&mut self, name: &str, pos: LayoutPoint) -> bool {
        match self.by_name.get(name) {
            Some(&idx) => {
                self.nodes[idx.index()].pos = pos;
                true
            }
            None => false,
        }
    }

    // ── Crate-internal traversal used by dijkstra/layout ──────────────────

    pub(crate) fn out_edges(&self, node: NodeIdx) -> &[RouteEdge] {
        &self.adjacency[node.index()]
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [MapNode] {
        &mut self.nodes
    }
}
