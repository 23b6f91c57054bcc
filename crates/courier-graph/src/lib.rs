//! `courier-graph` — the routing view of the city and route registries.
//!
//! # Design
//!
//! The graph is a disposable derivation: [`RouteGraph::rebuild`] throws away
//! all nodes and edges and re-materializes them from the current registry
//! contents.  Nothing edits the graph incrementally (apart from the cosmetic
//! node-drag helper), so it can never drift out of sync for longer than the
//! gap between a registry mutation and the next rebuild.  Route records that
//! do not resolve against the city registry during that gap are simply
//! skipped, not errors.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`graph`]    | `RouteGraph`, `MapNode`, `LinkView`, rebuild        |
//! | [`dijkstra`] | `shortest_path`, `next_hop`, `RoutePath`            |
//! | [`layout`]   | force-directed canvas layout pass                   |
//! | [`error`]    | `GraphError`, `GraphResult`                         |

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod layout;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dijkstra::RoutePath;
pub use error::{GraphError, GraphResult};
pub use graph::{LinkView, MapNode, RebuildSummary, RouteGraph};
pub use layout::DEFAULT_LAYOUT_ITERATIONS;
