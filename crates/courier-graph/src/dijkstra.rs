//! Shortest-path queries over the route graph.
//!
//! # Cost model
//!
//! Edge weights are the registered route distances (`u32`, non-negative by
//! construction), summed with saturating adds.  Blocked edges are not
//! relaxed at all; a closure is indistinguishable from the road not
//! existing until it is lifted and the graph rebuilt.
//!
//! Every query runs from scratch on per-query scratch arrays; nothing is
//! cached between calls, so a query can never observe a stale closure.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use courier_core::NodeIdx;

use crate::error::{GraphError, GraphResult};
use crate::graph::RouteGraph;

/// The result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    /// Sum of edge weights along `cities`.
    pub total_distance: u32,
    /// City names from source to destination inclusive.  A trivial query
    /// (`from == to`) yields one element.
    pub cities: Vec<String>,
}

impl RoutePath {
    /// Number of hops (edges) along the path.
    pub fn hop_count(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }
}

impl RouteGraph {
    /// Cheapest open path between two cities.
    ///
    /// Ties are broken by arena index, so repeated queries over an unchanged
    /// graph return the same path.
    pub fn shortest_path(&self, from: &str, to: &str) -> GraphResult<RoutePath> {
        let start = self
            .node_idx(from)
            .ok_or_else(|| GraphError::UnknownCity(from.to_owned()))?;
        let goal = self
            .node_idx(to)
            .ok_or_else(|| GraphError::UnknownCity(to.to_owned()))?;

        if start == goal {
            return Ok(RoutePath { total_distance: 0, cities: vec![from.to_owned()] });
        }

        let n = self.node_count();
        // dist[v] = best known distance to v.
        let mut dist = vec![u32::MAX; n];
        // prev[v] = node that reached v; NodeIdx::INVALID for unreached nodes.
        let mut prev = vec![NodeIdx::INVALID; n];

        dist[start.index()] = 0;

        // Min-heap: (distance, node). Reverse makes BinaryHeap (max) behave as
        // min-heap. Secondary key NodeIdx ensures deterministic tie-breaking.
        let mut heap: BinaryHeap<Reverse<(u32, NodeIdx)>> = BinaryHeap::new();
        heap.push(Reverse((0, start)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if node == goal {
                return Ok(self.reconstruct(&prev, goal, cost));
            }

            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }

            for edge in self.out_edges(node) {
                if edge.blocked {
                    continue;
                }
                let new_cost = cost.saturating_add(edge.weight);
                if new_cost < dist[edge.to.index()] {
                    dist[edge.to.index()] = new_cost;
                    prev[edge.to.index()] = node;
                    heap.push(Reverse((new_cost, edge.to)));
                }
            }
        }

        Err(GraphError::NoPath { from: from.to_owned(), to: to.to_owned() })
    }

    /// The city a package at `from` should move to next on its way to `to`.
    ///
    /// `Some(from)` when already at the destination; `None` when either city
    /// is unknown or no open path exists.  Always computed from a fresh
    /// shortest path, so the answer tracks closures immediately.
    pub fn next_hop(&self, from: &str, to: &str) -> Option<String> {
        if from == to {
            return self.contains(from).then(|| from.to_owned());
        }
        match self.shortest_path(from, to) {
            Ok(path) => path.cities.into_iter().nth(1),
            Err(_) => None,
        }
    }

    fn reconstruct(&self, prev: &[NodeIdx], goal: NodeIdx, total: u32) -> RoutePath {
        let mut cities = Vec::new();
        let mut cur = goal;
        loop {
            cities.push(self.nodes()[cur.index()].name.clone());
            let p = prev[cur.index()];
            if p == NodeIdx::INVALID {
                break;
            }
            cur = p;
        }
        cities.reverse();
        RoutePath { total_distance: total, cities }
    }
}
