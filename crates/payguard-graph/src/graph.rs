//! The trust graph.
//!
//! Undirected graph of users connected by historical or accepted payments.
//! The graph owns a single [`AdjacencyIndex`]; its node set is the index key
//! set, so node membership and neighbor sets can never drift apart.
//!
//! # Lifecycle
//!
//! 1. Built once from a window of historical payments with [`TrustGraph::bulk_load`]
//! 2. Grown one edge at a time by the stream processor via [`TrustGraph::add_edge`]
//! 3. Never shrinks

use std::collections::{HashSet, VecDeque};

use crate::error::{GraphError, Result};
use crate::{AdjacencyIndex, UserId};

/// Outcome of a depth-bounded shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSearch {
    /// A shortest path of this many hops exists within the bound.
    Found(usize),
    /// The search exhausted every node within the bound without reaching the
    /// target. A longer path may still exist.
    NotWithinBound,
}

impl PathSearch {
    /// Path length, if one was found.
    pub const fn length(self) -> Option<usize> {
        match self {
            PathSearch::Found(len) => Some(len),
            PathSearch::NotWithinBound => None,
        }
    }

    /// Whether a path was found.
    pub const fn is_found(self) -> bool {
        matches!(self, PathSearch::Found(_))
    }
}

/// Undirected user graph.
#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    index: AdjacencyIndex,
    edges: usize,
}

impl TrustGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from payment pairs.
    ///
    /// Nodes are the union of all endpoints; every pair becomes an edge.
    /// Duplicate pairs (in either direction) collapse into one edge.
    pub fn bulk_load<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (UserId, UserId)>,
    {
        let mut graph = Self::new();
        for (a, b) in pairs {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Record an edge, adding either endpoint as a node if absent.
    ///
    /// Returns `true` if the edge is new.
    pub fn add_edge(&mut self, a: UserId, b: UserId) -> bool {
        let added = self.index.add_edge(a, b);
        if added {
            self.edges += 1;
        }
        added
    }

    /// Whether `user` is a node.
    pub fn has_node(&self, user: UserId) -> bool {
        self.index.contains(user)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Read-only view of the neighbor sets.
    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    /// Check the node/edge bookkeeping against the adjacency index.
    ///
    /// Cost is linear in the graph size. Used for the sanity checks logged
    /// around the streaming phase.
    pub fn is_consistent(&self) -> bool {
        self.index.degree_sum() == self.edges * 2
            && self
                .index
                .iter()
                .all(|(user, neighbors)| neighbors.iter().all(|n| self.index.knows(*n, user)))
    }

    /// Length of the shortest path from `from` to `to`, if it has at most
    /// `max_depth` hops.
    ///
    /// Breadth-first from `from`; nodes at depth `max_depth` are never
    /// expanded, so the cost is bounded by the size of the `max_depth`-ball
    /// around `from` regardless of total graph size. `from == to` yields
    /// `Found(0)`.
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is not a node.
    pub fn bounded_shortest_path_length(
        &self,
        from: UserId,
        to: UserId,
        max_depth: usize,
    ) -> Result<PathSearch> {
        for endpoint in [from, to] {
            if !self.has_node(endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        if from == to {
            return Ok(PathSearch::Found(0));
        }

        let mut visited: HashSet<UserId> = HashSet::new();
        let mut queue: VecDeque<(UserId, usize)> = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 0));

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for &next in self.index.neighbors(node) {
                if next == to {
                    return Ok(PathSearch::Found(depth + 1));
                }
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        Ok(PathSearch::NotWithinBound)
    }
}
