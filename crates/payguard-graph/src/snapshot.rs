//! Read-only graph snapshots for external visualizers.
//!
//! A snapshot is a plain, sorted node/edge listing detached from the live
//! graph. Renderers consume it without depending on this crate's internals.

use std::collections::BTreeSet;

use crate::{TrustGraph, UserId};

/// Detached copy of (part of) the trust graph.
///
/// Nodes are sorted ascending; each edge appears once as `(low, high)`,
/// sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    /// The nodes included in the snapshot.
    pub nodes: Vec<UserId>,
    /// Undirected edges, lower id first.
    pub edges: Vec<(UserId, UserId)>,
}

impl GraphSnapshot {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn ordered(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl TrustGraph {
    /// Snapshot of the whole graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<UserId> = self.index().users().collect();
        nodes.sort_unstable();

        let edges: BTreeSet<(UserId, UserId)> = self
            .index()
            .iter()
            .flat_map(|(user, neighbors)| neighbors.iter().map(move |&n| ordered(user, n)))
            .collect();

        GraphSnapshot {
            nodes,
            edges: edges.into_iter().collect(),
        }
    }

    /// Snapshot of the neighborhood around `centers`.
    ///
    /// Includes every known center, each center's neighbors, and every edge
    /// incident to a center. Unknown centers are ignored. This is the subgraph
    /// used to render the top-N users with their first-degree connections.
    pub fn neighborhood(&self, centers: &[UserId]) -> GraphSnapshot {
        let mut nodes: BTreeSet<UserId> = BTreeSet::new();
        let mut edges: BTreeSet<(UserId, UserId)> = BTreeSet::new();

        for &center in centers.iter().filter(|c| self.has_node(**c)) {
            nodes.insert(center);
            for &n in self.index().neighbors(center) {
                nodes.insert(n);
                edges.insert(ordered(center, n));
            }
        }

        GraphSnapshot {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }
}
