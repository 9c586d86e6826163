//! PayGuard Trust Graph
//!
//! Symmetric adjacency index and undirected trust graph built from historical
//! payments, with depth-bounded breadth-first path search.
//!
//! # Structure
//!
//! - [`AdjacencyIndex`]: `user -> set of users`, always symmetric, never shrinks
//! - [`TrustGraph`]: owns the index; node set == index key set by construction
//! - [`GraphSnapshot`]: detached, sorted node/edge listing for visualizers
//! - [`top_n_by_degree`]: ranking by first-degree connection count
//!
//! # Invariants
//!
//! - `knows(a, b) == knows(b, a)` after every mutation
//! - `node_count() == index().len()` at all times
//! - Edge count is non-decreasing

mod adjacency;
mod error;
mod graph;
mod ranking;
mod snapshot;
mod user;

pub use adjacency::AdjacencyIndex;
pub use error::{GraphError, Result};
pub use graph::{PathSearch, TrustGraph};
pub use ranking::{top_n_by_degree, RankedUser};
pub use snapshot::GraphSnapshot;
pub use user::UserId;

/// Maximum hop count for the bounded-path trust check in the reference policy.
pub const DEFAULT_MAX_DEPTH: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(max_id: i64, max_len: usize) -> impl Strategy<Value = Vec<(UserId, UserId)>> {
        prop::collection::vec((0..max_id, 0..max_id), 0..max_len)
            .prop_map(|v| v.into_iter().map(|(a, b)| (UserId(a), UserId(b))).collect())
    }

    proptest! {
        #[test]
        fn adjacency_stays_symmetric(edges in pairs(40, 120)) {
            let graph = TrustGraph::bulk_load(edges.iter().copied());
            for (a, b) in &edges {
                prop_assert_eq!(graph.index().knows(*a, *b), graph.index().knows(*b, *a));
            }
            prop_assert!(graph.is_consistent());
        }

        #[test]
        fn nodes_mirror_index_keys(edges in pairs(40, 120)) {
            let graph = TrustGraph::bulk_load(edges.iter().copied());
            prop_assert_eq!(graph.node_count(), graph.index().len());
            for (a, b) in &edges {
                prop_assert!(graph.has_node(*a));
                prop_assert!(graph.has_node(*b));
            }
        }

        #[test]
        fn edge_count_never_decreases(base in pairs(30, 60), extra in pairs(30, 60)) {
            let mut graph = TrustGraph::bulk_load(base);
            let mut last = graph.edge_count();
            for (a, b) in extra {
                graph.add_edge(a, b);
                prop_assert!(graph.edge_count() >= last);
                last = graph.edge_count();
            }
        }

        #[test]
        fn found_length_respects_bound(edges in pairs(25, 60), depth in 0usize..6) {
            let graph = TrustGraph::bulk_load(edges.iter().copied());
            for (a, b) in &edges {
                match graph.bounded_shortest_path_length(*a, *b, depth) {
                    Ok(PathSearch::Found(len)) => prop_assert!(len <= depth),
                    Ok(PathSearch::NotWithinBound) => prop_assert!(depth == 0 && a != b),
                    Err(e) => prop_assert!(false, "endpoint missing: {}", e),
                }
            }
        }

        #[test]
        fn direct_edge_is_length_one(edges in pairs(25, 60)) {
            let graph = TrustGraph::bulk_load(edges.iter().copied());
            for (a, b) in edges.iter().filter(|(a, b)| a != b) {
                prop_assert_eq!(
                    graph.bounded_shortest_path_length(*a, *b, DEFAULT_MAX_DEPTH),
                    Ok(PathSearch::Found(1))
                );
            }
        }
    }
}
