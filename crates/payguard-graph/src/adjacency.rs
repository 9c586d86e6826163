//! Symmetric adjacency index.
//!
//! Maps every known user to the set of users they have transacted with.
//! The relation is undirected: inserting `a - b` records `b` under `a` and
//! `a` under `b` in the same call, so `knows(a, b) == knows(b, a)` always
//! holds. There is no removal; the index only grows.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::UserId;

fn empty_set() -> &'static HashSet<UserId> {
    static EMPTY: OnceLock<HashSet<UserId>> = OnceLock::new();
    EMPTY.get_or_init(HashSet::new)
}

/// Per-user neighbor sets.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    neighbors: HashMap<UserId, HashSet<UserId>>,
}

impl AdjacencyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            neighbors: HashMap::new(),
        }
    }

    /// Register a user with no neighbors. No-op if already known.
    pub fn add_node(&mut self, user: UserId) {
        self.neighbors.entry(user).or_default();
    }

    /// Record an undirected edge between `a` and `b`.
    ///
    /// Both endpoints become known. Returns `true` if the edge was new.
    /// A self-pair registers the user but never stores a self-edge.
    pub fn add_edge(&mut self, a: UserId, b: UserId) -> bool {
        if a == b {
            self.add_node(a);
            return false;
        }
        let inserted = self.neighbors.entry(a).or_default().insert(b);
        let mirrored = self.neighbors.entry(b).or_default().insert(a);
        debug_assert_eq!(inserted, mirrored, "adjacency lost symmetry at {a} - {b}");
        inserted
    }

    /// Neighbors of `user`, or an empty set if the user is unknown.
    pub fn neighbors(&self, user: UserId) -> &HashSet<UserId> {
        self.neighbors.get(&user).unwrap_or_else(|| empty_set())
    }

    /// Whether `a` and `b` have transacted directly.
    pub fn knows(&self, a: UserId, b: UserId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Whether `user` has any history at all.
    pub fn contains(&self, user: UserId) -> bool {
        self.neighbors.contains_key(&user)
    }

    /// Number of distinct neighbors of `user`.
    pub fn degree(&self, user: UserId) -> usize {
        self.neighbors(user).len()
    }

    /// Users adjacent to both `a` and `b`.
    pub fn common_neighbors(&self, a: UserId, b: UserId) -> impl Iterator<Item = UserId> + '_ {
        // Probe the larger set while walking the smaller one.
        let (small, large) = {
            let na = self.neighbors(a);
            let nb = self.neighbors(b);
            if na.len() <= nb.len() {
                (na, nb)
            } else {
                (nb, na)
            }
        };
        small.iter().filter(move |u| large.contains(*u)).copied()
    }

    /// Whether `a` and `b` share at least one neighbor.
    pub fn has_common_neighbor(&self, a: UserId, b: UserId) -> bool {
        self.common_neighbors(a, b).next().is_some()
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// All known users, in no particular order.
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.neighbors.keys().copied()
    }

    /// Every user paired with its neighbor set.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, &HashSet<UserId>)> {
        self.neighbors.iter().map(|(u, n)| (*u, n))
    }

    /// Sum of all degrees. Twice the undirected edge count.
    pub fn degree_sum(&self) -> usize {
        self.neighbors.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(id: i64) -> UserId {
        UserId(id)
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut index = AdjacencyIndex::new();
        assert!(index.add_edge(u(1), u(2)));

        assert!(index.knows(u(1), u(2)));
        assert!(index.knows(u(2), u(1)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut index = AdjacencyIndex::new();
        assert!(index.add_edge(u(1), u(2)));
        assert!(!index.add_edge(u(1), u(2)));
        assert!(!index.add_edge(u(2), u(1)));

        assert_eq!(index.degree(u(1)), 1);
        assert_eq!(index.degree_sum(), 2);
    }

    #[test]
    fn unknown_user_has_no_neighbors() {
        let index = AdjacencyIndex::new();
        assert!(index.neighbors(u(42)).is_empty());
        assert!(!index.contains(u(42)));
        assert!(!index.knows(u(42), u(1)));
        assert_eq!(index.degree(u(42)), 0);
    }

    #[test]
    fn self_pair_registers_without_edge() {
        let mut index = AdjacencyIndex::new();
        assert!(!index.add_edge(u(5), u(5)));

        assert!(index.contains(u(5)));
        assert!(!index.knows(u(5), u(5)));
        assert_eq!(index.degree_sum(), 0);
    }

    #[test]
    fn common_neighbors_is_intersection() {
        let mut index = AdjacencyIndex::new();
        index.add_edge(u(1), u(2));
        index.add_edge(u(2), u(3));
        index.add_edge(u(1), u(4));
        index.add_edge(u(4), u(3));
        index.add_edge(u(1), u(9));

        let mut common: Vec<_> = index.common_neighbors(u(1), u(3)).collect();
        common.sort();
        assert_eq!(common, vec![u(2), u(4)]);
        assert!(index.has_common_neighbor(u(1), u(3)));
        assert!(!index.has_common_neighbor(u(9), u(3)));
    }

    #[test]
    fn common_neighbors_with_unknown_user() {
        let mut index = AdjacencyIndex::new();
        index.add_edge(u(1), u(2));
        assert_eq!(index.common_neighbors(u(1), u(77)).count(), 0);
    }

    #[test]
    fn add_node_keeps_existing_neighbors() {
        let mut index = AdjacencyIndex::new();
        index.add_edge(u(1), u(2));
        index.add_node(u(1));
        assert!(index.knows(u(1), u(2)));
    }
}
