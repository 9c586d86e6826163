//! Top-N ranking by first-degree connection count.

use crate::{AdjacencyIndex, UserId};

/// A user with its neighbor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedUser {
    /// The user
    pub user: UserId,
    /// Number of distinct neighbors
    pub degree: usize,
}

/// The `n` users with the most neighbors, highest first.
///
/// Ties are broken by ascending user id so the ranking is deterministic.
pub fn top_n_by_degree(index: &AdjacencyIndex, n: usize) -> Vec<RankedUser> {
    let mut ranked: Vec<RankedUser> = index
        .iter()
        .map(|(user, neighbors)| RankedUser {
            user,
            degree: neighbors.len(),
        })
        .collect();

    ranked.sort_unstable_by(|a, b| b.degree.cmp(&a.degree).then(a.user.cmp(&b.user)));
    ranked.truncate(n);
    ranked
}
