//! The three trust predicates.
//!
//! Each evaluator is a pure read of the current graph. None of them mutates
//! anything; the stream processor decides what to do with the bounded-path
//! result.
//!
//! Callers are expected to have handled unseen endpoints and self-payments
//! already. The evaluators still behave sensibly on such input (unknown
//! users have no neighbors; the path search reports them as errors).

use payguard_graph::{AdjacencyIndex, GraphError, PathSearch, TrustGraph};

use crate::{PaymentRequest, Verdict};

/// Feature 1: payer and payee have transacted before.
pub fn direct_link(index: &AdjacencyIndex, request: PaymentRequest) -> Verdict {
    Verdict::from_check(index.knows(request.from, request.to))
}

/// Feature 2: direct link, or payer and payee have a neighbor in common.
pub fn shared_neighbor(index: &AdjacencyIndex, request: PaymentRequest) -> Verdict {
    Verdict::from_check(
        index.knows(request.from, request.to)
            || index.has_common_neighbor(request.from, request.to),
    )
}

/// Result of the bounded-path feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathVerdict {
    /// `Trusted` iff a path of at most `max_depth` hops exists.
    pub verdict: Verdict,
    /// The underlying search outcome.
    pub search: PathSearch,
}

/// Feature 3: payer and payee are connected within `max_depth` hops.
///
/// Returns the graph error unchanged if an endpoint is not a node, so the
/// caller can tell "no path within bound" apart from inconsistent input.
pub fn bounded_path(
    graph: &TrustGraph,
    request: PaymentRequest,
    max_depth: usize,
) -> Result<PathVerdict, GraphError> {
    let search = graph.bounded_shortest_path_length(request.from, request.to, max_depth)?;
    let verdict = match search {
        PathSearch::Found(len) => Verdict::from_check(len <= max_depth),
        PathSearch::NotWithinBound => Verdict::Unverified,
    };
    Ok(PathVerdict { verdict, search })
}
