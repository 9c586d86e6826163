//! PayGuard Trust Engine
//!
//! Decides, for each live payment request, whether it can be auto-approved
//! (`trusted`) or must be held for review (`unverified`), using three
//! independent predicates over the trust graph.
//!
//! # Features
//!
//! 1. **Direct link**: payer and payee have transacted before
//! 2. **Shared neighbor**: direct link, or they have a counterparty in common
//! 3. **Bounded path**: they are connected within `max_depth` hops (4 by default)
//!
//! # Feedback Rule
//!
//! Only a feature-3 acceptance adds the `(from, to)` edge to the graph.
//! Requests are processed strictly in arrival order because later verdicts,
//! on every channel, depend on edges added by earlier acceptances.
//!
//! # Example
//!
//! ```
//! use payguard_engine::{EnginePolicy, PaymentRequest, StreamProcessor, Verdict};
//! use payguard_graph::{TrustGraph, UserId};
//!
//! let history = [(UserId(1), UserId(2)), (UserId(2), UserId(3))];
//! let mut processor = StreamProcessor::new(TrustGraph::bulk_load(history), EnginePolicy::default());
//!
//! let outcome = processor.process(PaymentRequest::new(UserId(1), UserId(3)));
//! assert_eq!(outcome.verdicts.0, [Verdict::Unverified, Verdict::Trusted, Verdict::Trusted]);
//! assert!(processor.graph().index().knows(UserId(1), UserId(3)));
//! ```

mod counters;
mod error;
pub mod features;
mod policy;
mod processor;
mod request;
mod sink;
mod verdict;

pub use counters::{Counters, FeatureTimings, StreamSummary};
pub use error::{EngineError, Result};
pub use features::PathVerdict;
pub use policy::{EnginePolicy, DEFAULT_PROGRESS_INTERVAL};
pub use processor::{RequestOutcome, Route, StreamProcessor};
pub use request::PaymentRequest;
pub use sink::{ChannelWriters, VerdictSink};
pub use verdict::{Feature, TokenStyle, Verdict, Verdicts};

#[cfg(test)]
mod tests {
    use super::*;
    use payguard_graph::{TrustGraph, UserId};
    use proptest::prelude::*;

    fn pairs(max_id: i64, max_len: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((0..max_id, 0..max_id), 0..max_len)
    }

    fn processor(history: &[(i64, i64)]) -> StreamProcessor {
        let graph = TrustGraph::bulk_load(history.iter().map(|&(a, b)| (UserId(a), UserId(b))));
        StreamProcessor::new(graph, EnginePolicy::default())
    }

    fn req((a, b): (i64, i64)) -> PaymentRequest {
        PaymentRequest::new(UserId(a), UserId(b))
    }

    proptest! {
        #[test]
        fn edges_never_decrease(history in pairs(30, 40), stream in pairs(35, 80)) {
            let mut p = processor(&history);
            let mut edges = p.graph().edge_count();
            for r in stream {
                p.process(req(r));
                prop_assert!(p.graph().edge_count() >= edges);
                edges = p.graph().edge_count();
            }
        }

        #[test]
        fn accepted_edges_are_symmetric(history in pairs(30, 40), stream in pairs(30, 80)) {
            let mut p = processor(&history);
            for r in stream {
                let request = req(r);
                if p.process(request).accepted {
                    let index = p.graph().index();
                    prop_assert!(index.knows(request.from, request.to));
                    prop_assert!(index.knows(request.to, request.from));
                }
            }
            prop_assert!(p.graph().is_consistent());
        }

        #[test]
        fn self_payments_are_trusted_and_inert(history in pairs(20, 40), user in 0i64..20) {
            let mut p = processor(&history);
            let edges = p.graph().edge_count();
            let outcome = p.process(req((user, user)));
            if p.graph().has_node(UserId(user)) {
                prop_assert_eq!(outcome.verdicts, Verdicts::uniform(Verdict::Trusted));
            }
            prop_assert_eq!(p.graph().edge_count(), edges);
        }

        #[test]
        fn unseen_endpoints_are_inert(history in pairs(20, 40), known in 0i64..20, stranger in 100i64..200) {
            let mut p = processor(&history);
            let nodes = p.graph().node_count();
            let edges = p.graph().edge_count();

            for r in [(known, stranger), (stranger, known)] {
                let outcome = p.process(req(r));
                prop_assert_eq!(outcome.route, Route::Unseen);
                prop_assert_eq!(outcome.verdicts, Verdicts::uniform(Verdict::Unseen));
            }
            prop_assert_eq!(p.graph().node_count(), nodes);
            prop_assert_eq!(p.graph().edge_count(), edges);
        }

        #[test]
        fn feature_ordering_holds(history in pairs(25, 50), stream in pairs(25, 60)) {
            let mut p = processor(&history);
            for r in stream {
                let outcome = p.process(req(r));
                let direct = outcome.verdicts.get(Feature::DirectLink);
                let shared = outcome.verdicts.get(Feature::SharedNeighbor);
                if direct.is_trusted() {
                    prop_assert!(shared.is_trusted());
                }
                if outcome.route == Route::Evaluated && outcome.path_length == Some(1) {
                    prop_assert!(direct.is_trusted());
                }
            }
        }

        #[test]
        fn verdicts_for_a_pair_only_improve(history in pairs(20, 40), stream in pairs(20, 60), pair in (0i64..20, 0i64..20)) {
            let mut p = processor(&history);
            let pair = req(pair);
            let mut last = [false; 2];
            for r in stream {
                p.process(req(r));
                let index = p.graph().index();
                let now = [
                    features::direct_link(index, pair).is_trusted(),
                    features::shared_neighbor(index, pair).is_trusted(),
                ];
                prop_assert!(now[0] >= last[0] && now[1] >= last[1]);
                last = now;
            }
        }
    }
}
