//! The stream processor.
//!
//! Evaluates payment requests one at a time, strictly in arrival order,
//! against a trust graph it owns exclusively.
//!
//! # Per-request state machine
//!
//! ```text
//! classify endpoints ──┬── either unknown ──> Unseen x3, no mutation
//!                      ├── from == to ──────> Trusted x3, no mutation
//!                      └── evaluate:
//!                            feature 1 (direct link)     ┐ same pre-mutation
//!                            feature 2 (shared neighbor) │ snapshot
//!                            feature 3 (bounded path)    ┘
//!                            feature 3 trusted ──> add edge (from, to)
//! ```
//!
//! # Feedback
//!
//! Only a bounded-path acceptance grows the graph. Features 1 and 2 never
//! add edges, but they read the same adjacency index, so their verdicts on
//! later requests can improve because of earlier bounded-path acceptances.
//! Ordering is therefore part of the result: reordering the stream can change
//! the verdicts.

use std::time::Instant;

use payguard_graph::TrustGraph;
use tracing::{debug, info, warn};

use crate::counters::{Counters, FeatureTimings, StreamSummary};
use crate::error::Result;
use crate::features;
use crate::sink::VerdictSink;
use crate::{EnginePolicy, Feature, PaymentRequest, Verdict, Verdicts};

/// Which branch of the state machine a request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Route {
    /// At least one endpoint had no history.
    Unseen,
    /// Payer and payee were the same user.
    SelfPayment,
    /// All three features ran.
    Evaluated,
}

/// Everything that happened to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestOutcome {
    /// Branch taken.
    pub route: Route,
    /// One verdict per feature.
    pub verdicts: Verdicts,
    /// Shortest path length found by feature 3, if any.
    pub path_length: Option<usize>,
    /// Feature 3 trusted the request.
    pub accepted: bool,
    /// The acceptance added a new edge (false if the edge already existed).
    pub edge_added: bool,
    /// Feature 3 hit inconsistent graph state and fell back to `Unverified`.
    pub graph_error: bool,
}

impl RequestOutcome {
    fn short_circuit(route: Route, verdict: Verdict) -> Self {
        Self {
            route,
            verdicts: Verdicts::uniform(verdict),
            path_length: None,
            accepted: false,
            edge_added: false,
            graph_error: false,
        }
    }
}

/// Serialized evaluation loop over a request stream.
#[derive(Debug)]
pub struct StreamProcessor {
    graph: TrustGraph,
    policy: EnginePolicy,
    counters: Counters,
    timings: FeatureTimings,
}

impl StreamProcessor {
    /// Take ownership of a bulk-loaded graph.
    pub fn new(graph: TrustGraph, policy: EnginePolicy) -> Self {
        Self {
            graph,
            policy,
            counters: Counters::default(),
            timings: FeatureTimings::default(),
        }
    }

    /// Evaluate one request and apply the mutation rule.
    pub fn process(&mut self, request: PaymentRequest) -> RequestOutcome {
        let outcome = if !self.graph.has_node(request.from) || !self.graph.has_node(request.to) {
            RequestOutcome::short_circuit(Route::Unseen, Verdict::Unseen)
        } else if request.is_self_payment() {
            RequestOutcome::short_circuit(Route::SelfPayment, Verdict::Trusted)
        } else {
            self.evaluate(request)
        };

        self.counters.record(&outcome);
        if outcome.route == Route::Evaluated
            && self.policy.progress_interval > 0
            && self.counters.evaluated % self.policy.progress_interval == 0
        {
            debug!("Processed {} payments", self.counters.evaluated);
        }
        outcome
    }

    fn evaluate(&mut self, request: PaymentRequest) -> RequestOutcome {
        let index = self.graph.index();

        let start = Instant::now();
        let direct = features::direct_link(index, request);
        let after_direct = Instant::now();
        let shared = features::shared_neighbor(index, request);
        let after_shared = Instant::now();

        let (bounded, path_length, graph_error) =
            match features::bounded_path(&self.graph, request, self.policy.max_depth) {
                Ok(path) => (path.verdict, path.search.length(), false),
                Err(e) => {
                    warn!(from = %request.from, to = %request.to, "bounded path search failed: {}", e);
                    (Verdict::Unverified, None, true)
                }
            };
        let after_bounded = Instant::now();

        self.timings.add([
            after_direct - start,
            after_shared - after_direct,
            after_bounded - after_shared,
        ]);

        let accepted = bounded.is_trusted();
        let edge_added = accepted && self.graph.add_edge(request.from, request.to);

        RequestOutcome {
            route: Route::Evaluated,
            verdicts: Verdicts([direct, shared, bounded]),
            path_length,
            accepted,
            edge_added,
            graph_error,
        }
    }

    /// Drive a whole stream in order, emitting every verdict to `sink`.
    ///
    /// Stops early only if the sink fails.
    pub fn run<I, S>(&mut self, requests: I, sink: &mut S) -> Result<StreamSummary>
    where
        I: IntoIterator,
        I::Item: Into<PaymentRequest>,
        S: VerdictSink + ?Sized,
    {
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            max_depth = self.policy.max_depth,
            "Processing payments"
        );

        for request in requests {
            let outcome = self.process(request.into());
            for (feature, verdict) in outcome.verdicts.iter() {
                sink.emit(feature, verdict)?;
            }
        }
        sink.flush()?;

        let summary = self.summary();
        info!(
            requests = summary.counters.requests,
            accepted = summary.counters.accepted,
            edges_added = summary.counters.edges_added,
            "Done processing payments"
        );
        info!(
            "Sanity check, graph consistent: {}",
            self.graph.node_count() == self.graph.index().len() && self.graph.is_consistent()
        );
        for feature in Feature::ALL {
            if let Some(avg) = self.timings.average(feature) {
                debug!("Avg. time in {}: {:?}", feature, avg);
            }
        }
        Ok(summary)
    }

    /// Counter snapshot plus graph size.
    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            counters: self.counters,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
        }
    }

    /// Read-only view of the graph between requests.
    pub fn graph(&self) -> &TrustGraph {
        &self.graph
    }

    /// Give the graph back once streaming is over.
    pub fn into_graph(self) -> TrustGraph {
        self.graph
    }

    /// Counters so far.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Per-feature timings so far.
    pub fn timings(&self) -> &FeatureTimings {
        &self.timings
    }

    /// The active policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }
}
