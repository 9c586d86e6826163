//! Aggregate counters and timings.
//!
//! Reporting only. Nothing in here feeds back into a decision.

use std::time::Duration;

use crate::{Feature, RequestOutcome, Route};

/// Tallies accumulated over the whole stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// Requests processed.
    pub requests: u64,
    /// Requests with at least one endpoint lacking history.
    pub unseen: u64,
    /// Requests where payer == payee.
    pub self_payments: u64,
    /// Requests that ran the three features.
    pub evaluated: u64,
    /// Requests the bounded-path feature trusted.
    pub accepted: u64,
    /// Edges those acceptances added to the graph.
    pub edges_added: u64,
    /// Bounded-path searches that failed on inconsistent graph state.
    pub graph_errors: u64,
    /// Non-trusted verdicts per feature, unseen verdicts included.
    pub non_trusted: [u64; 3],
}

impl Counters {
    /// Non-trusted verdicts emitted on one channel.
    pub const fn non_trusted(&self, feature: Feature) -> u64 {
        self.non_trusted[feature.slot()]
    }

    /// Fold one request's outcome into the tallies.
    pub fn record(&mut self, outcome: &RequestOutcome) {
        self.requests += 1;
        match outcome.route {
            Route::Unseen => self.unseen += 1,
            Route::SelfPayment => self.self_payments += 1,
            Route::Evaluated => self.evaluated += 1,
        }
        if outcome.accepted {
            self.accepted += 1;
        }
        if outcome.edge_added {
            self.edges_added += 1;
        }
        if outcome.graph_error {
            self.graph_errors += 1;
        }
        for (feature, verdict) in outcome.verdicts.iter() {
            if !verdict.is_trusted() {
                self.non_trusted[feature.slot()] += 1;
            }
        }
    }
}

/// Wall time spent inside each feature evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureTimings {
    total: [Duration; 3],
    samples: u64,
}

impl FeatureTimings {
    /// Add one evaluated request's per-feature durations.
    pub fn add(&mut self, durations: [Duration; 3]) {
        for (total, d) in self.total.iter_mut().zip(durations) {
            *total += d;
        }
        self.samples += 1;
    }

    /// Cumulative time in one feature.
    pub fn total(&self, feature: Feature) -> Duration {
        self.total[feature.slot()]
    }

    /// Mean time per evaluated request, or `None` before any sample.
    pub fn average(&self, feature: Feature) -> Option<Duration> {
        let samples = u32::try_from(self.samples).ok().filter(|n| *n > 0)?;
        Some(self.total(feature) / samples)
    }

    /// Number of evaluated requests timed.
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

/// Final state of a completed stream run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamSummary {
    /// Counter snapshot at termination.
    pub counters: Counters,
    /// Graph nodes at termination.
    pub nodes: usize,
    /// Graph edges at termination.
    pub edges: usize,
}
