//! End-of-run report.

use std::fmt;

use payguard_engine::{Feature, FeatureTimings, StreamSummary};
use payguard_graph::RankedUser;
use payguard_records::LoadStats;
use serde::Serialize;

/// Read statistics for one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputReport {
    /// Valid records used
    pub records: usize,
    /// Lines skipped as malformed
    pub malformed: usize,
    /// The window cut the input short
    pub truncated: bool,
}

impl From<LoadStats> for InputReport {
    fn from(stats: LoadStats) -> Self {
        Self {
            records: stats.records,
            malformed: stats.malformed,
            truncated: stats.truncated,
        }
    }
}

/// Everything printed once the stream is done.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Batch file statistics
    pub history: InputReport,
    /// Stream file statistics
    pub stream: InputReport,
    /// Counters and final graph size
    pub summary: StreamSummary,
    /// Best-connected users, highest degree first
    pub top_users: Vec<RankedUser>,
    /// Mean microseconds per evaluated request, features 1..=3.
    pub avg_feature_micros: [Option<f64>; 3],
}

impl RunReport {
    /// Assemble the report once the stream is done.
    pub fn new(
        history: LoadStats,
        stream: LoadStats,
        summary: StreamSummary,
        top_users: Vec<RankedUser>,
        timings: &FeatureTimings,
    ) -> Self {
        let avg_feature_micros =
            Feature::ALL.map(|f| timings.average(f).map(|d| d.as_secs_f64() * 1e6));
        Self {
            history: history.into(),
            stream: stream.into(),
            summary,
            top_users,
            avg_feature_micros,
        }
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.summary.counters;

        write!(f, "Top {} users:", self.top_users.len())?;
        for ranked in &self.top_users {
            write!(f, " ({}, {})", ranked.user, ranked.degree)?;
        }
        writeln!(f)?;

        write!(f, "Non-trusted verdicts per feature:")?;
        for feature in Feature::ALL {
            write!(f, " {}={}", feature.number(), c.non_trusted(feature))?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Requests: {} (evaluated {}, unseen {}, self {})",
            c.requests, c.evaluated, c.unseen, c.self_payments
        )?;
        writeln!(
            f,
            "Graph: {} users, {} edges ({} added from {} accepted requests)",
            self.summary.nodes, self.summary.edges, c.edges_added, c.accepted
        )?;
        if self.history.malformed + self.stream.malformed > 0 {
            writeln!(
                f,
                "Malformed lines skipped: history {}, stream {}",
                self.history.malformed, self.stream.malformed
            )?;
        }
        Ok(())
    }
}
