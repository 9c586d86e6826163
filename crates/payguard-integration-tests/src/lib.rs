//! Fixtures for end-to-end tests.
//!
//! A [`Fixture`] is a temporary directory holding a history file, a stream
//! file and the three verdict outputs, wired into a [`RunConfig`].

use std::fs;
use std::path::PathBuf;

use payguard_cli::RunConfig;
use payguard_engine::{EnginePolicy, TokenStyle};
use payguard_records::{MalformedPolicy, Window};
use tempfile::TempDir;

/// Header line used by the reference transaction logs.
pub const HEADER: &str = "time, id1, id2, amount, message";

/// Render `(payer, payee)` pairs as transaction log text.
pub fn log_text(pairs: &[(i64, i64)]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for (from, to) in pairs {
        text.push_str(&format!("2016-11-02 09:49:29, {}, {}, 10.00, payment\n", from, to));
    }
    text
}

/// Temporary input/output files for one run.
pub struct Fixture {
    dir: TempDir,
    pub config: RunConfig,
}

impl Fixture {
    /// Files from raw log text.
    pub fn from_text(history: &str, stream: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let batch = dir.path().join("batch_payment.csv");
        let stream_path = dir.path().join("stream_payment.csv");
        fs::write(&batch, history).expect("write history");
        fs::write(&stream_path, stream).expect("write stream");

        let outputs = ["output1.txt", "output2.txt", "output3.txt"].map(|name| dir.path().join(name));
        let config = RunConfig {
            batch,
            stream: stream_path,
            outputs,
            history_window: Window::Unbounded,
            stream_window: Window::Unbounded,
            policy: EnginePolicy::default(),
            malformed: MalformedPolicy::Skip,
            token_style: TokenStyle::Reference,
            top_n: 5,
            subgraph_out: None,
            summary_json: false,
        };
        Self { dir, config }
    }

    /// Files from `(payer, payee)` pairs.
    pub fn new(history: &[(i64, i64)], stream: &[(i64, i64)]) -> Self {
        Self::from_text(&log_text(history), &log_text(stream))
    }

    /// Path inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Lines of verdict output `n` (1-based).
    pub fn output(&self, n: usize) -> Vec<String> {
        fs::read_to_string(&self.config.outputs[n - 1])
            .expect("read output")
            .lines()
            .map(str::to_string)
            .collect()
    }
}
