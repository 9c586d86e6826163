//! Command-line arguments and run configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use payguard_engine::{EnginePolicy, TokenStyle, DEFAULT_PROGRESS_INTERVAL};
use payguard_graph::DEFAULT_MAX_DEPTH;
use payguard_records::{MalformedPolicy, Window};

/// Number of users listed in the final report by default.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "antifraud")]
#[command(about = "Flag payment requests that fall outside the payer's trust network")]
pub struct Cli {
    /// Historical payments used to build the trust graph
    pub batch: PathBuf,

    /// Payment requests to evaluate, in arrival order
    pub stream: PathBuf,

    /// Verdicts for feature 1 (direct link)
    pub output1: PathBuf,

    /// Verdicts for feature 2 (shared neighbor)
    pub output2: PathBuf,

    /// Verdicts for feature 3 (bounded path)
    pub output3: PathBuf,

    /// History records to load into the graph ("all" for no limit)
    #[arg(long, env = "PAYGUARD_HISTORY_WINDOW", default_value = "500")]
    pub history_window: Window,

    /// Stream records to evaluate ("all" for no limit)
    #[arg(long, env = "PAYGUARD_STREAM_WINDOW", default_value = "all")]
    pub stream_window: Window,

    /// Maximum hop count for feature 3
    #[arg(long, env = "PAYGUARD_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Number of best-connected users to report
    #[arg(long, env = "PAYGUARD_TOP_N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Abort on the first malformed input line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Write "unverified" (not "unverifed") when an endpoint has no history
    #[arg(long)]
    pub normalize_tokens: bool,

    /// Write the top-N users' neighborhood as JSON for a visualizer
    #[arg(long, value_name = "PATH")]
    pub subgraph_out: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub summary_json: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Historical payments file
    pub batch: PathBuf,
    /// Payment requests file
    pub stream: PathBuf,
    /// Verdict files for features 1, 2 and 3
    pub outputs: [PathBuf; 3],
    /// Cap on history records loaded into the graph
    pub history_window: Window,
    /// Cap on requests evaluated
    pub stream_window: Window,
    /// Evaluation tunables
    pub policy: EnginePolicy,
    /// Skip or fail on unparseable lines
    pub malformed: MalformedPolicy,
    /// Spelling of the unseen verdict
    pub token_style: TokenStyle,
    /// Users listed in the report
    pub top_n: usize,
    /// Where to write the top-N neighborhood, if anywhere
    pub subgraph_out: Option<PathBuf>,
    /// Print the report as JSON
    pub summary_json: bool,
}

impl RunConfig {
    /// Validate parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let policy = EnginePolicy::new(cli.max_depth, DEFAULT_PROGRESS_INTERVAL)?;

        Ok(Self {
            batch: cli.batch,
            stream: cli.stream,
            outputs: [cli.output1, cli.output2, cli.output3],
            history_window: cli.history_window,
            stream_window: cli.stream_window,
            policy,
            malformed: if cli.strict {
                MalformedPolicy::Fail
            } else {
                MalformedPolicy::Skip
            },
            token_style: if cli.normalize_tokens {
                TokenStyle::Normalized
            } else {
                TokenStyle::Reference
            },
            top_n: cli.top_n,
            subgraph_out: cli.subgraph_out,
            summary_json: cli.summary_json,
        })
    }
}
