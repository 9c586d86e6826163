//! antifraud binary
//!
//! Usage:
//!   antifraud <batch> <stream> <output1> <output2> <output3> [options]
//!
//! Builds the trust graph from `batch`, evaluates every request in `stream`
//! in order, and writes one verdict per line to each output file.

use anyhow::Result;
use clap::Parser;
use payguard_cli::{run, Cli, RunConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    payguard_logging::init_default();

    let config = RunConfig::from_cli(cli)?;
    let report = run(&config)?;

    if config.summary_json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
