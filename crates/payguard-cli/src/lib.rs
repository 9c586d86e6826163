//! PayGuard anti-fraud batch runner.
//!
//! Library half of the `antifraud` binary, split out so the pipeline can be
//! driven from integration tests.

pub mod config;
pub mod report;
pub mod run;

pub use config::{Cli, RunConfig};
pub use report::RunReport;
pub use run::run;
