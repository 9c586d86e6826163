//! The batch pipeline: history -> graph -> stream -> verdict files -> report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use payguard_engine::{ChannelWriters, StreamProcessor};
use payguard_graph::{top_n_by_degree, TrustGraph, UserId};
use payguard_records::load_path;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::report::RunReport;

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Run the whole pipeline described by `config`.
///
/// Both inputs are read before any output file is created, so input errors
/// abort the run without leaving partial verdict files.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    debug!("Building record from past payments");
    let start = Instant::now();
    let history = load_path(&config.batch, config.history_window, config.malformed)
        .with_context(|| format!("reading history from {}", config.batch.display()))?;
    debug!("Record built for {} past payments in {:?}", history.len(), start.elapsed());

    let graph = TrustGraph::bulk_load(history.pairs());
    info!("Sanity check, nodes match users: {}", graph.node_count() == graph.index().len());
    info!(
        "Total records: {} unique users: {} edges: {}",
        history.len(),
        graph.node_count(),
        graph.edge_count()
    );

    let stream = load_path(&config.stream, config.stream_window, config.malformed)
        .with_context(|| format!("reading payment requests from {}", config.stream.display()))?;

    let [o1, o2, o3] = &config.outputs;
    let mut sink = ChannelWriters::new([create(o1)?, create(o2)?, create(o3)?], config.token_style);

    let mut processor = StreamProcessor::new(graph, config.policy);
    let summary = processor
        .run(stream.pairs(), &mut sink)
        .context("writing verdicts")?;
    let timings = *processor.timings();
    let graph = processor.into_graph();

    let top_users = top_n_by_degree(graph.index(), config.top_n);
    if let Some(path) = &config.subgraph_out {
        let centers: Vec<UserId> = top_users.iter().map(|r| r.user).collect();
        write_subgraph(&graph, &centers, path)?;
    }

    Ok(RunReport::new(history.stats, stream.stats, summary, top_users, &timings))
}

/// Write the neighborhood of `centers` as JSON.
pub fn write_subgraph(graph: &TrustGraph, centers: &[UserId], path: &Path) -> Result<()> {
    let snapshot = graph.neighborhood(centers);
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, &snapshot)
        .with_context(|| format!("writing subgraph to {}", path.display()))?;
    out.flush()?;
    info!(
        nodes = snapshot.node_count(),
        edges = snapshot.edge_count(),
        "Wrote top-{} subgraph to {}",
        centers.len(),
        path.display()
    );
    Ok(())
}
