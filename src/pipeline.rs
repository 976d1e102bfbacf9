use std::io::BufRead;

use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::graph::viz::render_mermaid;
use crate::graph::{transitive_reduction, DependencyGraph, ReductionStats};
use crate::ingest::{ingest, IngestSummary};

#[derive(Debug)]
pub struct Report {
    pub graph: DependencyGraph,
    pub ingest: IngestSummary,
    pub reduction: ReductionStats,
    pub diagram: String,
}

/// Reads the whole input, reduces the graph and renders it. Nothing is
/// rendered unless every earlier stage succeeded.
pub fn generate<R: BufRead>(reader: R, config: &RunConfig) -> Result<Report> {
    let (mut graph, ingest) = ingest(reader, &config.prefix)?;
    info!(
        modules = graph.node_count(),
        edges = graph.edge_count(),
        repos = graph.repo_count(),
        filtered = ingest.filtered,
        "graph loaded"
    );

    let reduction = transitive_reduction(&mut graph)?;
    let diagram = render_mermaid(&graph, config);

    Ok(Report {
        graph,
        ingest,
        reduction,
        diagram,
    })
}
