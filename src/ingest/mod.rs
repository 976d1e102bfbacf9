pub mod filter;
pub mod scan;

pub use filter::PrefixFilter;
pub use scan::{parse_line, EdgeScanner, ParsedLine, RawEdge, ScanStats};

use std::io::BufRead;

use crate::error::{ModgraphError, Result};
use crate::graph::DependencyGraph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub scan: ScanStats,
    pub accepted: usize,
    pub filtered: usize,
}

/// Reads every edge from `reader` into a fresh graph, keeping only modules
/// under `prefix`. Fails if the input cannot be read to completion.
pub fn ingest<R: BufRead>(reader: R, prefix: &str) -> Result<(DependencyGraph, IngestSummary)> {
    let filter = PrefixFilter::new(prefix);
    let mut graph = DependencyGraph::new();
    let mut summary = IngestSummary::default();

    let mut scanner = EdgeScanner::new(reader);
    for edge in scanner.by_ref() {
        let edge = edge.map_err(ModgraphError::Input)?;
        match filter.apply(&edge) {
            Some((module, dependency)) => {
                summary.accepted += 1;
                graph.add(module, dependency);
            }
            None => summary.filtered += 1,
        }
    }
    summary.scan = scanner.stats();

    Ok((graph, summary))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::core::module::ModuleId;
    use crate::ingest::ingest;

    #[test]
    fn ingest_filters_and_deduplicates() {
        let input = "\
github.com/acme/api@v1 github.com/acme/core@v2
github.com/acme/api@v1 github.com/acme/core@v3
github.com/acme/api@v1 golang.org/x/text@v0.3.0
not a valid line

github.com/acme/core github.com/acme/util/log
";
        let (graph, summary) = ingest(Cursor::new(input), "github.com/acme/").expect("ingest");

        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.filtered, 1);
        assert_eq!(summary.scan.invalid, 1);
        assert_eq!(summary.scan.blank, 1);
        assert_eq!(summary.scan.total, 6);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.dependencies_of(&ModuleId::new("api")),
            &[ModuleId::new("core")]
        );
        assert!(!graph.contains(&ModuleId::new("golang.org/x/text")));
    }

    #[test]
    fn non_utf8_line_is_filtered_not_fatal() {
        let input: &[u8] = b"p/a p/b\n\xff\xfe junk\np/b p/c\n";
        let (graph, summary) = ingest(Cursor::new(input), "p/").expect("ingest");
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.filtered, 1);
        assert_eq!(graph.edge_count(), 2);
    }
}
