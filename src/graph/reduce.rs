//! Transitive reduction of the dependency graph.
//!
//! An edge `m -> d` is redundant when `d` is also reachable from one of
//! `m`'s other dependencies. For every edge a breadth-first search starts
//! from those other dependencies and looks for `d`.
//!
//! Many candidate edges probe the same target from overlapping parts of the
//! graph, so searches that fail are remembered: every node expanded by a
//! failed search for `d` is recorded as unable to reach `d`, and later
//! searches treat it as a dead end without expanding it again.
//!
//! Edges are removed in place, source by source in ascending id order.
//! Removing a redundant edge never changes reachability, so the negative
//! memo stays valid across removals and the result is the unique transitive
//! reduction of the input DAG regardless of visiting order.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::core::module::ModuleId;
use crate::graph::ops::find_cycles;
use crate::graph::{DependencyGraph, GraphError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Candidate edges checked for an indirect path.
    pub examined: usize,
    /// Redundant edges dropped.
    pub removed: usize,
    /// Expansions skipped thanks to a recorded negative result.
    pub memo_hits: usize,
}

/// Node -> targets known to be unreachable from it.
type Unreachable = HashMap<ModuleId, HashSet<ModuleId>>;

/// Rewrites `graph` to its transitive reduction.
///
/// Cyclic graphs are rejected before any edge is touched.
pub fn transitive_reduction(graph: &mut DependencyGraph) -> Result<ReductionStats, GraphError> {
    if let Some(path) = find_cycles(graph).into_iter().next() {
        return Err(GraphError::Cycle { path });
    }

    let mut stats = ReductionStats::default();
    let mut unreachable = Unreachable::new();

    let mut sources: Vec<ModuleId> = graph.edges.keys().cloned().collect();
    sources.sort();

    for source in sources {
        // The source's own list is taken out while it is reduced. In a DAG no
        // search starting below `source` can come back to it.
        let Some(targets) = graph.edges.get_mut(&source).map(std::mem::take) else {
            continue;
        };

        let mut kept: Vec<ModuleId> = Vec::with_capacity(targets.len());
        for (idx, target) in targets.iter().enumerate() {
            stats.examined += 1;
            let others = kept
                .iter()
                .chain(targets[idx + 1..].iter())
                .filter(|other| *other != target);
            if has_indirect_path(graph, others, target, &mut unreachable, &mut stats) {
                debug!(module = %source, dependency = %target, "excluding transitive edge");
                stats.removed += 1;
            } else {
                kept.push(target.clone());
            }
        }

        if let Some(slot) = graph.edges.get_mut(&source) {
            *slot = kept;
        }
    }

    info!(
        examined = stats.examined,
        removed = stats.removed,
        memo_hits = stats.memo_hits,
        "transitive reduction complete"
    );
    Ok(stats)
}

fn has_indirect_path<'g>(
    graph: &'g DependencyGraph,
    seeds: impl Iterator<Item = &'g ModuleId>,
    goal: &ModuleId,
    unreachable: &mut Unreachable,
    stats: &mut ReductionStats,
) -> bool {
    let mut frontier: Vec<&ModuleId> = seeds.collect();
    let mut touched: HashSet<&ModuleId> = HashSet::new();

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for node in frontier {
            if node == goal {
                return true;
            }
            if !touched.insert(node) {
                continue;
            }
            if unreachable
                .get(node)
                .is_some_and(|targets| targets.contains(goal))
            {
                debug!(module = %node, dependency = %goal, "skipping known disconnected module");
                stats.memo_hits += 1;
                continue;
            }
            next.extend(graph.dependencies_of(node));
        }
        frontier = next;
    }

    for node in touched {
        unreachable
            .entry(node.clone())
            .or_default()
            .insert(goal.clone());
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::core::module::ModuleId;
    use crate::graph::reduce::{transitive_reduction, ReductionStats};
    use crate::graph::{DependencyGraph, GraphError};

    fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (from, to) in edges {
            graph.add(ModuleId::new(*from), ModuleId::new(*to));
        }
        graph
    }

    fn edges_of(graph: &DependencyGraph) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (module, deps) in graph.nodes_sorted_with_edges() {
            let mut deps: Vec<_> = deps.iter().map(ModuleId::to_string).collect();
            deps.sort();
            for dep in deps {
                out.push((module.to_string(), dep));
            }
        }
        out
    }

    fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
        edges
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn removes_shortcut_over_chain() {
        let mut graph = graph_of(&[("A/x", "A/y"), ("A/y", "A/z"), ("A/x", "A/z")]);
        let stats = transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(edges_of(&graph), pairs(&[("A/x", "A/y"), ("A/y", "A/z")]));
        assert_eq!(stats.examined, 3);
        assert_eq!(stats.removed, 1);
    }

    #[test]
    fn shortcut_listed_first_is_still_removed() {
        let mut graph = graph_of(&[("a", "c"), ("a", "b"), ("b", "c")]);
        transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(edges_of(&graph), pairs(&[("a", "b"), ("b", "c")]));
    }

    #[test]
    fn removes_long_range_shortcuts() {
        let mut graph = graph_of(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "d"),
            ("d", "e"),
            ("a", "e"),
            ("a", "d"),
            ("b", "e"),
        ]);
        transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(
            edges_of(&graph),
            pairs(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")])
        );
    }

    #[test]
    fn diamond_keeps_both_branches() {
        let mut graph = graph_of(&[("top", "l"), ("top", "r"), ("l", "bot"), ("r", "bot")]);
        let stats = transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(stats.removed, 0);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn diamond_with_shortcut_drops_only_shortcut() {
        let mut graph = graph_of(&[
            ("top", "l"),
            ("top", "r"),
            ("l", "bot"),
            ("r", "bot"),
            ("top", "bot"),
        ]);
        transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(
            edges_of(&graph),
            pairs(&[("l", "bot"), ("r", "bot"), ("top", "l"), ("top", "r")])
        );
    }

    #[test]
    fn failed_searches_are_memoized() {
        // b and c both look for x1 through `shared`. Once b's search has
        // expanded shared's subtree, c's search stops at `shared`.
        let mut graph = graph_of(&[
            ("a", "shared"),
            ("shared", "deep1"),
            ("deep1", "deep2"),
            ("b", "shared"),
            ("b", "x1"),
            ("c", "shared"),
            ("c", "x1"),
        ]);
        let stats = transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(stats.removed, 0);
        assert!(stats.memo_hits >= 1, "stats: {stats:?}");
    }

    #[test]
    fn reduction_is_idempotent() {
        let mut graph = graph_of(&[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d"), ("a", "d")]);
        transitive_reduction(&mut graph).expect("first pass");
        let once = edges_of(&graph);
        let stats = transitive_reduction(&mut graph).expect("second pass");
        assert_eq!(edges_of(&graph), once);
        assert_eq!(stats.removed, 0);
    }

    #[test]
    fn cyclic_graph_is_rejected_untouched() {
        let mut graph = graph_of(&[("a", "b"), ("b", "a"), ("a", "c"), ("b", "c")]);
        let before = edges_of(&graph);
        let err = transitive_reduction(&mut graph).expect_err("cycle");
        assert!(matches!(err, GraphError::Cycle { .. }));
        assert_eq!(edges_of(&graph), before);
    }

    #[test]
    fn long_chain_reduces_without_recursion() {
        let mut graph = DependencyGraph::new();
        for i in 0..100_000 {
            graph.add(
                ModuleId::new(format!("p/r{}/m{i}", i % 7)),
                ModuleId::new(format!("p/r{}/m{}", (i + 1) % 7, i + 1)),
            );
        }
        let stats = transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(stats.examined, 100_000);
        assert_eq!(stats.removed, 0);
        assert_eq!(graph.edge_count(), 100_000);
        assert_eq!(graph.node_count(), 100_001);
    }

    #[test]
    fn empty_graph_reduces_to_nothing() {
        let mut graph = DependencyGraph::new();
        let stats = transitive_reduction(&mut graph).expect("reduce");
        assert_eq!(stats, ReductionStats::default());
    }
}
