use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::core::module::ModuleId;

pub mod ops;
pub mod reduce;
pub mod viz;

pub use reduce::{transitive_reduction, ReductionStats};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cycle detected in dependency graph: {}", format_cycle(.path))]
    Cycle { path: Vec<ModuleId> },
}

fn format_cycle(path: &[ModuleId]) -> String {
    let mut parts: Vec<&str> = path.iter().map(ModuleId::as_str).collect();
    if let Some(first) = path.first() {
        parts.push(first.as_str());
    }
    parts.join(" -> ")
}

/// Deduplicated module dependency graph.
///
/// `edges` maps a module to the modules it depends on, in insertion order.
/// `seen` holds every module observed as either end of an edge and `repos`
/// groups those modules by repository key as they are first observed.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    edges: HashMap<ModuleId, Vec<ModuleId>>,
    seen: HashSet<ModuleId>,
    repos: HashMap<String, Vec<ModuleId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `module` depends on `dependency`. Repeated pairs are
    /// stored once. A self-loop registers the module but adds no edge.
    pub fn add(&mut self, module: ModuleId, dependency: ModuleId) {
        self.saw_module(&module);
        self.saw_module(&dependency);

        if module == dependency {
            debug!(module = %module, "ignoring self dependency");
            return;
        }

        let deps = self.edges.entry(module).or_default();
        if !deps.contains(&dependency) {
            deps.push(dependency);
        }
    }

    fn saw_module(&mut self, module: &ModuleId) {
        if self.seen.insert(module.clone()) {
            self.repos
                .entry(module.repo_key().to_string())
                .or_default()
                .push(module.clone());
        }
    }

    pub fn contains(&self, module: &ModuleId) -> bool {
        self.seen.contains(module)
    }

    pub fn dependencies_of(&self, module: &ModuleId) -> &[ModuleId] {
        self.edges.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.seen.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn repo_count(&self) -> usize {
        self.repos.len()
    }

    /// Every observed module with its dependencies, ordered by module id.
    /// Modules without dependencies are yielded with an empty slice.
    pub fn nodes_sorted_with_edges(&self) -> SortedNodes<'_> {
        let mut keys: Vec<&ModuleId> = self.seen.iter().collect();
        keys.sort();
        SortedNodes {
            graph: self,
            keys,
            next: 0,
        }
    }

    /// Repository keys with their member modules, ordered by key. Members
    /// are in first-seen order.
    pub fn repos_sorted_with_members(&self) -> SortedRepos<'_> {
        let mut keys: Vec<&str> = self.repos.keys().map(String::as_str).collect();
        keys.sort_unstable();
        SortedRepos {
            graph: self,
            keys,
            next: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortedNodes<'a> {
    graph: &'a DependencyGraph,
    keys: Vec<&'a ModuleId>,
    next: usize,
}

impl<'a> Iterator for SortedNodes<'a> {
    type Item = (&'a ModuleId, &'a [ModuleId]);

    fn next(&mut self) -> Option<Self::Item> {
        let module = *self.keys.get(self.next)?;
        self.next += 1;
        Some((module, self.graph.dependencies_of(module)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.keys.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SortedNodes<'_> {}

#[derive(Debug, Clone)]
pub struct SortedRepos<'a> {
    graph: &'a DependencyGraph,
    keys: Vec<&'a str>,
    next: usize,
}

impl<'a> Iterator for SortedRepos<'a> {
    type Item = (&'a str, &'a [ModuleId]);

    fn next(&mut self) -> Option<Self::Item> {
        let repo = *self.keys.get(self.next)?;
        self.next += 1;
        let members = self
            .graph
            .repos
            .get(repo)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Some((repo, members))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.keys.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SortedRepos<'_> {}
