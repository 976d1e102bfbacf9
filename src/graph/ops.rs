use std::collections::{HashMap, HashSet};

use crate::core::module::ModuleId;
use crate::graph::DependencyGraph;

/// Every module reachable from `module` through one or more edges, sorted.
pub fn transitive_dependencies(graph: &DependencyGraph, module: &ModuleId) -> Vec<ModuleId> {
    let mut seen: HashSet<&ModuleId> = HashSet::new();
    let mut stack: Vec<&ModuleId> = graph.dependencies_of(module).iter().collect();
    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        stack.extend(graph.dependencies_of(current));
    }
    let mut out: Vec<ModuleId> = seen.into_iter().cloned().collect();
    out.sort();
    out
}

/// Depth-first search with an explicit stack, so long dependency chains do
/// not grow the call stack.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<ModuleId>> {
    let mut state: HashMap<&ModuleId, VisitState> = HashMap::new();
    let mut cycles = Vec::new();

    let mut roots: Vec<&ModuleId> = graph.edges.keys().collect();
    roots.sort();
    for root in roots {
        if state.contains_key(root) {
            continue;
        }

        // (module, index of the next dependency to visit)
        let mut stack: Vec<(&ModuleId, usize)> = vec![(root, 0)];
        state.insert(root, VisitState::Visiting);

        while let Some(&(node, next)) = stack.last() {
            let Some(dep) = graph.dependencies_of(node).get(next) else {
                state.insert(node, VisitState::Visited);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            match state.get(dep).copied() {
                Some(VisitState::Visiting) => {
                    if let Some(pos) = stack.iter().position(|(id, _)| *id == dep) {
                        let path = stack[pos..].iter().map(|(id, _)| (*id).clone());
                        cycles.push(path.collect());
                    }
                }
                Some(VisitState::Visited) => {}
                None => {
                    state.insert(dep, VisitState::Visiting);
                    stack.push((dep, 0));
                }
            }
        }
    }

    cycles
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}
