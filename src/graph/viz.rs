use tracing::info;

use crate::config::RunConfig;
use crate::core::module::ModuleId;
use crate::graph::DependencyGraph;

const GROUP_CLASS: &str = "outline";

/// Renders the graph body of a Mermaid flowchart: one line per module or
/// edge, a click link per module, a subgraph per repository with more than
/// one module, and a dashed outline style for those subgraphs.
pub fn render_mermaid(graph: &DependencyGraph, config: &RunConfig) -> String {
    let mut out = String::new();

    for (module, deps) in graph.nodes_sorted_with_edges() {
        if deps.is_empty() {
            out.push_str(&format!("\t{module}\n"));
        } else {
            for dep in sorted(deps) {
                out.push_str(&format!("\t{module} --> {dep}\n"));
            }
        }
        out.push_str(&format!(
            "\tclick {module} href \"{}\"\n",
            config.repo_url(module.repo_key())
        ));
    }

    let mut subgraphs = Vec::new();
    for (repo, members) in graph.repos_sorted_with_members() {
        if members.len() <= 1 {
            info!(repo, modules = ?members, "skipping repo with single module");
            continue;
        }
        let group = format!("{repo}-repo");

        out.push_str(&format!("\n\tsubgraph {group}[{repo}]\n"));
        for member in sorted(members) {
            out.push_str(&format!("\t\t {member}\n"));
        }
        out.push_str("\tend\n");
        out.push_str(&format!(
            "\tclick {group} href \"{}\"\n",
            config.repo_url(repo)
        ));
        subgraphs.push(group);
    }

    out.push_str(&format!(
        "\n\tclassDef {GROUP_CLASS} stroke-dasharray:6,fill:none;\n"
    ));
    if !subgraphs.is_empty() {
        out.push_str(&format!("\tclass {} {GROUP_CLASS}\n", subgraphs.join(",")));
    }
    out
}

fn sorted(modules: &[ModuleId]) -> Vec<&ModuleId> {
    let mut out: Vec<&ModuleId> = modules.iter().collect();
    out.sort();
    out
}
