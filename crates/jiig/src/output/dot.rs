//! Graphviz DOT rendering of the projected graph.
//!
//! Node fill colors and the highlight marker come from the same style
//! catalog the JSON payload carries, so both renderings agree.

use crate::pipeline::PipelineOutput;
use crate::pipeline::projection::EDGE_LABEL_FAILED;
use crate::pipeline::styles::{FAILED_COLOR, HEALTHY_COLOR, is_highlight_label};
use std::collections::HashMap;

const HEALTHY_EDGE_COLOR: &str = "gray40";

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the pipeline output as a `digraph`.
#[must_use]
pub fn render_dot(output: &PipelineOutput) -> String {
    let colors: HashMap<&str, &str> = output
        .node_styles
        .iter()
        .map(|s| (s.label.as_str(), s.color))
        .collect();

    let mut out = String::new();
    out.push_str("digraph jiig {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];\n");
    out.push_str("  edge [fontname=\"Helvetica\"];\n");

    if !output.elements.nodes.is_empty() {
        out.push('\n');
    }
    for node in output.elements.nodes.iter().map(|n| &n.data) {
        let mut attrs = vec![
            format!(
                "label=\"{}\\n{}\"",
                dot_escape(&node.name),
                dot_escape(&node.entity_type)
            ),
            format!(
                "fillcolor=\"{}\"",
                colors.get(node.label.as_str()).copied().unwrap_or(HEALTHY_COLOR)
            ),
            "fontcolor=white".to_string(),
        ];
        if is_highlight_label(&node.label) {
            attrs.push("penwidth=3".to_string());
            attrs.push("peripheries=2".to_string());
        }
        out.push_str(&format!("  \"{}\" [{}];\n", dot_escape(&node.id), attrs.join(", ")));
    }

    if !output.elements.edges.is_empty() {
        out.push('\n');
    }
    for edge in output.elements.edges.iter().map(|e| &e.data) {
        let color = if edge.label == EDGE_LABEL_FAILED {
            format!("\"{FAILED_COLOR}\"")
        } else {
            HEALTHY_EDGE_COLOR.to_string()
        };
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", color={color}];\n",
            dot_escape(&edge.source),
            dot_escape(&edge.target),
            dot_escape(&edge.connecting_table)
        ));
    }

    out.push_str("}\n");
    out
}
