//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)
//! - [`dot`]: Graphviz rendering of the projected graph
//! - `json`: JSON serialization for programmatic output

pub mod color;
pub mod dot;
mod json;

use crate::pipeline::{EdgeData, NodeData, PipelineOutput};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};
pub use dot::render_dot;

use color::{arrow, bold, colorize_status, dimmed, health_icon};
use json::{print_metrics_json, print_no_data_json, print_node_details_json, print_nodes_json};

/// Message shown when the record table is empty.
pub const NO_DATA_MESSAGE: &str = "No data available";

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
///
/// This struct holds settings that control how output is formatted,
/// including terminal width limits, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create an `OutputConfig` from an environment lookup.
    ///
    /// Reads:
    /// - `JIIG_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `JIIG_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `JIIG_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_lookup<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = match env("JIIG_MAX_WIDTH") {
            Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "JIIG_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env("JIIG_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "JIIG_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = env("NO_COLOR").is_none()
            && env("JIIG_COLOR").is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0) as usize
}

/// Wrap text to a maximum width, preserving existing line breaks.
///
/// Uses textwrap to handle edge cases like long words (table names, emails).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Rendering of the full graph payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Elements, metrics, layout and styles as JSON
    #[default]
    Json,
    /// Graphviz DOT
    Dot,
}

/// One node with the edges entering and leaving it.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails<'a> {
    /// The node itself
    pub node: &'a NodeData,
    /// Whether the node's row is marked failed
    pub failed: bool,
    /// Edges whose target is the node
    pub incoming: Vec<&'a EdgeData>,
    /// Edges whose source is the node
    pub outgoing: Vec<&'a EdgeData>,
}

impl<'a> NodeDetails<'a> {
    /// Collect the details of node `id`, `None` if it is not in the graph.
    #[must_use]
    pub fn find(output: &'a PipelineOutput, id: &str) -> Option<Self> {
        let node = output.elements.node(id)?;
        let edges = move || output.elements.edges.iter().map(|e| &e.data);
        Some(Self {
            node,
            failed: output.is_failed(id),
            incoming: edges().filter(|e| e.target == id).collect(),
            outgoing: edges().filter(|e| e.source == id).collect(),
        })
    }
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print graph metrics and the most connected node
pub fn print_metrics(output: &PipelineOutput, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_metrics_text(&mut handle, output, &config),
        OutputMode::Json => print_metrics_json(&mut handle, output),
    }
}

/// Print the node listing, optionally restricted to failed nodes
pub fn print_nodes(output: &PipelineOutput, failed_only: bool, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();
    let nodes = select_nodes(output, failed_only);

    match mode {
        OutputMode::Text => print_nodes_text(&mut handle, output, &nodes, &config),
        OutputMode::Json => print_nodes_json(&mut handle, output.filter_mode, &nodes),
    }
}

/// Print one node with its incoming and outgoing edges
pub fn print_node_details(details: &NodeDetails<'_>, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_node_details_text(&mut handle, details, &config),
        OutputMode::Json => print_node_details_json(&mut handle, details),
    }
}

/// Print the renderer payload
pub fn print_graph(output: &PipelineOutput, format: GraphFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        GraphFormat::Json => json::write_json(&mut handle, output),
        GraphFormat::Dot => handle.write_all(render_dot(output).as_bytes()),
    }
}

/// Report an empty record table
pub fn print_no_data(mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => writeln!(handle, "{}", warning(NO_DATA_MESSAGE, &config)),
        OutputMode::Json => print_no_data_json(&mut handle, NO_DATA_MESSAGE),
    }
}

// ============================================================================
// Text Formatters
// ============================================================================

fn select_nodes(output: &PipelineOutput, failed_only: bool) -> Vec<&NodeData> {
    output
        .elements
        .nodes
        .iter()
        .map(|n| &n.data)
        .filter(|n| !failed_only || output.is_failed(&n.id))
        .collect()
}

fn print_metrics_text<W: Write>(
    w: &mut W,
    output: &PipelineOutput,
    config: &OutputConfig,
) -> io::Result<()> {
    let m = &output.metrics;
    let label = |text: &str| dimmed(&format!("{text:<16}"), config);

    writeln!(
        w,
        "{} ({})",
        bold("Graph metrics", config),
        output.filter_mode.description()
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "  {} {} ({} failed, {} healthy)",
        label("Entities:"),
        m.num_nodes_all,
        error(&m.failed_entities.to_string(), config),
        success(&m.healthy_entities.to_string(), config)
    )?;
    writeln!(
        w,
        "  {} {} directed, {} undirected",
        label("Edges:"),
        m.edges_directed,
        m.edges_undirected
    )?;
    writeln!(w, "  {} {}", label("Connected nodes:"), m.num_nodes_connected)?;
    writeln!(
        w,
        "  {} {:.2} all, {:.2} connected",
        label("Avg degree:"),
        m.avg_degree_all,
        m.avg_degree_connected
    )?;

    let top = &output.most_connected;
    match &top.id {
        Some(id) => writeln!(
            w,
            "  {} {} ({}), {} neighbour(s)",
            label("Most connected:"),
            top.name,
            info(id.as_str(), config),
            top.degree
        ),
        None => writeln!(w, "  {} {}", label("Most connected:"), top.name),
    }
}

fn print_nodes_text<W: Write>(
    w: &mut W,
    output: &PipelineOutput,
    nodes: &[&NodeData],
    config: &OutputConfig,
) -> io::Result<()> {
    if nodes.is_empty() {
        writeln!(w, "No nodes found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} node(s):", nodes.len())?;
    writeln!(w)?;

    for node in nodes {
        let failed = output.is_failed(&node.id);
        write!(
            w,
            "  {} {} {} {}  {}",
            health_icon(failed, config),
            info(&node.id, config),
            dimmed(&format!("[{}]", node.entity_type), config),
            node.name,
            colorize_status(&node.status, failed, config)
        )?;
        if node.last_failed_time.is_empty() {
            writeln!(w)?;
        } else {
            writeln!(
                w,
                "  {}",
                dimmed(&format!("last failed {}", node.last_failed_time), config)
            )?;
        }
    }
    Ok(())
}

fn print_node_details_text<W: Write>(
    w: &mut W,
    details: &NodeDetails<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    let node = details.node;
    let failed = details.failed;
    let width = get_terminal_width().min(config.max_width);

    let title = format!("{}: {}", node.id, node.name);
    for (i, line) in wrap_text(&title, width.saturating_sub(2)).iter().enumerate() {
        if i == 0 {
            writeln!(w, "{} {}", health_icon(failed, config), bold(line, config))?;
        } else {
            writeln!(w, "  {}", bold(line, config))?;
        }
    }
    writeln!(w)?;

    writeln!(w, "{} {}", dimmed("Type:", config), node.entity_type)?;
    writeln!(
        w,
        "{} {}",
        dimmed("Status:", config),
        colorize_status(&node.status, failed, config)
    )?;
    writeln!(w, "{} {}", dimmed("Failures:", config), node.failure_count)?;

    let optional = [
        ("Last failed:", &node.last_failed_time),
        ("Last modified:", &node.last_modified_time),
        ("Job id:", &node.job_id),
        ("Pipeline id:", &node.pipeline_id),
        ("Creator:", &node.creator),
        ("Run as:", &node.run_as),
    ];
    for (field, value) in optional {
        if !value.is_empty() {
            writeln!(w, "{} {}", dimmed(field, config), value)?;
        }
    }

    print_edge_section(w, "Upstream", &details.incoming, config)?;
    print_edge_section(w, "Downstream", &details.outgoing, config)
}

fn print_edge_section<W: Write>(
    w: &mut W,
    title: &str,
    edges: &[&EdgeData],
    config: &OutputConfig,
) -> io::Result<()> {
    if edges.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{} ({}):", bold(title, config), edges.len())?;
    for edge in edges {
        write!(
            w,
            "  {} {} {} {}",
            health_icon(edge.source_failed, config),
            info(&edge.source, config),
            arrow(config),
            info(&edge.target, config)
        )?;
        if edge.connecting_table.is_empty() {
            writeln!(w)?;
        } else {
            writeln!(w, "  {}", dimmed(&format!("via {}", edge.connecting_table), config))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeRecord, NodeId, NodeRecord, RecordSet};
    use crate::pipeline::{FilterMode, Highlight, PipelineConfig, run};
    use std::collections::HashMap;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn sample() -> PipelineOutput {
        let records = RecordSet::new(
            vec![
                NodeRecord::new("1")
                    .with_name("ingest")
                    .with_type("JOB")
                    .with_failed(true)
                    .with_last_failed_time("2024-01-02"),
                NodeRecord::new("2").with_name("report").with_type("PIPELINE"),
                NodeRecord::new("3").with_name("idle").with_type("JOB"),
            ],
            vec![EdgeRecord::new("e", "1", "2").with_table("raw.events")],
        );
        run(&records, &PipelineConfig::new(FilterMode::All)).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_wrap_text() {
        let wrapped = wrap_text("This is a test of text wrapping functionality", 20);
        assert!(!wrapped.is_empty());
        assert!(wrapped.iter().all(|line| line.len() <= 20));
    }

    #[test]
    fn test_wrap_text_preserves_newlines() {
        assert_eq!(wrap_text("Line one\nLine two\nLine three", 50).len(), 3);
    }

    #[test]
    fn test_output_config_from_lookup() {
        let env = HashMap::from([("JIIG_MAX_WIDTH", "120"), ("JIIG_ASCII", "1")]);
        let config = OutputConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(config, OutputConfig::new(120, true, true));

        let env = HashMap::from([("JIIG_MAX_WIDTH", "wide"), ("JIIG_ASCII", "maybe")]);
        let config = OutputConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(config, OutputConfig::default());
    }

    #[test]
    fn test_colors_disabled_by_env() {
        let no_color = OutputConfig::from_lookup(|k| (k == "NO_COLOR").then(String::new));
        assert!(!no_color.use_colors);

        let off = OutputConfig::from_lookup(|k| (k == "JIIG_COLOR").then(|| "false".to_string()));
        assert!(!off.use_colors);

        let on = OutputConfig::from_lookup(|k| (k == "JIIG_COLOR").then(|| "1".to_string()));
        assert!(on.use_colors);
    }

    #[test]
    fn test_metrics_text() {
        let output = sample();
        let text = render(|w| print_metrics_text(w, &output, &plain()));

        assert!(text.starts_with("Graph metrics (All nodes)"));
        assert!(text.contains("3 (1 failed, 2 healthy)"));
        assert!(text.contains("1 directed, 1 undirected"));
        assert!(text.contains("0.33 all, 1.00 connected"));
        assert!(text.contains("ingest (1), 1 neighbour(s)"));
    }

    #[test]
    fn test_metrics_json() {
        let output = sample();
        let text = render(|w| print_metrics_json(w, &output));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["filter_mode"], "all");
        assert_eq!(value["metrics"]["failed_entities"], 1);
        assert_eq!(value["most_connected"]["id"], "1");
    }

    #[test]
    fn test_nodes_text_failed_only() {
        let output = sample();
        let nodes = select_nodes(&output, true);
        let text = render(|w| print_nodes_text(w, &output, &nodes, &plain()));

        assert!(text.starts_with("Found 1 node(s):"));
        assert!(text.contains("✗ 1 [JOB] ingest  FAILED  last failed 2024-01-02"));
        assert!(!text.contains("report"));
    }

    #[test]
    fn test_highlighted_failed_node_stays_failed() {
        let records = RecordSet::new(
            vec![
                NodeRecord::new("1").with_name("ingest").with_type("JOB").with_failed(true),
                NodeRecord::new("2").with_name("report").with_type("PIPELINE"),
            ],
            vec![EdgeRecord::new("e", "1", "2")],
        );
        let config = PipelineConfig::new(FilterMode::All)
            .with_highlight(Highlight::Node(NodeId::new("1")));
        let output = run(&records, &config).unwrap();
        assert_eq!(output.elements.node("1").unwrap().label, "JOB_FAILED_HIGHLIGHT");

        let nodes = select_nodes(&output, true);
        assert_eq!(nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["1"]);
        let text = render(|w| print_nodes_text(w, &output, &nodes, &plain()));
        assert!(text.contains("✗ 1 [JOB] ingest  FAILED"));

        let details = NodeDetails::find(&output, "1").unwrap();
        assert!(details.failed);
        let text = render(|w| print_node_details_text(w, &details, &plain()));
        assert!(text.starts_with("✗ 1: ingest"));
    }

    #[test]
    fn test_nodes_text_empty() {
        let output = sample();
        let text = render(|w| print_nodes_text(w, &output, &[], &plain()));
        assert_eq!(text, "No nodes found.\n");
    }

    #[test]
    fn test_node_details_text() {
        let output = sample();
        let details = NodeDetails::find(&output, "2").unwrap();
        let text = render(|w| print_node_details_text(w, &details, &plain()));

        assert!(text.starts_with("✓ 2: report"));
        assert!(text.contains("Type: PIPELINE"));
        assert!(text.contains("Upstream (1):"));
        assert!(text.contains("✗ 1 → 2  via raw.events"));
        assert!(!text.contains("Downstream"));
    }

    #[test]
    fn test_node_details_lookup() {
        let output = sample();
        let details = NodeDetails::find(&output, "1").unwrap();
        assert!(details.failed);
        assert!(details.incoming.is_empty());
        assert_eq!(details.outgoing.len(), 1);
        assert!(NodeDetails::find(&output, "missing").is_none());
    }

    #[test]
    fn test_no_data_json() {
        let text = render(|w| print_no_data_json(w, NO_DATA_MESSAGE));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["no_data"], true);
        assert_eq!(value["message"], NO_DATA_MESSAGE);
    }
}
