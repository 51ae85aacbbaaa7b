//! The graph pipeline: filter, dedupe, measure, project.
//!
//! Every stage is a pure function over an in-memory [`RecordSet`]. [`run`]
//! chains them for one request described by a [`PipelineConfig`].

pub mod dedupe;
pub mod filter;
pub mod metrics;
pub mod projection;
pub mod styles;

pub use dedupe::dedupe;
pub use filter::{FilterMode, filter};
pub use metrics::{GraphMetrics, MostConnected, compute_metrics, most_connected_node};
pub use projection::{EdgeData, Element, GraphElements, NodeData, project};
pub use styles::{EdgeStyle, Layout, LayoutConfig, NodeStyle, edge_styles, node_styles};

use crate::domain::{NodeId, NodeRecord, RecordSet};
use serde::Serialize;

/// Which node, if any, to emphasize in the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    /// No emphasis
    #[default]
    None,
    /// A specific node id
    Node(NodeId),
    /// Whatever node [`most_connected_node`] picks
    MostConnected,
}

/// Request-scoped settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Which part of the graph to show
    pub filter_mode: FilterMode,
    /// Layout handed to the renderer
    pub layout: Layout,
    /// Node to emphasize
    pub highlight: Highlight,
}

impl PipelineConfig {
    /// Create a config with the given filter mode and defaults elsewhere.
    #[must_use]
    pub fn new(filter_mode: FilterMode) -> Self {
        Self {
            filter_mode,
            ..Self::default()
        }
    }

    /// Set the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the highlighted node.
    #[must_use]
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Filtered and deduplicated records
    #[serde(skip)]
    pub records: RecordSet,
    /// Mode the records were filtered with
    pub filter_mode: FilterMode,
    /// Summary statistics of the filtered graph
    pub metrics: GraphMetrics,
    /// Highest-degree node of the filtered graph
    pub most_connected: MostConnected,
    /// The node actually highlighted, if any
    pub highlight: Option<NodeId>,
    /// Renderer elements
    pub elements: GraphElements,
    /// Renderer layout settings
    pub layout: LayoutConfig,
    /// Style per node label present in `elements`
    pub node_styles: Vec<NodeStyle>,
    /// Style per edge label
    pub edge_styles: Vec<EdgeStyle>,
}

impl PipelineOutput {
    /// Whether node `id` is in this view and its row is marked failed.
    #[must_use]
    pub fn is_failed(&self, id: &str) -> bool {
        self.records.node(id).is_some_and(NodeRecord::failed)
    }
}

/// Run every stage over `records`.
///
/// Returns `None` when the input table is empty; the caller reports that as
/// "no data" rather than as an error.
#[must_use]
pub fn run(records: &RecordSet, config: &PipelineConfig) -> Option<PipelineOutput> {
    if records.is_empty() {
        tracing::warn!("No data available");
        return None;
    }

    let filtered = filter(records, config.filter_mode);
    let deduped = dedupe(&filtered);

    let metrics = compute_metrics(&deduped.nodes, &deduped.edges);
    let most_connected = most_connected_node(&deduped.nodes, &deduped.edges);

    let requested = match &config.highlight {
        Highlight::None => None,
        Highlight::Node(id) => Some(id),
        Highlight::MostConnected => most_connected.id.as_ref(),
    };
    let highlight = requested.and_then(|id| deduped.node(id.as_str()).map(|n| n.id.clone()));
    if let Some(id) = requested
        && highlight.is_none()
    {
        tracing::debug!(node = %id, "Highlighted node is not in the current view");
    }

    let elements = project(
        &deduped.nodes,
        &deduped.edges,
        highlight.as_ref().map(NodeId::as_str),
    );
    let node_styles = node_styles(elements.entity_types());

    tracing::info!(
        mode = %config.filter_mode,
        nodes = elements.nodes.len(),
        edges = elements.edges.len(),
        failed = metrics.failed_entities,
        "Pipeline complete"
    );

    Some(PipelineOutput {
        records: deduped,
        filter_mode: config.filter_mode,
        metrics,
        most_connected,
        highlight,
        elements,
        layout: config.layout.config(),
        node_styles,
        edge_styles: edge_styles(),
    })
}
