//! Projection stage: records to renderer elements.
//!
//! The rendering widget consumes `{nodes: [{data: {...}}], edges: [{data:
//! {...}}]}`. Every element carries a `label` that selects its style: nodes
//! get `{TYPE}_{FAILED|HEALTHY}` (plus `_HIGHLIGHT` for the focused node) and
//! edges are colored by the health of their **source** node.

use crate::domain::{EdgeRecord, NodeRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Entity type used when a node row has none.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// Suffix appended to the style label of the highlighted node.
pub const HIGHLIGHT_SUFFIX: &str = "_HIGHLIGHT";

/// Style label of an edge whose source node failed.
pub const EDGE_LABEL_FAILED: &str = "DEPENDENCY_FAILED";

/// Style label of an edge whose source node is healthy.
pub const EDGE_LABEL_HEALTHY: &str = "DEPENDENCY_HEALTHY";

/// Wrapper matching the renderer's `{ "data": ... }` element shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element<T> {
    /// Element payload
    pub data: T,
}

/// Renderer payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    /// Node id
    pub id: String,
    /// Style label, e.g. `JOB_FAILED`
    pub label: String,
    /// Caption shown on the node
    pub name: String,
    /// Upper-cased entity type
    pub entity_type: String,
    /// Status text, empty if absent
    pub status: String,
    /// Failures in the reporting window, 0 if absent
    pub failure_count: i64,
    /// Taken from `created_time`
    pub last_modified_time: String,
    /// Most recent failure timestamp
    pub last_failed_time: String,
    /// Owning job id
    pub job_id: String,
    /// Owning pipeline id
    pub pipeline_id: String,
    /// Creator e-mail
    pub creator: String,
    /// Run-as e-mail
    pub run_as: String,
}

/// Renderer payload of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    /// Edge id, `source->target` when the row had none
    pub id: String,
    /// Style label, from the source node's health
    pub label: String,
    /// Upstream node id
    pub source: String,
    /// Downstream node id
    pub target: String,
    /// Caption shown on the edge
    pub connecting_table: String,
    /// Whether the upstream node failed
    pub source_failed: bool,
    /// Whether the downstream node failed
    pub target_failed: bool,
}

/// The full element set handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphElements {
    /// Node elements
    pub nodes: Vec<Element<NodeData>>,
    /// Edge elements
    pub edges: Vec<Element<EdgeData>>,
}

impl GraphElements {
    /// Distinct entity types present among the nodes.
    #[must_use]
    pub fn entity_types(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .map(|n| n.data.entity_type.as_str())
            .collect()
    }

    /// Look up a node element by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.iter().map(|n| &n.data).find(|n| n.id == id)
    }
}

/// Upper-cased entity type of a node, [`UNKNOWN_TYPE`] when absent.
#[must_use]
pub fn entity_type(node: &NodeRecord) -> String {
    node.entity_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| UNKNOWN_TYPE.to_string(), str::to_uppercase)
}

/// Style label for a node of the given type and health.
#[must_use]
pub fn node_label(entity_type: &str, failed: bool, highlighted: bool) -> String {
    let health = if failed { "FAILED" } else { "HEALTHY" };
    let suffix = if highlighted { HIGHLIGHT_SUFFIX } else { "" };
    format!("{entity_type}_{health}{suffix}")
}

fn node_data(node: &NodeRecord, highlight: Option<&str>) -> NodeData {
    let entity_type = entity_type(node);
    let failed = node.failed();
    let highlighted = highlight == Some(node.id.as_str());
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    NodeData {
        id: node.id.to_string(),
        label: node_label(&entity_type, failed, highlighted),
        name: node.display_name().to_string(),
        entity_type,
        status: text(&node.status),
        failure_count: node.failure_count.unwrap_or(0),
        last_modified_time: text(&node.created_time),
        last_failed_time: text(&node.last_failed_time),
        job_id: text(&node.job_id),
        pipeline_id: text(&node.pipeline_id),
        creator: text(&node.creator_email),
        run_as: text(&node.run_as_email),
    }
}

fn edge_data(edge: &EdgeRecord, failure: &HashMap<&str, bool>) -> EdgeData {
    let source = edge
        .source_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let target = edge
        .target_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let source_failed = failure.get(source.as_str()).copied().unwrap_or(false);
    let target_failed = failure.get(target.as_str()).copied().unwrap_or(false);

    EdgeData {
        id: edge
            .id
            .clone()
            .unwrap_or_else(|| format!("{source}->{target}")),
        label: if source_failed {
            EDGE_LABEL_FAILED
        } else {
            EDGE_LABEL_HEALTHY
        }
        .to_string(),
        source,
        target,
        connecting_table: edge.connecting_table.clone().unwrap_or_default(),
        source_failed,
        target_failed,
    }
}

/// Map nodes and edges to renderer elements.
///
/// `highlight` marks at most one node id. Edge failure flags are resolved
/// against `nodes`; endpoints without a node row count as healthy.
#[must_use]
pub fn project(nodes: &[NodeRecord], edges: &[EdgeRecord], highlight: Option<&str>) -> GraphElements {
    let failure: HashMap<&str, bool> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.failed()))
        .collect();

    GraphElements {
        nodes: nodes
            .iter()
            .map(|n| Element {
                data: node_data(n, highlight),
            })
            .collect(),
        edges: edges
            .iter()
            .map(|e| Element {
                data: edge_data(e, &failure),
            })
            .collect(),
    }
}
