//! Filter stage: choose which part of the graph to show.
//!
//! Three views are offered, from narrowest to widest:
//!
//! - [`FilterMode::FailedSubgraph`]: failed nodes, every edge touching one of
//!   them, and the nodes at the other end of those edges.
//! - [`FilterMode::ConnectedOnly`]: every node that appears in an edge plus
//!   every failed node, and the edges running between those nodes.
//! - [`FilterMode::All`]: the table as loaded.

use crate::domain::{EdgeRecord, NodeId, NodeRecord, RecordSet};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Named filtering view over the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Failed nodes plus everything one edge away from them
    #[default]
    FailedSubgraph,
    /// Nodes that take part in any edge, plus failed nodes
    ConnectedOnly,
    /// Everything
    All,
}

impl FilterMode {
    /// Every mode, narrowest first.
    pub const MODES: [Self; 3] = [Self::FailedSubgraph, Self::ConnectedOnly, Self::All];

    /// Wire name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailedSubgraph => "failed_subgraph",
            Self::ConnectedOnly => "connected_only",
            Self::All => "all",
        }
    }

    /// Short human description, as shown next to the selector.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FailedSubgraph => "Failed + affected",
            Self::ConnectedOnly => "Failed + affected + edge nodes",
            Self::All => "All nodes",
        }
    }

    /// Parse a mode name, treating anything unrecognized as [`FilterMode::All`].
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(mode = %name, "Unrecognized filter mode, showing all nodes");
            Self::All
        })
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::MODES
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "unknown filter mode '{s}' (expected failed_subgraph, connected_only or all)"
                )
            })
    }
}

/// Ids of nodes explicitly marked failed.
fn failed_ids(nodes: &[NodeRecord]) -> HashSet<&NodeId> {
    nodes.iter().filter(|n| n.failed()).map(|n| &n.id).collect()
}

fn nodes_in(nodes: &[NodeRecord], keep: &HashSet<&NodeId>) -> Vec<NodeRecord> {
    nodes
        .iter()
        .filter(|n| keep.contains(&n.id))
        .cloned()
        .collect()
}

/// Apply a filtering view to the record set.
///
/// A table without node rows is returned unchanged whatever the mode.
/// Row order within nodes and within edges is preserved.
#[must_use]
pub fn filter(records: &RecordSet, mode: FilterMode) -> RecordSet {
    if records.nodes.is_empty() {
        return records.clone();
    }

    let failed = failed_ids(&records.nodes);

    let filtered = match mode {
        FilterMode::All => return records.clone(),
        FilterMode::FailedSubgraph => {
            let edges: Vec<EdgeRecord> = records
                .edges
                .iter()
                .filter(|e| e.endpoints().any(|id| failed.contains(id)))
                .cloned()
                .collect();

            let nodes = {
                let mut keep = failed;
                keep.extend(edges.iter().flat_map(EdgeRecord::endpoints));
                nodes_in(&records.nodes, &keep)
            };
            RecordSet::new(nodes, edges)
        }
        FilterMode::ConnectedOnly => {
            let mut keep: HashSet<&NodeId> = records
                .edges
                .iter()
                .flat_map(EdgeRecord::endpoints)
                .collect();
            keep.extend(failed);

            let nodes = nodes_in(&records.nodes, &keep);
            let edges = records
                .edges
                .iter()
                .filter(|e| match (&e.source_id, &e.target_id) {
                    (Some(source), Some(target)) => keep.contains(source) && keep.contains(target),
                    _ => false,
                })
                .cloned()
                .collect();

            RecordSet::new(nodes, edges)
        }
    };

    tracing::debug!(
        mode = %mode,
        nodes_before = records.nodes.len(),
        nodes_after = filtered.nodes.len(),
        edges_before = records.edges.len(),
        edges_after = filtered.edges.len(),
        "Applied filter"
    );

    filtered
}
