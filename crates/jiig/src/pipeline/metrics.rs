//! Metrics stage: aggregate statistics over the rendered graph.
//!
//! Two edge views are used. The directed view is simply the edge rows. The
//! undirected view drops self-loops and rows with a null endpoint and merges
//! `a -> b` with `b -> a`; it is held in a petgraph [`UnGraphMap`], which
//! stores each unordered pair once.

use crate::domain::{EdgeRecord, NodeId, NodeRecord};
use petgraph::graphmap::UnGraphMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Name reported when there is no most-connected node.
pub const NO_NODE_NAME: &str = "N/A";

/// Aggregate statistics shown above the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphMetrics {
    /// Number of edge rows
    pub edges_directed: usize,
    /// Number of distinct unordered endpoint pairs, self-loops excluded
    pub edges_undirected: usize,
    /// Number of distinct ids appearing as an edge endpoint
    pub num_nodes_connected: usize,
    /// Number of node rows
    pub num_nodes_all: usize,
    /// `edges_directed / num_nodes_all`
    pub avg_degree_all: f64,
    /// `2 * edges_undirected / num_nodes_connected`
    pub avg_degree_connected: f64,
    /// Nodes marked failed
    pub failed_entities: usize,
    /// Nodes not marked failed
    pub healthy_entities: usize,
}

/// The node with the most distinct neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostConnected {
    /// Node id, `None` when the graph has no usable edge
    pub id: Option<NodeId>,
    /// Number of distinct neighbours
    pub degree: usize,
    /// Display name, falling back to the id
    pub name: String,
}

impl MostConnected {
    /// The "no node" result.
    #[must_use]
    pub fn none() -> Self {
        Self {
            id: None,
            degree: 0,
            name: NO_NODE_NAME.to_string(),
        }
    }

    /// Returns `true` for the "no node" result.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.id.is_none()
    }
}

/// Build the undirected, deduplicated view of the edges.
///
/// Self-loops and edges with a null endpoint are left out.
#[must_use]
pub fn undirected_graph(edges: &[EdgeRecord]) -> UnGraphMap<&str, ()> {
    let mut graph = UnGraphMap::new();
    for edge in edges {
        let (Some(source), Some(target)) = (&edge.source_id, &edge.target_id) else {
            continue;
        };
        if source == target {
            continue;
        }
        graph.add_edge(source.as_str(), target.as_str(), ());
    }
    graph
}

/// Distinct unordered edges as `(u, v)` pairs with `u <= v`, sorted.
#[must_use]
pub fn undirected_edges(edges: &[EdgeRecord]) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = undirected_graph(edges)
        .all_edges()
        .map(|(a, b, _)| if a <= b { (a, b) } else { (b, a) })
        .collect();
    pairs.sort_unstable();
    pairs
}

/// Undirected degree of every node that has at least one usable edge.
#[must_use]
pub fn degrees(edges: &[EdgeRecord]) -> BTreeMap<&str, usize> {
    let graph = undirected_graph(edges);
    graph
        .nodes()
        .map(|node| (node, graph.neighbors(node).count()))
        .collect()
}

/// Compute the summary statistics for a node and edge set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> GraphMetrics {
    let edges_directed = edges.len();
    let num_nodes_connected = edges
        .iter()
        .flat_map(EdgeRecord::endpoints)
        .collect::<HashSet<_>>()
        .len();
    let num_nodes_all = nodes.len();
    let edges_undirected = undirected_graph(edges).edge_count();

    let avg_degree_all = if num_nodes_all > 0 {
        edges_directed as f64 / num_nodes_all as f64
    } else {
        0.0
    };
    let avg_degree_connected = if num_nodes_connected > 0 {
        2.0 * edges_undirected as f64 / num_nodes_connected as f64
    } else {
        0.0
    };

    let failed_entities = nodes.iter().filter(|n| n.failed()).count();

    GraphMetrics {
        edges_directed,
        edges_undirected,
        num_nodes_connected,
        num_nodes_all,
        avg_degree_all,
        avg_degree_connected,
        failed_entities,
        healthy_entities: num_nodes_all - failed_entities,
    }
}

/// Find the node with the highest undirected degree.
///
/// Ties go to the smallest id. Returns [`MostConnected::none`] when no
/// usable edge exists.
#[must_use]
pub fn most_connected_node(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> MostConnected {
    let graph = undirected_graph(edges);
    let top = graph
        .nodes()
        .map(|node| (node, graph.neighbors(node).count()))
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)));

    let Some((id, degree)) = top else {
        return MostConnected::none();
    };

    let name = nodes
        .iter()
        .find(|n| n.id.as_str() == id)
        .and_then(|n| n.name.clone())
        .unwrap_or_else(|| id.to_string());

    MostConnected {
        id: Some(NodeId::new(id)),
        degree,
        name,
    }
}
