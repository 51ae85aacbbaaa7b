//! Domain types for the job and pipeline dependency graph.
//!
//! The source table mixes two kinds of rows, told apart by the `result_type`
//! column: `NODES` rows describe jobs and pipelines, `EDGES` rows describe a
//! run-time dependency between two of them. A [`Record`] is one such row and
//! a [`RecordSet`] is the whole table split by kind.

mod lenient;
pub mod time;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status assigned to nodes that are not failed.
pub const STATUS_HEALTHY: &str = "HEALTHY";

/// Status assigned to failed nodes.
pub const STATUS_FAILED: &str = "FAILED";

/// Identity of a node (job or pipeline).
///
/// Warehouse exports sometimes carry ids as numbers; they are stringified on
/// load so that `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::string(deserializer).map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A job or pipeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identity
    pub id: NodeId,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Entity kind, e.g. `job` or `pipeline`
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,

    /// Whether the entity failed; absent means not failed
    #[serde(default)]
    pub is_failed: Option<bool>,

    /// Status text as reported by the warehouse
    #[serde(default)]
    pub status: Option<String>,

    /// Number of failures in the reporting window
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub failure_count: Option<i64>,

    /// Creation timestamp
    #[serde(default)]
    pub created_time: Option<String>,

    /// Timestamp of the most recent failure
    #[serde(default)]
    pub last_failed_time: Option<String>,

    /// Owning job id
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub job_id: Option<String>,

    /// Owning pipeline id
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub pipeline_id: Option<String>,

    /// Creator e-mail
    #[serde(default)]
    pub creator_email: Option<String>,

    /// Run-as identity e-mail
    #[serde(default)]
    pub run_as_email: Option<String>,
}

impl NodeRecord {
    /// Create a node with only its identity set.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            entity_type: None,
            is_failed: None,
            status: None,
            failure_count: None,
            created_time: None,
            last_failed_time: None,
            job_id: None,
            pipeline_id: None,
            creator_email: None,
            run_as_email: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the entity kind.
    #[must_use]
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Set the failed flag.
    #[must_use]
    pub fn with_failed(mut self, failed: bool) -> Self {
        self.is_failed = Some(failed);
        self
    }

    /// Set the status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the last failure timestamp.
    #[must_use]
    pub fn with_last_failed_time(mut self, time: impl Into<String>) -> Self {
        self.last_failed_time = Some(time.into());
        self
    }

    /// Returns `true` only when the node is explicitly marked failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.is_failed == Some(true)
    }

    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// A run-time dependency row between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge identity (may be missing in older exports)
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    /// Upstream node
    #[serde(default)]
    pub source_id: Option<NodeId>,

    /// Downstream node
    #[serde(default)]
    pub target_id: Option<NodeId>,

    /// Table through which the two entities are connected
    #[serde(default)]
    pub connecting_table: Option<String>,
}

impl EdgeRecord {
    /// Create an edge between two nodes.
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: Some(id.into()),
            source_id: Some(source.into()),
            target_id: Some(target.into()),
            connecting_table: None,
        }
    }

    /// Set the connecting table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.connecting_table = Some(table.into());
        self
    }

    /// Iterate over the non-null endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &NodeId> {
        self.source_id.iter().chain(self.target_id.iter())
    }
}

/// One row of the source table, discriminated by `result_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result_type")]
pub enum Record {
    /// A `NODES` row
    #[serde(rename = "NODES")]
    Node(NodeRecord),

    /// An `EDGES` row
    #[serde(rename = "EDGES")]
    Edge(EdgeRecord),
}

/// The source table split into its node and edge rows.
///
/// Each half keeps the order in which rows were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Node rows
    pub nodes: Vec<NodeRecord>,
    /// Edge rows
    pub edges: Vec<EdgeRecord>,
}

impl RecordSet {
    /// Create a record set from already separated rows.
    #[must_use]
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { nodes, edges }
    }

    /// Returns `true` if the table has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Total number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Find the first node row with the given id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Convert back into rows, nodes first.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.nodes
            .into_iter()
            .map(Record::Node)
            .chain(self.edges.into_iter().map(Record::Edge))
            .collect()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = Self::default();
        for record in iter {
            match record {
                Record::Node(node) => set.nodes.push(node),
                Record::Edge(edge) => set.edges.push(edge),
            }
        }
        set
    }
}
