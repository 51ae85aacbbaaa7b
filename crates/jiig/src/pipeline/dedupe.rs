//! Deduplication stage: one canonical node per id.
//!
//! The source query can return the same entity several times, typically once
//! per run inside the reporting window. Rows are folded into a map from id to
//! the best row seen so far, where a failed row beats a healthy one and, among
//! failed rows, the most recent `last_failed_time` wins. Edges are untouched.

use crate::domain::time::parse_timestamp;
use crate::domain::{NodeId, NodeRecord, RecordSet, STATUS_FAILED, STATUS_HEALTHY};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Rows sharing one id, reduced to what the canonical choice needs.
struct Group<'a> {
    first: &'a NodeRecord,
    best_failed: Option<(&'a NodeRecord, Option<NaiveDateTime>)>,
    size: usize,
}

fn failure_time(node: &NodeRecord) -> Option<NaiveDateTime> {
    node.last_failed_time.as_deref().and_then(parse_timestamp)
}

impl<'a> Group<'a> {
    fn new(node: &'a NodeRecord) -> Self {
        Self {
            first: node,
            best_failed: node.failed().then(|| (node, failure_time(node))),
            size: 1,
        }
    }

    fn absorb(&mut self, node: &'a NodeRecord) {
        self.size += 1;
        if !node.failed() {
            return;
        }
        let time = failure_time(node);
        // Strictly later only: ties keep the earlier row. Missing times lose to any time.
        match self.best_failed {
            Some((_, best)) if time <= best => {}
            _ => self.best_failed = Some((node, time)),
        }
    }

    fn into_canonical(self) -> NodeRecord {
        if self.size == 1 {
            let mut node = self.first.clone();
            let failed = node.is_failed.unwrap_or(false);
            node.is_failed = Some(failed);
            let status = if failed { STATUS_FAILED } else { STATUS_HEALTHY };
            node.status.get_or_insert_with(|| status.to_string());
            return node;
        }

        match self.best_failed {
            Some((best, _)) => {
                let mut node = best.clone();
                node.status.get_or_insert_with(|| STATUS_FAILED.to_string());
                node
            }
            None => {
                let mut node = self.first.clone();
                node.is_failed = Some(false);
                node.status = Some(STATUS_HEALTHY.to_string());
                node
            }
        }
    }
}

/// Collapse duplicate node ids to one canonical row each.
///
/// Output nodes are ordered by id. Applying `dedupe` twice gives the same
/// result as applying it once.
#[must_use]
pub fn dedupe(records: &RecordSet) -> RecordSet {
    if records.nodes.is_empty() {
        return records.clone();
    }

    let groups = records
        .nodes
        .iter()
        .fold(BTreeMap::<&NodeId, Group>::new(), |mut groups, node| {
            groups
                .entry(&node.id)
                .and_modify(|group| group.absorb(node))
                .or_insert_with(|| Group::new(node));
            groups
        });

    let nodes: Vec<NodeRecord> = groups.into_values().map(Group::into_canonical).collect();

    tracing::debug!(
        rows = records.nodes.len(),
        distinct = nodes.len(),
        "Deduplicated nodes"
    );

    RecordSet::new(nodes, records.edges.clone())
}
