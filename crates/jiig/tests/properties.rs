//! Property-based tests for the pipeline stages
//!
//! Invariants that should hold for ALL record tables:
//! - Idempotence: dedupe(dedupe(x)) == dedupe(x)
//! - Monotonicity: narrower filter views never show more than `all`
//! - Symmetry: reversing every edge keeps the undirected edge count
//! - Handshake: degrees sum to twice the undirected edge count

use jiig::domain::{EdgeRecord, NodeId, NodeRecord, RecordSet};
use jiig::pipeline::metrics::degrees;
use jiig::pipeline::{FilterMode, compute_metrics, dedupe, filter};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Ids drawn from a small pool so duplicates and shared endpoints are common.
fn node_id() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| n.to_string())
}

fn failure_time() -> impl Strategy<Value = Option<String>> {
    prop::option::of((1u32..28, 0u32..24).prop_map(|(d, h)| format!("2024-01-{d:02} {h:02}:00:00")))
}

fn node() -> impl Strategy<Value = NodeRecord> {
    (
        node_id(),
        prop::option::of(any::<bool>()),
        prop::option::of("[A-Z]{3,8}"),
        failure_time(),
    )
        .prop_map(|(id, failed, status, time)| {
            let mut node = NodeRecord::new(id);
            node.is_failed = failed;
            node.status = status;
            node.last_failed_time = time;
            node
        })
}

fn edge() -> impl Strategy<Value = EdgeRecord> {
    (
        prop::option::of(node_id()),
        prop::option::of(node_id()),
        prop::option::of("[a-z]{2,6}\\.[a-z]{2,6}"),
    )
        .prop_map(|(source, target, table)| EdgeRecord {
            id: None,
            source_id: source.map(NodeId::from),
            target_id: target.map(NodeId::from),
            connecting_table: table,
        })
}

fn record_set() -> impl Strategy<Value = RecordSet> {
    (
        prop::collection::vec(node(), 0..24),
        prop::collection::vec(edge(), 0..24),
    )
        .prop_map(|(nodes, edges)| RecordSet::new(nodes, edges))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn dedupe_is_idempotent(records in record_set()) {
        let once = dedupe(&records);
        prop_assert_eq!(dedupe(&once), once);
    }

    #[test]
    fn dedupe_leaves_one_row_per_id(records in record_set()) {
        let deduped = dedupe(&records);
        let mut ids: Vec<&str> = deduped.nodes.iter().map(|n| n.id.as_str()).collect();
        let before = ids.len();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
        prop_assert_eq!(&deduped.edges, &records.edges);
    }

    #[test]
    fn narrower_views_show_no_more_than_all(records in record_set()) {
        let all = filter(&records, FilterMode::All);
        for mode in [FilterMode::FailedSubgraph, FilterMode::ConnectedOnly] {
            let view = filter(&records, mode);
            prop_assert!(view.nodes.len() <= all.nodes.len());
            prop_assert!(view.edges.len() <= all.edges.len());
        }
    }

    #[test]
    fn failed_nodes_survive_every_filter(records in record_set()) {
        let failed = records.nodes.iter().filter(|n| n.failed()).count();
        for mode in FilterMode::MODES {
            let view = filter(&records, mode);
            prop_assert_eq!(view.nodes.iter().filter(|n| n.failed()).count(), failed);
        }
    }

    #[test]
    fn reversing_edges_keeps_undirected_count(records in record_set()) {
        let reversed: Vec<EdgeRecord> = records
            .edges
            .iter()
            .cloned()
            .map(|mut e| {
                std::mem::swap(&mut e.source_id, &mut e.target_id);
                e
            })
            .collect();

        let forward = compute_metrics(&records.nodes, &records.edges);
        let backward = compute_metrics(&records.nodes, &reversed);
        prop_assert_eq!(forward.edges_undirected, backward.edges_undirected);
        prop_assert_eq!(forward.num_nodes_connected, backward.num_nodes_connected);
    }

    #[test]
    fn degree_sum_is_twice_undirected_edges(records in record_set()) {
        let total: usize = degrees(&records.edges).values().sum();
        let metrics = compute_metrics(&records.nodes, &records.edges);
        prop_assert_eq!(total, 2 * metrics.edges_undirected);
    }

    #[test]
    fn failed_plus_healthy_is_all(records in record_set()) {
        let metrics = compute_metrics(&records.nodes, &records.edges);
        prop_assert_eq!(metrics.failed_entities + metrics.healthy_entities, metrics.num_nodes_all);
    }
}
