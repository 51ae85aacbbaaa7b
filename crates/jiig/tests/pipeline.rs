//! End-to-end scenarios for the graph pipeline, from JSONL rows to elements.

use jiig::domain::{EdgeRecord, NodeRecord, Record, RecordSet};
use jiig::pipeline::metrics::NO_NODE_NAME;
use jiig::pipeline::{
    FilterMode, Highlight, PipelineConfig, compute_metrics, dedupe, filter, most_connected_node,
    run,
};
use rstest::rstest;

fn rows(lines: &[&str]) -> RecordSet {
    lines
        .iter()
        .map(|line| serde_json::from_str::<Record>(line).expect("valid row"))
        .collect()
}

#[test]
fn failed_job_and_its_consumer() {
    let records = RecordSet::new(
        vec![
            NodeRecord::new("1").with_failed(true),
            NodeRecord::new("2").with_failed(false),
        ],
        vec![EdgeRecord::new("e", "1", "2")],
    );

    let filtered = filter(&records, FilterMode::FailedSubgraph);
    assert_eq!(filtered.nodes.len(), 2);
    assert_eq!(filtered.edges.len(), 1);

    let metrics = compute_metrics(&filtered.nodes, &filtered.edges);
    assert_eq!(metrics.failed_entities, 1);
    assert_eq!(metrics.healthy_entities, 1);
    assert_eq!(metrics.edges_undirected, 1);
    assert!((metrics.avg_degree_connected - 1.0).abs() < f64::EPSILON);
}

#[test]
fn duplicate_rows_keep_the_failure() {
    let records = RecordSet::new(
        vec![
            NodeRecord::new("1")
                .with_failed(true)
                .with_last_failed_time("2024-01-02"),
            NodeRecord::new("1").with_failed(false),
        ],
        vec![],
    );

    let nodes = dedupe(&records).nodes;
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].failed());
    assert_eq!(nodes[0].last_failed_time.as_deref(), Some("2024-01-02"));
}

#[test]
fn no_edges_means_no_most_connected_node() {
    let top = most_connected_node(&[NodeRecord::new("a")], &[]);
    assert!(top.id.is_none());
    assert_eq!(top.degree, 0);
    assert_eq!(top.name, NO_NODE_NAME);
}

#[test]
fn self_loop_is_not_an_undirected_edge() {
    let edges = vec![EdgeRecord::new("loop", "a", "a")];
    let metrics = compute_metrics(&[NodeRecord::new("a")], &edges);
    assert_eq!(metrics.edges_directed, 1);
    assert_eq!(metrics.edges_undirected, 0);
}

#[test]
fn rows_from_the_export_format() {
    let records = rows(&[
        r#"{"result_type":"NODES","id":10,"name":"load","type":"JOB","is_failed":true,"failure_count":2.0,"last_failed_time":"2024-03-01T10:00:00Z"}"#,
        r#"{"result_type":"NODES","id":10,"name":"load","type":"JOB","is_failed":true,"last_failed_time":"2024-03-02T10:00:00Z","status":"LATEST"}"#,
        r#"{"result_type":"NODES","id":11,"name":null,"type":"PIPELINE","is_failed":null}"#,
        r#"{"result_type":"EDGES","id":"x","source_id":10,"target_id":11,"connecting_table":"sales.daily"}"#,
    ]);

    let output = run(&records, &PipelineConfig::default()).expect("data");
    let nodes = &output.elements.nodes;

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].data.id, "10");
    assert_eq!(nodes[0].data.status, "LATEST");
    assert_eq!(nodes[1].data.name, "11");
    assert_eq!(nodes[1].data.label, "PIPELINE_HEALTHY");
    assert_eq!(output.elements.edges[0].data.connecting_table, "sales.daily");
    assert!(output.elements.edges[0].data.source_failed);
}

#[rstest]
#[case::failed_subgraph(FilterMode::FailedSubgraph, 3)]
#[case::connected_only(FilterMode::ConnectedOnly, 4)]
#[case::all(FilterMode::All, 5)]
fn modes_widen_the_view(#[case] mode: FilterMode, #[case] expected_nodes: usize) {
    let records = RecordSet::new(
        vec![
            NodeRecord::new("f").with_failed(true),
            NodeRecord::new("up"),
            NodeRecord::new("down"),
            NodeRecord::new("far"),
            NodeRecord::new("alone"),
        ],
        vec![
            EdgeRecord::new("1", "up", "f"),
            EdgeRecord::new("2", "f", "down"),
            EdgeRecord::new("3", "down", "far"),
        ],
    );

    let output = run(&records, &PipelineConfig::new(mode)).expect("data");
    assert_eq!(output.metrics.num_nodes_all, expected_nodes);
}

#[test]
fn focus_on_node_outside_the_view_highlights_nothing() {
    let records = RecordSet::new(
        vec![NodeRecord::new("f").with_failed(true), NodeRecord::new("other")],
        vec![],
    );
    let config = PipelineConfig::default().with_highlight(Highlight::Node("other".into()));

    let output = run(&records, &config).expect("data");
    assert_eq!(output.elements.nodes.len(), 1);
    assert!(!output.elements.nodes[0].data.label.ends_with("_HIGHLIGHT"));
}
