//! JSON serialization for programmatic output.

use super::NodeDetails;
use crate::pipeline::{FilterMode, GraphMetrics, MostConnected, NodeData, PipelineOutput};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct MetricsView<'a> {
    filter_mode: FilterMode,
    metrics: &'a GraphMetrics,
    most_connected: &'a MostConnected,
}

#[derive(Serialize)]
struct NodeListView<'a> {
    filter_mode: FilterMode,
    count: usize,
    nodes: &'a [&'a NodeData],
}

#[derive(Serialize)]
struct NoDataView {
    no_data: bool,
    message: &'static str,
}

pub(super) fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::other)?;
    writeln!(w)
}

pub(super) fn print_metrics_json<W: Write>(w: &mut W, output: &PipelineOutput) -> io::Result<()> {
    write_json(
        w,
        &MetricsView {
            filter_mode: output.filter_mode,
            metrics: &output.metrics,
            most_connected: &output.most_connected,
        },
    )
}

pub(super) fn print_nodes_json<W: Write>(
    w: &mut W,
    filter_mode: FilterMode,
    nodes: &[&NodeData],
) -> io::Result<()> {
    write_json(
        w,
        &NodeListView {
            filter_mode,
            count: nodes.len(),
            nodes,
        },
    )
}

pub(super) fn print_node_details_json<W: Write>(w: &mut W, details: &NodeDetails<'_>) -> io::Result<()> {
    write_json(w, details)
}

pub(super) fn print_no_data_json<W: Write>(w: &mut W, message: &'static str) -> io::Result<()> {
    write_json(
        w,
        &NoDataView {
            no_data: true,
            message,
        },
    )
}
