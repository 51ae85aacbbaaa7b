//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Every
//! command fetches the table, runs the pipeline and hands the result to the
//! output layer; an empty table prints a "no data" notice and succeeds.

use anyhow::Result;

use super::args::{GraphArgs, MetricsArgs, NodesArgs, ShowArgs};
use super::types::FilterModeArg;
use crate::app::App;
use crate::domain::NodeId;
use crate::error::Error;
use crate::output::{self, NodeDetails, OutputMode};
use crate::pipeline::{Highlight, PipelineConfig, PipelineOutput};

/// Pipeline settings from configuration, with the `--mode` flag applied.
fn pipeline_config(app: &App, mode: Option<FilterModeArg>) -> PipelineConfig {
    let mut config = app.pipeline_config();
    if let Some(mode) = mode {
        config.filter_mode = mode.into();
    }
    config
}

/// Run the pipeline, printing the no-data notice when the table is empty.
async fn run_pipeline(
    app: &App,
    config: &PipelineConfig,
    output_mode: OutputMode,
) -> Result<Option<PipelineOutput>> {
    let output = app.run(config).await?;
    if output.is_none() {
        output::print_no_data(output_mode)?;
    }
    Ok(output)
}

/// Execute the metrics command
pub async fn execute_metrics(app: &App, args: &MetricsArgs, output_mode: OutputMode) -> Result<()> {
    let config = pipeline_config(app, args.mode);
    if let Some(output) = run_pipeline(app, &config, output_mode).await? {
        output::print_metrics(&output, output_mode)?;
    }
    Ok(())
}

/// Execute the nodes command
pub async fn execute_nodes(app: &App, args: &NodesArgs, output_mode: OutputMode) -> Result<()> {
    let config = pipeline_config(app, args.mode);
    if let Some(output) = run_pipeline(app, &config, output_mode).await? {
        output::print_nodes(&output, args.failed, output_mode)?;
    }
    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let config = pipeline_config(app, args.mode);
    let Some(output) = run_pipeline(app, &config, output_mode).await? else {
        return Ok(());
    };

    let details = NodeDetails::find(&output, &args.id).ok_or_else(|| {
        tracing::debug!(id = %args.id, mode = %config.filter_mode, "Node not in filtered graph");
        Error::NodeNotFound(args.id.clone())
    })?;
    output::print_node_details(&details, output_mode)?;
    Ok(())
}

/// Execute the graph command
///
/// The payload is always machine readable: JSON unless `--format dot`.
pub async fn execute_graph(app: &App, args: &GraphArgs, output_mode: OutputMode) -> Result<()> {
    let mut config = pipeline_config(app, args.mode);
    if let Some(layout) = args.layout {
        config.layout = layout.into();
    }
    config.highlight = match (&args.focus, args.focus_most_connected) {
        (Some(id), _) => Highlight::Node(NodeId::new(id.as_str())),
        (None, true) => Highlight::MostConnected,
        (None, false) => Highlight::None,
    };

    if let Some(output) = run_pipeline(app, &config, output_mode).await? {
        output::print_graph(&output, args.format.into())?;
    }
    Ok(())
}
