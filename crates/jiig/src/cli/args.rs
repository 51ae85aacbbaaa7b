//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::types::{FilterModeArg, GraphFormatArg, LayoutArg};
use super::validators::validate_node_id;

/// Arguments for the `metrics` command
#[derive(Parser, Debug, Clone, Default)]
pub struct MetricsArgs {
    /// Filter view (defaults to the configured filter-mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<FilterModeArg>,
}

/// Arguments for the `nodes` command
#[derive(Parser, Debug, Clone, Default)]
pub struct NodesArgs {
    /// Filter view (defaults to the configured filter-mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<FilterModeArg>,

    /// Only list failed nodes
    #[arg(short, long)]
    pub failed: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Node ID to show
    #[arg(value_parser = validate_node_id)]
    pub id: String,

    /// Filter view (defaults to the configured filter-mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<FilterModeArg>,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Filter view (defaults to the configured filter-mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<FilterModeArg>,

    /// Layout algorithm (defaults to the configured layout)
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Highlight this node
    #[arg(long, value_parser = validate_node_id, conflicts_with = "focus_most_connected")]
    pub focus: Option<String>,

    /// Highlight the node with the most distinct neighbours
    #[arg(long)]
    pub focus_most_connected: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: GraphFormatArg,
}
