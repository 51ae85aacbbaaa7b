//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for jiig using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `metrics`: Graph statistics and the most connected node
//! - `nodes`: List nodes after filtering and deduplication
//! - `show`: Show one node with its upstream and downstream edges
//! - `graph`: Emit the renderer payload (JSON or Graphviz DOT)
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config <PATH>`: Configuration file (default `./jiig.yaml`)
//! - `--data <PATH>`: JSONL export to read (overrides `data-file`)
//!
//! # Example
//!
//! ```bash
//! jiig metrics --mode connected_only
//! jiig nodes --failed
//! jiig show 1042
//! jiig graph --focus-most-connected --format dot | dot -Tsvg > dag.svg
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{GraphArgs, MetricsArgs, NodesArgs, ShowArgs};

// Re-export types
pub use types::{FilterModeArg, GraphFormatArg, LayoutArg};

// Re-export validators for external use
pub use validators::validate_node_id;

/// Jiig - job and pipeline dependency graph
///
/// Reads a warehouse export of jobs, pipelines and the tables connecting them,
/// and shows where failures sit and what they affect.
#[derive(Parser, Debug)]
#[command(name = "jiig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSONL export to read
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show graph metrics
    ///
    /// Counts failed and healthy entities, directed and undirected edges,
    /// average degrees and the most connected node.
    Metrics(MetricsArgs),

    /// List nodes
    ///
    /// Shows one row per entity after filtering and deduplication.
    Nodes(NodesArgs),

    /// Show detailed information about a node
    ///
    /// Displays all fields of a node with the edges entering and leaving it.
    Show(ShowArgs),

    /// Emit the graph payload
    ///
    /// Elements, metrics, layout and styles as JSON, or Graphviz DOT.
    Graph(GraphArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns configuration, fetch and lookup failures.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Jiig job and pipeline dependency graph");
            println!("Use --help for more information");
            return Ok(());
        };

        let app = App::from_directory(
            &std::env::current_dir()?,
            self.config.as_deref(),
            self.data.as_deref(),
        )
        .await?;

        match command {
            Commands::Metrics(args) => execute::execute_metrics(&app, args, output_mode).await,
            Commands::Nodes(args) => execute::execute_nodes(&app, args, output_mode).await,
            Commands::Show(args) => execute::execute_show(&app, args, output_mode).await,
            Commands::Graph(args) => execute::execute_graph(&app, args, output_mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["jiig"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert!(cli.config.is_none());
        assert!(cli.data.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jiig", "metrics", "--json", "--data", "x.jsonl", "--config", "c.yaml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data, Some(PathBuf::from("x.jsonl")));
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
        assert!(matches!(cli.command, Some(Commands::Metrics(_))));
    }

    #[test]
    fn test_parse_metrics_mode() {
        let cli = Cli::try_parse_from(["jiig", "metrics", "--mode", "connected_only"]).unwrap();
        match cli.command {
            Some(Commands::Metrics(args)) => {
                assert_eq!(args.mode, Some(FilterModeArg::ConnectedOnly));
            }
            _ => panic!("Expected Metrics command"),
        }
    }

    #[test]
    fn test_parse_mode_alias() {
        let cli = Cli::try_parse_from(["jiig", "nodes", "-m", "failed-subgraph"]).unwrap();
        match cli.command {
            Some(Commands::Nodes(args)) => {
                assert_eq!(args.mode, Some(FilterModeArg::FailedSubgraph));
                assert!(!args.failed);
            }
            _ => panic!("Expected Nodes command"),
        }
    }

    #[test]
    fn test_parse_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["jiig", "metrics", "--mode", "everything"]).is_err());
    }

    #[test]
    fn test_parse_nodes_failed() {
        let cli = Cli::try_parse_from(["jiig", "nodes", "--failed"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Nodes(NodesArgs { failed: true, .. }))));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["jiig", "show", " 1042 "]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.id, "1042"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_parse_show_requires_id() {
        assert!(Cli::try_parse_from(["jiig", "show"]).is_err());
        assert!(Cli::try_parse_from(["jiig", "show", "  "]).is_err());
    }

    #[test]
    fn test_parse_graph_defaults() {
        let cli = Cli::try_parse_from(["jiig", "graph"]).unwrap();
        match cli.command {
            Some(Commands::Graph(args)) => {
                assert!(args.mode.is_none());
                assert!(args.layout.is_none());
                assert!(args.focus.is_none());
                assert!(!args.focus_most_connected);
                assert_eq!(args.format, GraphFormatArg::Json);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_full() {
        let cli = Cli::try_parse_from([
            "jiig", "graph", "--layout", "cose", "--focus", "7", "--format", "dot",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Graph(args)) => {
                assert_eq!(args.layout, Some(LayoutArg::Cose));
                assert_eq!(args.focus.as_deref(), Some("7"));
                assert_eq!(args.format, GraphFormatArg::Dot);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_focus_conflict() {
        let result =
            Cli::try_parse_from(["jiig", "graph", "--focus", "7", "--focus-most-connected"]);
        assert!(result.is_err());
    }
}
