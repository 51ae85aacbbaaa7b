//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for CLI argument parsing
//! and their conversions to/from domain types.

use clap::ValueEnum;

use crate::output::GraphFormat;
use crate::pipeline::{FilterMode, Layout};

// ============================================================================
// Value Enums
// ============================================================================

/// Filter view for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterModeArg {
    /// Failed nodes plus their direct neighbours
    #[value(name = "failed_subgraph", alias = "failed-subgraph")]
    FailedSubgraph,
    /// Every node on an edge, plus failed nodes
    #[value(name = "connected_only", alias = "connected-only")]
    ConnectedOnly,
    /// Everything
    All,
}

impl std::fmt::Display for FilterModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", FilterMode::from(*self))
    }
}

/// Graph layout for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    /// Rings by degree
    Concentric,
    /// Force directed
    Cose,
    /// Tree levels
    Breadthfirst,
    /// Single ring
    Circle,
    /// Regular grid
    Grid,
}

impl std::fmt::Display for LayoutArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Layout::from(*self))
    }
}

/// Output format for the graph command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormatArg {
    /// Renderer payload as JSON
    #[default]
    Json,
    /// Graphviz DOT
    Dot,
}

impl std::fmt::Display for GraphFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Dot => write!(f, "dot"),
        }
    }
}

// ============================================================================
// Domain Type Conversions
// ============================================================================

impl From<FilterModeArg> for FilterMode {
    fn from(arg: FilterModeArg) -> Self {
        match arg {
            FilterModeArg::FailedSubgraph => FilterMode::FailedSubgraph,
            FilterModeArg::ConnectedOnly => FilterMode::ConnectedOnly,
            FilterModeArg::All => FilterMode::All,
        }
    }
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Concentric => Layout::Concentric,
            LayoutArg::Cose => Layout::Cose,
            LayoutArg::Breadthfirst => Layout::Breadthfirst,
            LayoutArg::Circle => Layout::Circle,
            LayoutArg::Grid => Layout::Grid,
        }
    }
}

impl From<GraphFormatArg> for GraphFormat {
    fn from(arg: GraphFormatArg) -> Self {
        match arg {
            GraphFormatArg::Json => GraphFormat::Json,
            GraphFormatArg::Dot => GraphFormat::Dot,
        }
    }
}
