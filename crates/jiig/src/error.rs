//! Error types for jiig operations.
//!
//! The pipeline stages themselves are total and never fail. Errors come from
//! the edges of the system: loading configuration, fetching the record table
//! and looking up a node the caller asked for by id.

use thiserror::Error;

/// The error type for jiig operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The record source could not produce the table.
    #[error("record fetch failed: {0}. Check the data file path and table export.")]
    Source(String),

    /// No node with the requested id exists in the rendered graph.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

impl From<jiig_jsonl::Error> for Error {
    fn from(err: jiig_jsonl::Error) -> Self {
        Self::Source(err.to_string())
    }
}

/// A specialized Result type for jiig operations.
pub type Result<T> = std::result::Result<T, Error>;
