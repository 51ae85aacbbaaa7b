//! Error types for jiig-jsonl operations.

use std::io;
use thiserror::Error;

/// The error type for jiig-jsonl operations.
///
/// Only failures that stop a read are errors. Per-line problems found by the
/// resilient readers are reported as [`Warning`](crate::Warning)s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be deserialized (strict reads only).
    #[error("JSON error at line {line_number}: {source}")]
    Json {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid JSONL format.
    #[error("Invalid JSONL format: {0}")]
    InvalidFormat(String),
}

/// A specialized Result type for jiig-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_mentions_line_number() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::Json {
            line_number: 7,
            source,
        };
        assert!(err.to_string().starts_with("JSON error at line 7"));
    }

    #[test]
    fn io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
