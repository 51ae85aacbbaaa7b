//! Where the record table comes from.
//!
//! The pipeline works on a fully materialized [`RecordSet`]. A
//! [`RecordSource`] produces one; implementations decide whether that means
//! reading an export file, returning a fixture, or serving a cached copy.
//!
//! # Example
//!
//! ```no_run
//! use jiig::source::{CachedSource, JsonlSource, RecordSource};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let source = CachedSource::new(JsonlSource::new("dag.jsonl"), Duration::from_secs(300));
//!     let records = source.fetch().await?;
//!     println!("{} rows from {}", records.len(), source.describe());
//!     Ok(())
//! }
//! ```

use crate::domain::RecordSet;
use crate::error::Result;
use async_trait::async_trait;

mod cached;
mod jsonl;

pub use cached::CachedSource;
pub use jsonl::JsonlSource;

/// Producer of the combined node and edge table.
///
/// Implementations must be `Send + Sync` so a source can sit behind a
/// `Box<dyn RecordSource>` in the application context.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the full table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Source`] when the table cannot be read.
    async fn fetch(&self) -> Result<RecordSet>;

    /// Short human description of the source, used in log lines.
    fn describe(&self) -> String;
}

/// A source backed by a table already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: RecordSet,
}

impl InMemorySource {
    /// Serve `records` on every fetch.
    #[must_use]
    pub fn new(records: RecordSet) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch(&self) -> Result<RecordSet> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.records.len())
    }
}
