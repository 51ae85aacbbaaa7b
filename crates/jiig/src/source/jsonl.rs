//! Record table read from a JSONL export.
//!
//! Each line holds one row tagged with `result_type` (`NODES` or `EDGES`).
//! Unparseable lines, including rows whose `result_type` is missing or
//! unknown, are skipped and logged with their line number.

use super::RecordSource;
use crate::domain::{Record, RecordSet};
use crate::error::Result;
use async_trait::async_trait;
use jiig_jsonl::{Warning, read_jsonl_resilient};
use std::path::{Path, PathBuf};

/// A source reading a JSONL export file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    /// Create a source for the export at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the export, returning the table and the skipped-line warnings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Source`] if the file cannot be opened
    /// or read.
    pub async fn load(&self) -> Result<(RecordSet, Vec<Warning>)> {
        let (records, warnings) = read_jsonl_resilient::<Record, _>(&self.path).await?;
        for warning in &warnings {
            tracing::warn!(path = %self.path.display(), "{warning}");
        }

        let records: RecordSet = records.into_iter().collect();
        tracing::debug!(
            path = %self.path.display(),
            nodes = records.nodes.len(),
            edges = records.edges.len(),
            skipped = warnings.len(),
            "Loaded record table"
        );
        Ok((records, warnings))
    }
}

#[async_trait]
impl RecordSource for JsonlSource {
    async fn fetch(&self) -> Result<RecordSet> {
        let (records, _) = self.load().await?;
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("JSONL export {}", self.path.display())
    }
}
