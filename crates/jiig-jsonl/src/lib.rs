//! Resilient JSONL (JSON Lines) loading.
//!
//! Warehouse query results are exported one row object per line. This crate
//! reads such exports either strictly ([`read_jsonl`]) or resiliently
//! ([`read_jsonl_resilient`]), where unusable lines are skipped and reported
//! as [`Warning`]s instead of failing the whole load.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod stream;
pub mod warning;

pub use error::{Error, Result};
pub use reader::JsonlReader;
pub use stream::Entry;
pub use warning::Warning;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncRead;

/// Reads every line of `reader`, collecting values and warnings.
///
/// # Errors
///
/// Returns [`Error::Io`] if the underlying reader fails. Bad lines never
/// produce an error.
pub async fn read_resilient<T, R>(reader: R) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut entries = std::pin::pin!(stream::resilient::<T, _>(JsonlReader::new(reader)));
    let mut values = Vec::new();
    let mut warnings = Vec::new();

    while let Some(entry) = entries.next().await {
        match entry? {
            Entry::Value(value) => values.push(value),
            Entry::Warning(warning) => {
                tracing::debug!(
                    line = warning.line_number(),
                    kind = warning.kind(),
                    "Skipping JSONL line"
                );
                warnings.push(warning);
            }
        }
    }

    Ok((values, warnings))
}

/// Reads a JSONL file, skipping lines that cannot be parsed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> jiig_jsonl::Result<()> {
/// let (rows, warnings) =
///     jiig_jsonl::read_jsonl_resilient::<serde_json::Value, _>("dag.jsonl").await?;
/// for warning in &warnings {
///     eprintln!("{warning}");
/// }
/// println!("{} rows", rows.len());
/// # Ok(())
/// # }
/// ```
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = tokio::fs::File::open(path.as_ref()).await?;
    read_resilient(file).await
}

/// Reads a JSONL file, failing on the first line that cannot be parsed.
///
/// # Errors
///
/// Returns [`Error::Io`] on I/O failure, [`Error::Json`] with the offending
/// line number on a parse failure and [`Error::InvalidFormat`] on a line that
/// is not UTF-8.
pub async fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = tokio::fs::File::open(path.as_ref()).await?;
    let mut reader = JsonlReader::new(file);
    let mut values = Vec::new();
    while let Some(value) = reader.read_value().await? {
        values.push(value);
    }
    Ok(values)
}
