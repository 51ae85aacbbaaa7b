//! JSONL reading operations.
//!
//! This module provides async functionality for reading JSONL files line-by-line
//! with efficient buffering and line number tracking for error reporting.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader and provides buffered reading of JSONL
/// formatted data. It tracks line numbers to provide useful context in error
/// messages and warnings when parsing fails.
///
/// # Examples
///
/// ```no_run
/// use jiig_jsonl::reader::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("dag.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(row) = reader.read_value::<serde_json::Value>().await? {
///     println!("{row}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Current line number (1-based counting, 0 before any lines are read).
    line_number: usize,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read. After reading, returns the
    /// 1-based line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next raw line, without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input. `\n` and `\r\n` terminators are
    /// both accepted. The bytes are returned as-is so that callers can decide
    /// how to treat invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    /// Reads and deserializes the next non-blank line.
    ///
    /// This is the strict counterpart of the resilient stream: the first line
    /// that fails to parse ends the read with an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on read failure, [`Error::InvalidFormat`] for a
    /// line that is not UTF-8 and [`Error::Json`] for a line that does not
    /// deserialize into `T`.
    pub async fn read_value<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        while let Some(bytes) = self.next_line().await? {
            let line = std::str::from_utf8(&bytes).map_err(|e| {
                Error::InvalidFormat(format!("line {} is not valid UTF-8: {e}", self.line_number))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|source| Error::Json {
                    line_number: self.line_number,
                    source,
                });
        }
        Ok(None)
    }
}
