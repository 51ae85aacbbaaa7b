//! Streaming operations for JSONL data.
//!
//! [`resilient`] turns a [`JsonlReader`] into a stream that yields one
//! [`Entry`] per non-blank line. Lines that cannot be used become
//! [`Entry::Warning`] and the stream keeps going; only an I/O failure ends it
//! early, as a final `Err` item.

use crate::error::Result;
use crate::reader::JsonlReader;
use crate::warning::Warning;
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tokio::io::AsyncRead;

/// One item produced by a resilient JSONL stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    /// A successfully deserialized line.
    Value(T),
    /// A line that was skipped.
    Warning(Warning),
}

/// Streams deserialized values out of `reader`, downgrading bad lines to warnings.
///
/// Blank lines are ignored silently. Lines that are not UTF-8 produce
/// [`Warning::SkippedLine`]. Lines that are not JSON produce
/// [`Warning::MalformedJson`]; JSON that does not fit `T` produces
/// [`Warning::InvalidRow`].
///
/// # Examples
///
/// ```
/// use futures::StreamExt;
/// use jiig_jsonl::reader::JsonlReader;
/// use jiig_jsonl::stream::{resilient, Entry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let data = std::io::Cursor::new(b"1\nnot json\n3\n".to_vec());
/// let entries: Vec<_> = resilient::<u32, _>(JsonlReader::new(data)).collect().await;
///
/// assert_eq!(entries.len(), 3);
/// assert!(matches!(entries[1], Ok(Entry::Warning(_))));
/// # }
/// ```
pub fn resilient<T, R>(reader: JsonlReader<R>) -> impl Stream<Item = Result<Entry<T>>>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    stream::unfold(Some(reader), |state| async move {
        let mut reader = state?;
        loop {
            let bytes = match reader.next_line().await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => return None,
                Err(e) => return Some((Err(e), None)),
            };
            let line_number = reader.line_number();

            let Ok(line) = std::str::from_utf8(&bytes) else {
                let warning = Warning::SkippedLine {
                    line_number,
                    reason: "invalid UTF-8".to_string(),
                };
                return Some((Ok(Entry::Warning(warning)), Some(reader)));
            };
            if line.trim().is_empty() {
                continue;
            }

            // Syntax is checked on its own: deserializing straight into `T`
            // can reject the first token before the rest of the line is read.
            let entry = match serde_json::from_str::<serde_json::Value>(line) {
                Err(e) => Entry::Warning(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                }),
                Ok(json) => match serde_json::from_value::<T>(json) {
                    Ok(value) => Entry::Value(value),
                    Err(e) => Entry::Warning(Warning::InvalidRow {
                        line_number,
                        error: e.to_string(),
                    }),
                },
            };
            return Some((Ok(entry), Some(reader)));
        }
    })
}
