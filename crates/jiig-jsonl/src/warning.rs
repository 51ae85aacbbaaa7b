//! Non-fatal problems found while reading JSONL data.
//!
//! Warehouse exports are occasionally dirty: a truncated line, a row written
//! with a different encoding, a row without its discriminator column. The
//! resilient readers skip such lines and report a [`Warning`] carrying the
//! line number, so the rest of the table still loads.
//!
//! # Examples
//!
//! ```
//! use jiig_jsonl::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! };
//! assert_eq!(warning.line_number(), 5);
//! assert_eq!(warning.kind(), "malformed_json");
//! ```

/// A non-fatal warning that occurred during JSONL processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A non-empty line is not valid JSON (truncated, unbalanced, stray text).
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the parsing error.
        error: String,
    },

    /// A line is valid JSON but not a usable row: a missing or unknown
    /// `result_type`, or a column of the wrong type.
    InvalidRow {
        /// The 1-based line number of the row.
        line_number: usize,
        /// What serde rejected.
        error: String,
    },

    /// A line was skipped before parsing was attempted.
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. }
            | Self::InvalidRow { line_number, .. }
            | Self::SkippedLine { line_number, .. } => *line_number,
        }
    }

    /// Returns a human-readable description of the warning.
    ///
    /// ```
    /// use jiig_jsonl::Warning;
    ///
    /// let warning = Warning::SkippedLine {
    ///     line_number: 3,
    ///     reason: "invalid UTF-8".to_string(),
    /// };
    /// assert_eq!(warning.description(), "line 3: skipped: invalid UTF-8");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedJson { line_number, error } => {
                format!("line {line_number}: malformed JSON: {error}")
            }
            Self::InvalidRow { line_number, error } => {
                format!("line {line_number}: invalid row: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => format!("line {line_number}: skipped: {reason}"),
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::InvalidRow { .. } => "invalid_row",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_number_for_each_variant() {
        let malformed = Warning::MalformedJson {
            line_number: 42,
            error: "unexpected token".to_string(),
        };
        let skipped = Warning::SkippedLine {
            line_number: 9,
            reason: "invalid UTF-8".to_string(),
        };
        assert_eq!(malformed.line_number(), 42);
        assert_eq!(skipped.line_number(), 9);
    }

    #[test]
    fn display_matches_description() {
        let warning = Warning::InvalidRow {
            line_number: 2,
            error: "missing field `result_type`".to_string(),
        };
        assert_eq!(warning.to_string(), warning.description());
        assert!(warning.to_string().contains("line 2"));
        assert!(warning.to_string().contains("result_type"));
    }

    #[test]
    fn kind_is_stable() {
        let skipped = Warning::SkippedLine {
            line_number: 1,
            reason: String::new(),
        };
        assert_eq!(skipped.kind(), "skipped_line");
        let invalid = Warning::InvalidRow {
            line_number: 1,
            error: String::new(),
        };
        assert_eq!(invalid.kind(), "invalid_row");
    }
}
