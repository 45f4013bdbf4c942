//! Formatting capture for byte-faithful re-serialization.
//!
//! Only two facts are captured: the whitespace run used per nesting level and
//! whether the file ends with a newline. Re-serializing a value with the
//! formatting captured from a document that was itself produced by
//! [`crate::service::ManifestService::serialize`] reproduces that document
//! exactly.

use serde::{Deserialize, Serialize};

/// Indent used when a document has no indented line.
pub const DEFAULT_INDENT: &str = "  ";

/// Formatting metadata captured from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formatting {
    /// Literal whitespace run used per nesting level.
    pub indent: String,
    /// Whether the document ends with a newline.
    pub trailing_newline: bool,
}

impl Formatting {
    /// Captures formatting from raw document text.
    pub fn detect(text: &str) -> Self {
        Self {
            indent: detect_indentation(text),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Formatting with the given indent and a trailing newline.
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            trailing_newline: true,
        }
    }
}

impl Default for Formatting {
    fn default() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }
}

/// Returns the leading spaces and tabs of the first indented line.
///
/// Blank lines and lines holding only an opening `{` or `[` are skipped.
pub fn detect_indentation(text: &str) -> String {
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "{" || trimmed == "[" {
            continue;
        }

        let content_start = line
            .char_indices()
            .find(|(_, c)| *c != ' ' && *c != '\t')
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        if content_start > 0 {
            return line[..content_start].to_string();
        }
    }

    DEFAULT_INDENT.to_string()
}

/// Whether `indent` can be written between JSON tokens and detected again.
pub fn is_valid_indent(indent: &str) -> bool {
    !indent.is_empty() && indent.chars().all(|c| c == ' ' || c == '\t')
}

/// Where a parser located a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPosition {
    /// Character offset from the start of the text.
    Offset(usize),
    /// 1-based line and column.
    LineColumn { line: usize, column: usize },
    /// The parser gave no position.
    Unknown,
}

impl ErrorPosition {
    /// Resolves the position to a 1-based `(line, column)` within `text`.
    pub fn resolve(self, text: &str) -> Option<(usize, usize)> {
        match self {
            ErrorPosition::Offset(offset) => Some(offset_to_line_column(text, offset)),
            ErrorPosition::LineColumn { line, column } => Some((line, column)),
            ErrorPosition::Unknown => None,
        }
    }

    /// Locates a `serde_json` syntax error as a character offset into `text`.
    ///
    /// `serde_json` counts columns in bytes and reports column 0 at the start
    /// of a line (e.g., end of input right after a newline).
    pub fn from_json_error(err: &serde_json::Error, text: &str) -> Self {
        // serde_json reports line 0 when it has no position
        if err.line() == 0 {
            return ErrorPosition::Unknown;
        }

        let line_start = match err.line() {
            1 => 0,
            line => match text.match_indices('\n').nth(line - 2) {
                Some((i, _)) => i + 1,
                None => return ErrorPosition::Unknown,
            },
        };

        let mut byte = (line_start + err.column().saturating_sub(1)).min(text.len());
        while !text.is_char_boundary(byte) {
            byte -= 1;
        }
        ErrorPosition::Offset(text[..byte].chars().count())
    }
}

/// Converts a character offset into a 1-based `(line, column)`.
///
/// Offsets past the end resolve to the position just after the last character.
pub fn offset_to_line_column(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
