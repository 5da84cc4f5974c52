use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Longest slice of an offending line kept for diagnostics
const MAX_RAW_TEXT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum LineErrorKind {
    /// The line is not valid JSON (or could not be read at all)
    #[error("malformed JSON: {0}")]
    Parse(String),
    /// The line is JSON but does not match the expected record shape
    #[error("schema validation failed: {0}")]
    Validation(String),
}

/// A rejected line: recorded, counted and skipped; never aborts a file
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{}:{}: {}", .path.display(), .line_number, .kind)]
pub struct LineError {
    pub path: PathBuf,
    pub line_number: usize,
    pub raw_text: String,
    pub kind: LineErrorKind,
}

impl LineError {
    pub fn parse(path: &Path, line_number: usize, raw_text: &str, message: impl Into<String>) -> Self {
        Self::new(path, line_number, raw_text, LineErrorKind::Parse(message.into()))
    }

    pub fn validation(
        path: &Path,
        line_number: usize,
        raw_text: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, line_number, raw_text, LineErrorKind::Validation(message.into()))
    }

    fn new(path: &Path, line_number: usize, raw_text: &str, kind: LineErrorKind) -> Self {
        let raw_text = match raw_text.char_indices().nth(MAX_RAW_TEXT_CHARS) {
            Some((cut, _)) => format!("{}…", &raw_text[..cut]),
            None => raw_text.to_string(),
        };
        Self { path: path.to_path_buf(), line_number, raw_text, kind }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, LineErrorKind::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = LineError::parse(Path::new("/tmp/a.jsonl"), 7, "{oops", "expected value");
        assert_eq!(err.to_string(), "/tmp/a.jsonl:7: malformed JSON: expected value");
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_raw_text_is_truncated() {
        let long = "x".repeat(MAX_RAW_TEXT_CHARS + 50);
        let err = LineError::validation(Path::new("a.jsonl"), 1, &long, "missing field");
        assert_eq!(err.raw_text.chars().count(), MAX_RAW_TEXT_CHARS + 1);
        assert!(err.raw_text.ends_with('…'));
    }

    #[test]
    fn test_serializes_kind_tag() {
        let err = LineError::validation(Path::new("a.jsonl"), 3, "{}", "missing field `display`");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["lineNumber"], 3);
        assert_eq!(json["kind"]["kind"], "validation");
    }
}
