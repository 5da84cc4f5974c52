//! Streaming line reader for newline-delimited JSON logs.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::parsers::LineError;

/// A successfully parsed line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub data: Value,
    /// The line as it appeared in the file, without its line terminator
    pub raw_text: String,
    /// 1-based physical line number (blank lines are counted)
    pub line_number: usize,
}

pub type LineResult = std::result::Result<ParsedLine, LineError>;

/// Lazy iterator over the non-blank lines of a JSONL file
///
/// Each item is one parse attempt. The file handle is released as soon as the
/// iterator is exhausted or dropped, so abandoning it early is safe.
pub struct JsonlLines {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
}

impl JsonlLines {
    fn empty(path: &Path) -> Self {
        Self { path: path.to_path_buf(), lines: None, line_number: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for JsonlLines {
    type Item = LineResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let lines = self.lines.as_mut()?;
            let Some(line) = lines.next() else {
                self.lines = None;
                return None;
            };
            self.line_number += 1;

            let mut text = match line {
                Ok(text) => text,
                Err(e) => {
                    // A handle that failed mid-read cannot be trusted for the rest of the file
                    self.lines = None;
                    return Some(Err(LineError::parse(
                        &self.path,
                        self.line_number,
                        "",
                        format!("failed to read line: {}", e),
                    )));
                }
            };

            if text.ends_with('\r') {
                text.pop();
            }
            if text.trim().is_empty() {
                continue;
            }

            return Some(match serde_json::from_str::<Value>(&text) {
                Ok(data) => Ok(ParsedLine { data, raw_text: text, line_number: self.line_number }),
                Err(e) => Err(LineError::parse(&self.path, self.line_number, &text, e.to_string())),
            });
        }
    }
}

/// Open a JSONL file for streaming
///
/// A missing file is a normal precondition and yields an empty iterator.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened (permissions, not a file).
pub fn read_jsonl(path: &Path) -> Result<JsonlLines> {
    match File::open(path) {
        Ok(file) => Ok(JsonlLines {
            path: path.to_path_buf(),
            lines: Some(BufReader::new(file).lines()),
            line_number: 0,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Log file not found, nothing to read: {}", path.display());
            Ok(JsonlLines::empty(path))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to open log file: {}", path.display())),
    }
}
