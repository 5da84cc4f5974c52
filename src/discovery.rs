//! Enumerates candidate log files under a Claude data directory.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::warn;
use walkdir::WalkDir;

use crate::models::{HISTORY_FILE_NAME, SourceShape};

/// Extension shared by every log file
pub const LOG_EXTENSION: &str = "jsonl";

/// Directory holding per-project session transcripts
pub const PROJECTS_DIR_NAME: &str = "projects";

/// A log file and the line layout it is expected to hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub shape: SourceShape,
}

impl LogFile {
    /// Wrap a path, inferring its shape from the file name
    pub fn new(path: PathBuf) -> Self {
        let shape = SourceShape::from_path(&path);
        Self { path, shape }
    }
}

/// Find all log files under `claude_dir`
///
/// Returns every `*.jsonl` file found recursively under `projects/`, sorted by path, then
/// `history.jsonl` last (when present). Transcripts come first so that a prompt logged in
/// both places is kept from its transcript, where it stays linked to its reply. Symlinks
/// are not followed. A missing directory yields an empty list.
///
/// # Errors
///
/// Returns an error if `claude_dir` exists but is not a directory. Unreadable entries
/// below it are logged as warnings and skipped.
pub fn discover_log_files(claude_dir: &Path) -> Result<Vec<LogFile>> {
    if !claude_dir.exists() {
        return Ok(Vec::new());
    }
    if !claude_dir.is_dir() {
        bail!("Not a directory: {}", claude_dir.display());
    }

    let mut files = Vec::new();

    let projects_dir = claude_dir.join(PROJECTS_DIR_NAME);
    if projects_dir.is_dir() {
        for entry in WalkDir::new(&projects_dir).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", projects_dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            if path.extension().and_then(|e| e.to_str()) == Some(LOG_EXTENSION) {
                files.push(LogFile { path, shape: SourceShape::ProjectMessage });
            }
        }
    }

    let history_path = claude_dir.join(HISTORY_FILE_NAME);
    if history_path.is_file() {
        files.push(LogFile { path: history_path, shape: SourceShape::History });
    }

    Ok(files)
}
