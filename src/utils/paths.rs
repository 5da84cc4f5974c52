//! Project path recovery for session transcripts.
//!
//! Transcripts are stored under `<claude_dir>/projects/<encoded project>/`, where the
//! directory name is the project's absolute path with a leading `-` in place of the root
//! and percent-escapes for separators (`/Users/foo/bar` is stored as `-Users%2Ffoo%2Fbar`).

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::discovery::PROJECTS_DIR_NAME;

/// Recovers the project path from a transcript's location
///
/// The component after the last `projects` directory names the project; it must be followed
/// by at least the file itself. Returns `None` when the file is not inside a project
/// directory, or when the decoded name is relative or climbs with `..`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use conversation_collector::utils::project_path_from_transcript;
///
/// let transcript = Path::new("/home/me/.claude/projects/-Users%2Ffoo%2Fbar/session.jsonl");
/// assert_eq!(project_path_from_transcript(transcript).as_deref(), Some("/Users/foo/bar"));
/// ```
pub fn project_path_from_transcript(path: &Path) -> Option<String> {
    let components: Vec<&OsStr> = path.components().map(|c| c.as_os_str()).collect();
    let position = components
        .iter()
        .take(components.len().saturating_sub(2))
        .rposition(|c| *c == OsStr::new(PROJECTS_DIR_NAME))?;

    let encoded = components[position + 1].to_string_lossy();
    let decoded = decode_project_dir(&encoded);
    if !decoded.is_absolute() || decoded.components().any(|c| c == Component::ParentDir) {
        debug!("Ignoring unsafe project directory name: {}", encoded);
        return None;
    }
    Some(decoded.to_string_lossy().into_owned())
}

fn decode_project_dir(encoded: &str) -> PathBuf {
    let relative = encoded.strip_prefix('-').unwrap_or(encoded);
    let decoded = percent_decode_str(relative).decode_utf8_lossy();
    Path::new("/").join(decoded.as_ref())
}

/// Shortens paths under the home directory to `~/...` for display
pub fn format_path_with_tilde(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => shorten_home(path, &home),
        None => path.display().to_string(),
    }
}

fn shorten_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => Path::new("~").join(rest).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path_from_transcript() {
        let path = PathBuf::from("/home/u/.claude/projects/-Users%2Ftest%2Fapp/abc.jsonl");
        assert_eq!(project_path_from_transcript(&path).as_deref(), Some("/Users/test/app"));

        let nested =
            PathBuf::from("/home/u/.claude/projects/-Users%2Ftest%2Fapp/abc/subagents/agent-1.jsonl");
        assert_eq!(project_path_from_transcript(&nested).as_deref(), Some("/Users/test/app"));
    }

    #[test]
    fn test_last_projects_component_wins() {
        let path = PathBuf::from("/srv/projects/me/.claude/projects/-opt%2Fsvc/s.jsonl");
        assert_eq!(project_path_from_transcript(&path).as_deref(), Some("/opt/svc"));
    }

    #[test]
    fn test_project_path_from_transcript_outside_projects() {
        assert!(project_path_from_transcript(Path::new("/tmp/session.jsonl")).is_none());
        // A file directly inside projects/ has no project directory
        assert!(project_path_from_transcript(Path::new("/c/projects/loose.jsonl")).is_none());
    }

    #[test]
    fn test_traversal_in_encoded_name_rejected() {
        let evil = PathBuf::from("/c/projects/-Users%2F..%2Fetc/s.jsonl");
        assert!(project_path_from_transcript(&evil).is_none());
    }

    #[test]
    fn test_shorten_home() {
        let home = Path::new("/Users/testuser");
        assert_eq!(shorten_home(Path::new("/Users/testuser/Documents/project"), home), "~/Documents/project");
        assert_eq!(shorten_home(home, home), "~");
        assert_eq!(shorten_home(Path::new("/opt/local/bin"), home), "/opt/local/bin");
        // Sibling directory sharing a name prefix is not under home
        assert_eq!(shorten_home(Path::new("/Users/testuser2/x"), home), "/Users/testuser2/x");
    }
}
