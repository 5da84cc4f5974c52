use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Role;

/// File name of the global prompt history log
pub const HISTORY_FILE_NAME: &str = "history.jsonl";

/// Line layout a log file is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceShape {
    /// `history.jsonl`: one user prompt per line
    History,
    /// Per-project session transcripts
    ProjectMessage,
}

impl SourceShape {
    /// Infer the shape from a file name: `history.jsonl` is history, anything else a transcript
    pub fn from_path(path: &Path) -> Self {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(HISTORY_FILE_NAME) => Self::History,
            _ => Self::ProjectMessage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastedContent {
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub display: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub pasted_contents: BTreeMap<String, PastedContent>,
}

/// A single typed block inside a transcript message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thinking: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageBody {
    /// Visible text of the message; text blocks are joined with newlines
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter(|b| b.block_type.as_deref().is_none_or(|t| t == "text"))
                .filter_map(|b| b.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Reasoning text carried by thinking blocks, if any
    pub fn thinking(&self) -> Option<String> {
        let Self::Blocks(blocks) = self else {
            return None;
        };
        let parts: Vec<&str> = blocks
            .iter()
            .filter_map(|b| b.thinking.as_deref())
            .filter(|t| !t.trim().is_empty())
            .collect();
        if parts.is_empty() { None } else { Some(parts.join("\n\n")) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub role: Role,
    pub content: MessageBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMessage {
    pub message: MessagePayload,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_non_empty")]
    pub session_id: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
}

/// A validated line, tagged with the schema it matched
#[derive(Debug, Clone)]
pub enum SourceRecord {
    History(HistoryEntry),
    Project(ProjectMessage),
}

impl SourceRecord {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::History(entry) => entry.timestamp,
            Self::Project(message) => message.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_shape_from_path() {
        assert_eq!(
            SourceShape::from_path(&PathBuf::from("/home/u/.claude/history.jsonl")),
            SourceShape::History
        );
        assert_eq!(
            SourceShape::from_path(&PathBuf::from("/home/u/.claude/projects/-a/abc.jsonl")),
            SourceShape::ProjectMessage
        );
    }

    #[test]
    fn test_block_text_skips_tool_blocks() {
        let json = r#"[{"type":"thinking","thinking":"hmm"},{"type":"text","text":"first"},{"type":"tool_use","id":"t1","name":"read","input":{}},{"type":"text","text":"second"}]"#;
        let body: MessageBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.text(), "first\nsecond");
        assert_eq!(body.thinking(), Some("hmm".to_string()));
    }

    #[test]
    fn test_plain_string_body_has_no_thinking() {
        let body: MessageBody = serde_json::from_str(r#""just text""#).unwrap();
        assert_eq!(body.text(), "just text");
        assert!(body.thinking().is_none());
    }

    #[test]
    fn test_history_entry_with_pasted_contents() {
        let json = r#"{"display":"see [Pasted text #1]","timestamp":1762076480016,"project":"/Users/test/app","pastedContents":{"1":{"id":1,"type":"text","content":"pasted body"}}}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.pasted_contents.len(), 1);
        assert_eq!(entry.pasted_contents["1"].content.as_deref(), Some("pasted body"));
    }
}
