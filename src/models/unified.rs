use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    History,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Project name used when a message carries no project path
pub const UNKNOWN_PROJECT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    pub path: String,
    pub name: String,
}

impl ProjectRef {
    /// Build a project reference, naming it after the final path segment
    pub fn from_path(path: Option<&str>) -> Self {
        let path = path.map(str::trim).filter(|p| !p.is_empty());
        match path {
            Some(path) => {
                let name = path
                    .trim_end_matches(['/', '\\'])
                    .rsplit(['/', '\\'])
                    .find(|segment| !segment.is_empty())
                    .unwrap_or(UNKNOWN_PROJECT);
                Self { path: path.to_string(), name: name.to_string() }
            }
            None => Self { path: String::new(), name: UNKNOWN_PROJECT.to_string() },
        }
    }

    /// True when `filter` names this project by name or full path
    pub fn matches(&self, filter: &str) -> bool {
        self.name == filter || (!self.path.is_empty() && self.path == filter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

/// Format a millisecond timestamp the way every output record does
pub fn format_timestamp_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical message, one per retained conversation line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedMessage {
    pub id: String,
    pub source: Source,
    pub timestamp_iso: String,
    pub timestamp_ms: i64,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    pub session_id: String,
    /// Identifier the source log gave this message, used to resolve `parent_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub parent_id: Option<String>,
    pub project: ProjectRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedSession {
    pub session_id: String,
    pub start_time: String,
    pub end_time: String,
    pub project: ProjectRef,
    pub messages: Vec<UnifiedMessage>,
}

impl UnifiedSession {
    pub fn start_ms(&self) -> i64 {
        self.messages.first().map(|m| m.timestamp_ms).unwrap_or_default()
    }

    pub fn end_ms(&self) -> i64 {
        self.messages.last().map(|m| m.timestamp_ms).unwrap_or_default()
    }
}

/// A user message paired with the assistant reply that followed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub session_id: String,
    pub timestamp: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}
