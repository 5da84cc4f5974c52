//! Schema validation and conversion into the normalized message shape.

use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{
    HistoryEntry, MessageMetadata, ProjectMessage, ProjectRef, Role, Source, SourceRecord,
    SourceShape,
};
use crate::parsers::{LineError, ParsedLine};

/// Transcript entry types that carry no conversation (session bookkeeping)
const NON_CONVERSATION_TYPES: &[&str] =
    &["summary", "system", "file-history-snapshot", "queue-operation", "progress"];

/// Namespace for synthesized history session ids (UUID v5)
const HISTORY_SESSION_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_9b7d_4c3a_8e21_5d0f_a9b8_c7e6);

/// Validate one parsed line against the shape its file is expected to hold
///
/// Returns `Ok(None)` for transcript entries whose `type` names a known non-conversation
/// kind (`summary`, `file-history-snapshot`, `system`, ...). Every other line must match
/// the schema, whether or not it carries a `type`. Unknown extra fields are ignored.
///
/// # Errors
///
/// Returns a validation [`LineError`] holding the line's original text when required
/// fields are missing or mistyped, or when a project path contains `..` components.
pub fn validate(
    line: &ParsedLine,
    shape: SourceShape,
    path: &Path,
) -> Result<Option<SourceRecord>, LineError> {
    let invalid =
        |message: String| LineError::validation(path, line.line_number, &line.raw_text, message);

    let record = match shape {
        SourceShape::History => {
            let entry = HistoryEntry::deserialize(&line.data).map_err(|e| invalid(e.to_string()))?;
            SourceRecord::History(entry)
        }
        SourceShape::ProjectMessage => {
            if is_non_conversation(&line.data) {
                return Ok(None);
            }
            let message =
                ProjectMessage::deserialize(&line.data).map_err(|e| invalid(e.to_string()))?;
            SourceRecord::Project(message)
        }
    };

    let project_path = match &record {
        SourceRecord::History(entry) => entry.project.as_deref(),
        SourceRecord::Project(message) => message.cwd.as_deref(),
    };
    if let Some(p) = project_path
        && has_parent_traversal(p)
    {
        return Err(invalid(format!("suspicious project path: {}", p)));
    }

    Ok(Some(record))
}

fn is_non_conversation(value: &Value) -> bool {
    value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| NON_CONVERSATION_TYPES.contains(&t))
}

fn has_parent_traversal(path: &str) -> bool {
    Path::new(path).components().any(|c| matches!(c, Component::ParentDir))
}

/// Deterministic session id for history entries, which carry none of their own
///
/// History prompts are grouped per project and per UTC calendar day.
pub fn history_session_id(project_path: &str, timestamp: DateTime<Utc>) -> String {
    let key = format!("history:{}:{}", project_path, timestamp.format("%Y-%m-%d"));
    Uuid::new_v5(&HISTORY_SESSION_NAMESPACE, key.as_bytes()).to_string()
}

/// A validated message in the unified shape, before identity and masking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    pub source: Source,
    pub timestamp: DateTime<Utc>,
    pub role: Role,
    pub content: String,
    pub thinking: Option<String>,
    pub session_id: String,
    pub message_id: Option<String>,
    pub parent_id: Option<String>,
    pub project: ProjectRef,
    pub metadata: Option<MessageMetadata>,
}

impl NormalizedMessage {
    /// Convert a validated record; `fallback_project` is used when the record names no project
    pub fn from_record(record: SourceRecord, fallback_project: Option<&str>) -> Self {
        match record {
            SourceRecord::History(entry) => {
                let project = ProjectRef::from_path(entry.project.as_deref().or(fallback_project));
                Self {
                    source: Source::History,
                    session_id: history_session_id(&project.path, entry.timestamp),
                    timestamp: entry.timestamp,
                    role: Role::User,
                    content: entry.display,
                    thinking: None,
                    message_id: None,
                    parent_id: None,
                    project,
                    metadata: None,
                }
            }
            SourceRecord::Project(message) => {
                let project = ProjectRef::from_path(message.cwd.as_deref().or(fallback_project));
                let metadata = (message.cwd.is_some() || message.git_branch.is_some())
                    .then(|| MessageMetadata { git_branch: message.git_branch, cwd: message.cwd });
                Self {
                    source: Source::Project,
                    timestamp: message.timestamp,
                    role: message.message.role,
                    content: message.message.content.text(),
                    thinking: message.message.content.thinking(),
                    session_id: message.session_id,
                    message_id: message.uuid,
                    parent_id: message.parent_uuid,
                    project,
                    metadata,
                }
            }
        }
    }
}
