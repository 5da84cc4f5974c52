//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

pub const SESSION_A: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const SESSION_B: &str = "550e8400-e29b-41d4-a716-446655440001";

/// Builder for creating test .claude directory structures
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty .claude directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the .claude directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a history.jsonl file with the given content
    pub fn with_history(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("history.jsonl"), content)
            .expect("Failed to write history.jsonl");
        self
    }

    /// Add history entries programmatically
    pub fn with_history_entries(self, entries: &[HistoryEntryBuilder]) -> Self {
        let content = entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join("\n");
        self.with_history(&content)
    }

    /// Add a project directory with the given encoded name and transcripts
    pub fn with_project(self, encoded_name: &str, transcripts: &[TranscriptBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(encoded_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for transcript in transcripts {
            transcript.create_in(&project_dir);
        }

        self
    }

    /// Add a raw transcript file under a project directory
    pub fn with_raw_transcript(self, encoded_name: &str, filename: &str, content: &str) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(encoded_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        fs::write(project_dir.join(filename), content).expect("Failed to write transcript");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for history.jsonl entries
pub struct HistoryEntryBuilder {
    display: String,
    timestamp: i64,
    project: Option<String>,
}

impl HistoryEntryBuilder {
    /// Create a new history entry with default values
    pub fn new() -> Self {
        Self {
            display: "Explain the build pipeline".to_string(),
            timestamp: 1_762_076_480_016,
            project: Some("/Users/test/app".to_string()),
        }
    }

    pub fn display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn no_project(mut self) -> Self {
        self.project = None;
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let mut value = json!({"display": self.display, "timestamp": self.timestamp});
        if let Some(project) = &self.project {
            value["project"] = json!(project);
        }
        value.to_string()
    }
}

impl Default for HistoryEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for session transcript files
pub struct TranscriptBuilder {
    filename: String,
    lines: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new(filename: &str) -> Self {
        Self { filename: filename.to_string(), lines: Vec::new() }
    }

    pub fn with_message(mut self, message: ProjectMessageBuilder) -> Self {
        self.lines.push(message.to_json());
        self
    }

    /// Add a raw line (malformed JSON, non-conversation entries, ...)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn create_in(&self, dir: &Path) {
        fs::write(dir.join(&self.filename), self.lines.join("\n"))
            .expect("Failed to write transcript");
    }
}

/// Builder for user/assistant lines in session transcripts
pub struct ProjectMessageBuilder {
    role: &'static str,
    blocks: Vec<Value>,
    timestamp: Value,
    session_id: String,
    uuid: Option<String>,
    parent_uuid: Option<String>,
    cwd: Option<String>,
    git_branch: Option<String>,
}

impl ProjectMessageBuilder {
    fn with_role(role: &'static str, text: &str, timestamp: i64) -> Self {
        Self {
            role,
            blocks: vec![json!({"type": "text", "text": text})],
            timestamp: json!(timestamp),
            session_id: SESSION_A.to_string(),
            uuid: None,
            parent_uuid: None,
            cwd: Some("/Users/test/app".to_string()),
            git_branch: None,
        }
    }

    pub fn user() -> Self {
        Self::with_role("user", "Test message from the user", 1_000)
    }

    pub fn assistant() -> Self {
        Self::with_role("assistant", "Test response from the assistant", 2_000)
    }

    /// Replace content with a single text block
    pub fn text(mut self, text: &str) -> Self {
        self.blocks = vec![json!({"type": "text", "text": text})];
        self
    }

    /// Prepend a thinking block
    pub fn thinking(mut self, thinking: &str) -> Self {
        self.blocks.insert(0, json!({"type": "thinking", "thinking": thinking}));
        self
    }

    /// Replace content with a single tool_result block
    pub fn tool_result(mut self, content: &str) -> Self {
        self.blocks =
            vec![json!({"type": "tool_result", "tool_use_id": "toolu_1", "content": content})];
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = json!(timestamp);
        self
    }

    /// Use an RFC3339 string timestamp
    pub fn timestamp_iso(mut self, timestamp: &str) -> Self {
        self.timestamp = json!(timestamp);
        self
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.session_id = session_id.to_string();
        self
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    pub fn parent_uuid(mut self, parent_uuid: &str) -> Self {
        self.parent_uuid = Some(parent_uuid.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn git_branch(mut self, branch: &str) -> Self {
        self.git_branch = Some(branch.to_string());
        self
    }

    pub fn to_json(&self) -> String {
        let mut value = json!({
            "type": self.role,
            "message": {"role": self.role, "content": self.blocks},
            "timestamp": self.timestamp,
            "sessionId": self.session_id,
            "parentUuid": self.parent_uuid,
        });
        if let Some(uuid) = &self.uuid {
            value["uuid"] = json!(uuid);
        }
        if let Some(cwd) = &self.cwd {
            value["cwd"] = json!(cwd);
        }
        if let Some(branch) = &self.git_branch {
            value["gitBranch"] = json!(branch);
        }
        value.to_string()
    }
}

/// Helper to create a realistic .claude directory with sample data
pub fn realistic_claude_dir() -> TempDir {
    ClaudeDirBuilder::new()
        .with_history_entries(&[
            HistoryEntryBuilder::new()
                .display("Add a contact form to the landing page")
                .timestamp(1_762_076_000_000)
                .project("/Users/test/site"),
            HistoryEntryBuilder::new()
                .display("Write integration tests for the API")
                .timestamp(1_762_076_100_000)
                .project("/Users/test/api"),
        ])
        .with_project(
            "-Users%2Ftest%2Fsite",
            &[TranscriptBuilder::new("session-a.jsonl")
                .with_message(
                    ProjectMessageBuilder::user()
                        .text("Add a contact form to the landing page")
                        .timestamp(1_762_076_000_500)
                        .cwd("/Users/test/site")
                        .uuid("u1"),
                )
                .with_message(
                    ProjectMessageBuilder::assistant()
                        .text("I added a ContactForm component with validation.")
                        .thinking("The page uses plain CSS modules.")
                        .timestamp(1_762_076_010_000)
                        .cwd("/Users/test/site")
                        .uuid("u2")
                        .parent_uuid("u1")
                        .git_branch("main"),
                )],
        )
        .with_project(
            "-Users%2Ftest%2Fapi",
            &[TranscriptBuilder::new("session-b.jsonl").with_message(
                ProjectMessageBuilder::user()
                    .text("Why does the auth middleware reject valid tokens?")
                    .session_id(SESSION_B)
                    .timestamp(1_762_076_200_000)
                    .cwd("/Users/test/api"),
            )],
        )
        .build()
}
