//! Content-addressed message identity and cross-file deduplication.

use std::collections::HashMap;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::models::Role;

/// Field separator for hash input (unit separator, never produced by normalization)
const FIELD_SEPARATOR: &str = "\u{1f}";

/// Lowercase, collapse every whitespace run to one space, and trim the ends
pub fn normalize_content(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Dedup key: hash of the normalized content alone
pub fn dedup_key(content: &str) -> String {
    sha256_hex(&normalize_content(content))
}

/// Stable message id over role, session, normalized content and timestamp
pub fn message_id(role: Role, session_id: &str, normalized_content: &str, timestamp_ms: i64) -> String {
    let input = [role.as_str(), session_id, normalized_content, &timestamp_ms.to_string()]
        .join(FIELD_SEPARATOR);
    sha256_hex(&input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupOutcome {
    /// First time this content was seen; keep it under `id`
    Retained { id: String },
    /// Same normalized content was already retained as `first_id`
    Duplicate { first_id: String },
    /// Nothing left after normalization; treat as noise
    Empty,
}

/// Run-scoped dedup table shared by every file in one pipeline invocation
///
/// Lookups and inserts happen under a single lock, so the check-then-insert for one
/// message is atomic even when several workers share the engine.
#[derive(Debug, Default)]
pub struct DedupEngine {
    seen: Mutex<HashMap<String, String>>,
}

impl DedupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a message, keeping the first instance of each normalized content
    ///
    /// The id is always computed from unmasked content.
    pub fn admit(&self, role: Role, session_id: &str, content: &str, timestamp_ms: i64) -> DedupOutcome {
        let normalized = normalize_content(content);
        if normalized.is_empty() {
            return DedupOutcome::Empty;
        }

        let key = sha256_hex(&normalized);
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(first_id) = seen.get(&key) {
            return DedupOutcome::Duplicate { first_id: first_id.clone() };
        }

        let id = message_id(role, session_id, &normalized, timestamp_ms);
        seen.insert(key, id.clone());
        DedupOutcome::Retained { id }
    }

    /// Number of distinct contents retained so far
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
