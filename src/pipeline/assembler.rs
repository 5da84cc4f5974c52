//! Groups retained messages into sessions and projects them into turns.

use std::collections::{HashMap, HashSet};

use crate::models::{ConversationTurn, Role, UnifiedMessage, UnifiedSession, format_timestamp_ms};

/// Collects messages per session; sessions are only finalized by [`SessionAssembler::finish`]
///
/// A late message can still move a session's start backwards, so nothing about a
/// session is computed until all input has been pushed.
#[derive(Debug, Default)]
pub struct SessionAssembler {
    sessions: HashMap<String, Vec<UnifiedMessage>>,
    /// Source message id -> source parent id, for every validated transcript line
    /// (dropped ones included) so parent chains can skip over removed messages
    links: HashMap<String, Option<String>>,
}

impl SessionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message in arrival order
    pub fn push(&mut self, message: UnifiedMessage) {
        self.sessions.entry(message.session_id.clone()).or_default().push(message);
    }

    /// Remember a source-level parent link
    pub fn record_link(&mut self, message_id: String, parent_id: Option<String>) {
        self.links.entry(message_id).or_insert(parent_id);
    }

    /// Sort, resolve parents and finalize every session
    ///
    /// Sessions come back ordered by start time, ties broken by session id.
    pub fn finish(self) -> Vec<UnifiedSession> {
        let links = self.links;
        let mut sessions: Vec<UnifiedSession> = self
            .sessions
            .into_iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(session_id, mut messages)| {
                // Stable sort: equal timestamps keep arrival order
                messages.sort_by_key(|m| m.timestamp_ms);
                resolve_parents(&mut messages, &links);

                let start_ms = messages.first().map(|m| m.timestamp_ms).unwrap_or_default();
                let end_ms = messages.last().map(|m| m.timestamp_ms).unwrap_or_default();
                let project = messages[0].project.clone();
                UnifiedSession {
                    session_id,
                    start_time: format_timestamp_ms(start_ms),
                    end_time: format_timestamp_ms(end_ms),
                    project,
                    messages,
                }
            })
            .collect();

        sessions.sort_by(|a, b| {
            a.start_ms().cmp(&b.start_ms()).then_with(|| a.session_id.cmp(&b.session_id))
        });
        sessions
    }
}

/// Rewrite source parent ids into the content ids of retained messages in the same session
///
/// A parent that was dropped (noise, duplicate) is replaced by its nearest retained
/// ancestor; if none exists in this session the link becomes `None`.
fn resolve_parents(messages: &mut [UnifiedMessage], links: &HashMap<String, Option<String>>) {
    let lookup: HashMap<String, String> = messages
        .iter()
        .filter_map(|m| m.message_id.clone().map(|source_id| (source_id, m.id.clone())))
        .collect();

    for message in messages.iter_mut() {
        let mut current = message.parent_id.take();
        let mut visited = HashSet::new();
        while let Some(source_id) = current {
            if let Some(id) = lookup.get(&source_id) {
                message.parent_id = Some(id.clone());
                break;
            }
            if !visited.insert(source_id.clone()) {
                break;
            }
            current = links.get(&source_id).cloned().flatten();
        }
    }
}

/// Pair each user message with the nearest following assistant message
///
/// Assistant messages with no open user turn are left out of the turns (they stay in
/// the session's message list).
pub fn pair_turns(session: &UnifiedSession) -> Vec<ConversationTurn> {
    let mut turns = Vec::new();
    let mut open: Option<ConversationTurn> = None;

    for message in &session.messages {
        match message.role {
            Role::User => {
                if let Some(turn) = open.take() {
                    turns.push(turn);
                }
                open = Some(ConversationTurn {
                    session_id: session.session_id.clone(),
                    timestamp: message.timestamp_iso.clone(),
                    user: message.content.clone(),
                    assistant: None,
                    thinking: None,
                });
            }
            Role::Assistant => {
                if let Some(turn) = open.as_mut()
                    && turn.assistant.is_none()
                {
                    turn.assistant = Some(message.content.clone());
                    turn.thinking = message.thinking.clone();
                }
            }
        }
    }

    if let Some(turn) = open {
        turns.push(turn);
    }
    turns
}
