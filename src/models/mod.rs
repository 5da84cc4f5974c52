//! Data models for collected conversation logs.
//!
//! - [`SourceRecord`] - a validated line in one of the two source layouts
//!   ([`HistoryEntry`] from history.jsonl, [`ProjectMessage`] from session transcripts)
//! - [`UnifiedMessage`] / [`UnifiedSession`] - the canonical output records
//! - [`ConversationTurn`] - a user prompt paired with its reply
//! - [`CollectionStats`] / [`RunSummary`] - counters gathered during a run
//!
//! Source models use serde with custom deserializers for timestamps and required
//! identifiers, found in the `parsers::deserializers` module.

pub mod output;
pub mod source;
pub mod stats;
pub mod unified;

pub use output::{FullOutput, OUTPUT_VERSION, PortfolioOutput};
pub use source::{
    ContentBlock, HISTORY_FILE_NAME, HistoryEntry, MessageBody, MessagePayload, PastedContent,
    ProjectMessage, SourceRecord, SourceShape,
};
pub use stats::{CollectionStats, DropCounts, PortfolioStats, RunSummary};
pub use unified::{
    ConversationTurn, MessageMetadata, ProjectRef, Role, Source, UNKNOWN_PROJECT, UnifiedMessage,
    UnifiedSession, format_timestamp_ms,
};
