//! Conversation Collector - normalize Claude Code conversation logs
//!
//! This library turns the append-only logs Claude Code keeps under `~/.claude/` into one
//! deduplicated, privacy-scrubbed record suitable for portfolio and resume generation:
//!
//! - Streaming `history.jsonl` prompts and per-project session transcripts line by line,
//!   tolerating malformed lines
//! - Validating both source layouts into a single message shape
//! - Dropping tool/system noise and duplicate content across overlapping logs
//! - Assigning stable content-addressed ids and masking PII
//! - Assembling sessions and user/assistant conversation turns
//!
//! # Example
//!
//! ```no_run
//! use conversation_collector::{CollectorConfig, collect};
//! use std::path::PathBuf;
//!
//! let config = CollectorConfig::new(PathBuf::from("/Users/alice/.claude"));
//! let run = collect(&config)?;
//! println!("Collected {} messages", run.stats.total_messages);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod models;
pub mod output;
pub mod parsers;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use config::CollectorConfig;
pub use discovery::{LogFile, discover_log_files};
pub use models::{FullOutput, PortfolioOutput, UnifiedMessage, UnifiedSession};
pub use output::write_output;
pub use pipeline::{Pipeline, PipelineRun, collect};
pub use utils::paths::{format_path_with_tilde, project_path_from_transcript};
