//! Normalization pipeline for collected conversation logs
//!
//! Data flows strictly forward, one stage per module:
//!
//! 1. [`parsers`](crate::parsers) - line reader and schema validator
//! 2. [`noise`] - drops tool/system artifacts and near-empty messages
//! 3. [`identity`] - content-addressed ids and run-wide deduplication
//! 4. [`masking`] - PII scrubbing, always after identity
//! 5. [`assembler`] - sessions and conversation turns
//! 6. [`stats`] - counters for every retained and rejected unit
//!
//! [`runner`] wires the stages together.

pub mod assembler;
pub mod identity;
pub mod masking;
pub mod noise;
pub mod runner;
pub mod stats;

pub use assembler::{SessionAssembler, pair_turns};
pub use identity::{DedupEngine, DedupOutcome, dedup_key, message_id, normalize_content};
pub use masking::{Masker, NoopMasker, RegexMasker};
pub use noise::is_noise;
pub use runner::{ALL_PROJECTS, Pipeline, PipelineRun, collect};
pub use stats::{PipelineEvent, StatsAggregator};
