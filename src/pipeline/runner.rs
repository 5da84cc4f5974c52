//! Pipeline driver: reads every log file and pushes its lines through the stages
//! in order (validate, noise, dedup, mask, assemble), counting every rejection.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::CollectorConfig;
use crate::discovery::{LogFile, discover_log_files};
use crate::models::{
    CollectionStats, ConversationTurn, FullOutput, OUTPUT_VERSION, PortfolioOutput, RunSummary,
    SourceRecord, SourceShape, UnifiedMessage, UnifiedSession, format_timestamp_ms,
};
use crate::parsers::{NormalizedMessage, read_jsonl, validate};
use crate::pipeline::assembler::{SessionAssembler, pair_turns};
use crate::pipeline::identity::{DedupEngine, DedupOutcome};
use crate::pipeline::masking::Masker;
use crate::pipeline::noise::is_noise;
use crate::pipeline::stats::{PipelineEvent, StatsAggregator};
use crate::utils::project_path_from_transcript;

/// Project label used in portfolio output when no filter is given
pub const ALL_PROJECTS: &str = "all";

/// Everything a finished run produced
#[derive(Debug)]
pub struct PipelineRun {
    pub collected_at: DateTime<Utc>,
    pub sessions: Vec<UnifiedSession>,
    pub stats: CollectionStats,
    pub summary: RunSummary,
}

impl PipelineRun {
    /// Conversation turns across all sessions, optionally limited to one project
    pub fn turns(&self, project: Option<&str>) -> Vec<ConversationTurn> {
        self.sessions
            .iter()
            .filter(|s| project.is_none_or(|p| s.project.matches(p)))
            .flat_map(pair_turns)
            .collect()
    }

    fn collected_at_iso(&self) -> String {
        self.collected_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn full_output(&self) -> FullOutput {
        FullOutput {
            version: OUTPUT_VERSION.to_string(),
            collected_at: self.collected_at_iso(),
            stats: self.stats.clone(),
            sessions: self.sessions.clone(),
        }
    }

    pub fn portfolio_output(&self, project: Option<&str>) -> PortfolioOutput {
        let conversations = self.turns(project);
        PortfolioOutput {
            version: OUTPUT_VERSION.to_string(),
            collected_at: self.collected_at_iso(),
            project: project.unwrap_or(ALL_PROJECTS).to_string(),
            stats: self.summary.portfolio_stats(project, conversations.len()),
            conversations,
        }
    }
}

/// Per-file results of the stages that only need that file
#[derive(Debug, Default)]
struct FileOutcome {
    /// Events recorded while reading, replayed into the run counters in file order
    events: Vec<PipelineEvent<'static>>,
    links: Vec<(String, Option<String>)>,
    messages: Vec<NormalizedMessage>,
}

pub struct Pipeline {
    masker: Box<dyn Masker>,
    parallel: bool,
}

impl Pipeline {
    pub fn new(masker: Box<dyn Masker>) -> Self {
        Self { masker, parallel: false }
    }

    /// Read files on the rayon pool; output is identical to a sequential run
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        Ok(Self::new(config.masker()?).parallel(config.parallel))
    }

    /// Run every file through the pipeline
    ///
    /// Files are merged into the shared dedup table in the order given, so "first seen"
    /// always refers to `files` order. Bad lines and unreadable files are counted in the
    /// summary; nothing here aborts the run.
    pub fn run(&self, files: &[LogFile]) -> PipelineRun {
        let outcomes: Vec<FileOutcome> = if self.parallel {
            files.par_iter().map(process_file).collect()
        } else {
            files.iter().map(process_file).collect()
        };

        let dedup = DedupEngine::new();
        let mut assembler = SessionAssembler::new();
        let mut aggregator = StatsAggregator::new();

        for outcome in outcomes {
            for event in outcome.events {
                aggregator.record(event);
            }
            for (message_id, parent_id) in outcome.links {
                assembler.record_link(message_id, parent_id);
            }

            for message in outcome.messages {
                let timestamp_ms = message.timestamp.timestamp_millis();
                match dedup.admit(message.role, &message.session_id, &message.content, timestamp_ms) {
                    DedupOutcome::Empty => aggregator.record(PipelineEvent::NoiseDropped(message.project)),
                    DedupOutcome::Duplicate { first_id } => {
                        debug!("Dropping duplicate of {} in session {}", first_id, message.session_id);
                        aggregator.record(PipelineEvent::DuplicateDropped(message.project));
                    }
                    DedupOutcome::Retained { id } => {
                        let unified = self.finish_message(message, id, timestamp_ms);
                        aggregator.record(PipelineEvent::Retained(&unified));
                        assembler.push(unified);
                    }
                }
            }
        }

        let sessions = assembler.finish();
        for _ in &sessions {
            aggregator.record(PipelineEvent::SessionCompleted);
        }
        let (stats, summary) = aggregator.finish();

        info!(
            "Processed {} files ({} failed): {} messages in {} sessions, {} lines skipped, {} noise removed, {} duplicates removed",
            summary.files_processed,
            summary.files_failed,
            stats.total_messages,
            stats.total_sessions,
            summary.lines_skipped,
            summary.noise_removed,
            summary.duplicates_removed
        );

        PipelineRun { collected_at: Utc::now(), sessions, stats, summary }
    }

    /// Mask text (after identity was computed on the raw content) and build the output record
    fn finish_message(&self, message: NormalizedMessage, id: String, timestamp_ms: i64) -> UnifiedMessage {
        UnifiedMessage {
            id,
            source: message.source,
            timestamp_iso: format_timestamp_ms(timestamp_ms),
            timestamp_ms,
            role: message.role,
            content: self.masker.mask(&message.content),
            thinking: message.thinking.map(|t| self.masker.mask(&t)),
            session_id: message.session_id,
            message_id: message.message_id,
            parent_id: message.parent_id,
            project: message.project,
            metadata: message.metadata,
        }
    }
}

fn process_file(file: &LogFile) -> FileOutcome {
    let mut outcome = FileOutcome::default();

    let lines = match read_jsonl(&file.path) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Skipping unreadable log file: {:#}", e);
            outcome.events.push(PipelineEvent::FileFailed);
            return outcome;
        }
    };
    outcome.events.push(PipelineEvent::FileProcessed);

    let fallback_project = match file.shape {
        SourceShape::History => None,
        SourceShape::ProjectMessage => project_path_from_transcript(&file.path),
    };

    for line in lines {
        outcome.events.push(PipelineEvent::LineRead);

        let parsed = match line {
            Ok(parsed) => parsed,
            Err(e) => {
                outcome.events.push(PipelineEvent::LineRejected(e));
                continue;
            }
        };

        let record = match validate(&parsed, file.shape, &file.path) {
            Ok(Some(record)) => record,
            Ok(None) => {
                outcome.events.push(PipelineEvent::LineIgnored);
                continue;
            }
            Err(e) => {
                outcome.events.push(PipelineEvent::LineRejected(e));
                continue;
            }
        };

        if let SourceRecord::Project(message) = &record
            && let Some(uuid) = &message.uuid
        {
            outcome.links.push((uuid.clone(), message.parent_uuid.clone()));
        }

        let message = NormalizedMessage::from_record(record, fallback_project.as_deref());
        if is_noise(&message.content) {
            outcome.events.push(PipelineEvent::NoiseDropped(message.project));
            continue;
        }
        outcome.messages.push(message);
    }

    debug!(
        "Read {}: {} kept, {} events",
        file.path.display(),
        outcome.messages.len(),
        outcome.events.len()
    );

    outcome
}

/// Discover every log file under the configured directory and run the pipeline over it
///
/// # Errors
///
/// Returns an error if the data directory cannot be enumerated or a custom mask pattern
/// does not compile. Individual bad files and lines are reported in the run summary.
pub fn collect(config: &CollectorConfig) -> Result<PipelineRun> {
    let files = discover_log_files(&config.claude_dir)?;
    info!("Found {} log files under {}", files.len(), config.claude_dir.display());
    Ok(Pipeline::from_config(config)?.run(&files))
}
