//! Run-wide counters, fed one pipeline event at a time.

use tracing::warn;

use crate::models::{CollectionStats, DropCounts, PortfolioStats, ProjectRef, RunSummary, UnifiedMessage};
use crate::parsers::LineError;

/// Something that happened to a unit of work as it moved through the pipeline
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    FileProcessed,
    FileFailed,
    LineRead,
    LineRejected(LineError),
    LineIgnored,
    NoiseDropped(ProjectRef),
    DuplicateDropped(ProjectRef),
    Retained(&'a UnifiedMessage),
    SessionCompleted,
}

/// Accumulates counters; values only grow and are read once the run is over
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: CollectionStats,
    summary: RunSummary,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::FileProcessed => self.summary.files_processed += 1,
            PipelineEvent::FileFailed => self.summary.files_failed += 1,
            PipelineEvent::LineRead => self.summary.lines_read += 1,
            PipelineEvent::LineRejected(error) => {
                warn!("Skipping line: {}", error);
                self.summary.lines_skipped += 1;
                self.summary.errors.push(error);
            }
            PipelineEvent::LineIgnored => self.summary.lines_ignored += 1,
            PipelineEvent::NoiseDropped(project) => {
                self.summary.noise_removed += 1;
                self.summary.dropped_by_project.entry(project).or_default().noise += 1;
            }
            PipelineEvent::DuplicateDropped(project) => {
                self.stats.duplicates_removed += 1;
                self.summary.duplicates_removed += 1;
                self.summary.dropped_by_project.entry(project).or_default().duplicates += 1;
            }
            PipelineEvent::Retained(message) => {
                self.stats.total_messages += 1;
                self.summary.messages_retained += 1;
                *self.stats.by_source.entry(message.source).or_insert(0) += 1;
                *self.stats.by_project.entry(message.project.name.clone()).or_insert(0) += 1;
            }
            PipelineEvent::SessionCompleted => self.stats.total_sessions += 1,
        }
    }

    pub fn finish(self) -> (CollectionStats, RunSummary) {
        (self.stats, self.summary)
    }
}

impl RunSummary {
    /// Portfolio counters for `total_conversations` turns
    ///
    /// With a project filter, only drops of messages belonging to that project count.
    pub fn portfolio_stats(&self, project: Option<&str>, total_conversations: usize) -> PortfolioStats {
        let drops = match project {
            None => DropCounts { noise: self.noise_removed, duplicates: self.duplicates_removed },
            Some(filter) => self
                .dropped_by_project
                .iter()
                .filter(|(p, _)| p.matches(filter))
                .fold(DropCounts::default(), |acc, (_, d)| DropCounts {
                    noise: acc.noise + d.noise,
                    duplicates: acc.duplicates + d.duplicates,
                }),
        };
        PortfolioStats {
            total_conversations,
            noise_removed: drops.noise,
            duplicates_removed: drops.duplicates,
        }
    }
}
