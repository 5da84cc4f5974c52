use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{ProjectRef, Source};
use crate::parsers::LineError;

/// Additive counters describing the retained output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_sessions: usize,
    pub total_messages: usize,
    pub duplicates_removed: usize,
    pub by_source: BTreeMap<Source, usize>,
    pub by_project: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_conversations: usize,
    pub noise_removed: usize,
    pub duplicates_removed: usize,
}

/// End-of-run diagnostics: what was read, what was dropped and why
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub lines_ignored: usize,
    pub noise_removed: usize,
    pub duplicates_removed: usize,
    pub messages_retained: usize,
    pub errors: Vec<LineError>,
    /// Noise and duplicate drops attributed to the project of the dropped message
    #[serde(skip)]
    pub dropped_by_project: HashMap<ProjectRef, DropCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub noise: usize,
    pub duplicates: usize,
}
