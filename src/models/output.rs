use serde::{Deserialize, Serialize};

use crate::models::{CollectionStats, ConversationTurn, PortfolioStats, UnifiedSession};

/// Schema version stamped on every output record
pub const OUTPUT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullOutput {
    pub version: String,
    pub collected_at: String,
    pub stats: CollectionStats,
    pub sessions: Vec<UnifiedSession>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOutput {
    pub version: String,
    pub collected_at: String,
    pub project: String,
    pub stats: PortfolioStats,
    pub conversations: Vec<ConversationTurn>,
}
