//! Run configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pipeline::masking::{Masker, NoopMasker, RegexMasker};
use crate::utils::get_claude_dir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Directory holding `history.jsonl` and `projects/`
    pub claude_dir: PathBuf,
    /// Limit portfolio output to one project (name or full path)
    pub project_filter: Option<String>,
    /// Scrub PII from message text
    pub mask_pii: bool,
    /// Extra regex patterns to redact on top of the built-in rules
    pub mask_patterns: Vec<String>,
    /// Read files concurrently
    pub parallel: bool,
}

impl CollectorConfig {
    pub fn new(claude_dir: PathBuf) -> Self {
        Self {
            claude_dir,
            project_filter: None,
            mask_pii: true,
            mask_patterns: Vec::new(),
            parallel: true,
        }
    }

    /// Configuration rooted at the default data directory
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(get_claude_dir()?))
    }

    /// Build the masker this configuration asks for
    ///
    /// # Errors
    ///
    /// Returns an error if a custom mask pattern is not a valid regex.
    pub fn masker(&self) -> Result<Box<dyn Masker>> {
        if !self.mask_pii {
            return Ok(Box::new(NoopMasker));
        }

        let mut masker = RegexMasker::builtin();
        for pattern in &self.mask_patterns {
            masker = masker
                .with_pattern(pattern)
                .with_context(|| format!("Invalid mask pattern: {}", pattern))?;
        }
        Ok(Box::new(masker))
    }
}
