use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "CONVERSATION_COLLECTOR_DIR";

/// Get the Claude directory path (`$CONVERSATION_COLLECTOR_DIR`, else ~/.claude)
pub fn get_claude_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    match dirs::home_dir() {
        Some(home) => Ok(home.join(".claude")),
        None => bail!("HOME environment variable not set"),
    }
}
