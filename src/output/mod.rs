//! Output writer: pretty-printed JSON, written atomically (temp file + rename)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Write `record` as pretty-printed JSON to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
/// The destination is never left half-written.
pub fn write_output<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(record).context("Failed to serialize output")?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);
    fs::write(temp_path, json)
        .with_context(|| format!("Failed to write output temp file: {}", temp_path.display()))?;
    fs::rename(temp_path, path)
        .with_context(|| format!("Failed to move output into place: {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
