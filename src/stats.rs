// WHY: A run reports what it did so callers can check coverage of the vocabulary
// without diffing documents

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Counters for a single rewrite run
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Input document path
    pub input_path: String,
    /// Vocabulary table path
    pub vocabulary_path: String,
    /// Non-empty words read from the document
    pub words_scanned: u64,
    /// Words that belonged to a synonym group
    pub words_matched: u64,
    /// Matched words whose drawn synonym differs from the original
    pub words_replaced: u64,
    /// Bytes written to the staging file
    pub bytes_written: u64,
    /// Whether a trailing word without delimiter was flushed
    pub trailing_word_flushed: bool,
    /// Commit strategy that actually replaced the document
    pub commit: String,
    /// Wall-clock time for scan and commit in milliseconds
    pub processing_time_ms: u64,
}

impl RunStats {
    /// Write stats as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize run stats")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write stats file {}", path.display()))?;
        Ok(())
    }
}
