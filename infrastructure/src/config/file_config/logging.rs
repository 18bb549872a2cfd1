//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// When `file` is on, diagnostics go to `co-scientist.log` and every
/// reasoning exchange to a JSONL transcript, both in `directory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub file: bool,
    /// Defaults to the platform data directory when unset
    pub directory: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            file: true,
            directory: None,
        }
    }
}

impl FileLoggingConfig {
    /// The configured directory, or `<data dir>/co-scientist/logs`.
    pub fn resolved_directory(&self) -> Option<PathBuf> {
        self.directory
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("co-scientist").join("logs")))
    }
}
