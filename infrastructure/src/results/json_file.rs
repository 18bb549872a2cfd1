//! Writes each finished run to `research_results_<timestamp>.json`.

use chrono::Local;
use coscientist_application::{ResultBundle, ResultSink, ResultSinkError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// [`ResultSink`] that writes pretty-printed JSON into a directory.
pub struct JsonFileResultSink {
    directory: PathBuf,
}

impl JsonFileResultSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name() -> String {
        format!(
            "research_results_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        )
    }
}

impl ResultSink for JsonFileResultSink {
    fn write(&self, bundle: &ResultBundle) -> Result<String, ResultSinkError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(Self::file_name());
        let json = serde_json::to_string_pretty(bundle)?;
        fs::write(&path, json)?;
        info!("Results saved to {}", path.display());
        Ok(path.display().to_string())
    }
}
