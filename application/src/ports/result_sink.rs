//! Result sink port
//!
//! Persists the result bundle of a finished run.

use crate::use_cases::run_pipeline::ResultBundle;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResultSinkError {
    #[error("I/O error writing results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait ResultSink: Send + Sync {
    /// Write `bundle` and return where it went (e.g. a file path).
    fn write(&self, bundle: &ResultBundle) -> Result<String, ResultSinkError>;
}
