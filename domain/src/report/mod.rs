//! Synthesis output: report templates and the report record.

pub mod entities;
pub mod format;

pub use entities::{DEFAULT_TITLE, ResearchReport, extract_title};
pub use format::ReportFormat;
