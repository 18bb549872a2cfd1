//! Output formatter trait

use coscientist_application::{PipelineOutput, ResultBundle};

/// Trait for formatting finished research runs
pub trait OutputFormatter {
    /// Every ranked hypothesis with review details, then the full report
    fn format_full(&self, output: &PipelineOutput) -> String;

    /// Top hypotheses and the executive summary (or the report opening)
    fn format_summary(&self, output: &PipelineOutput) -> String;

    /// The result bundle as pretty JSON
    fn format_json(&self, bundle: &ResultBundle) -> String;
}
