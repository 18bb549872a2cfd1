//! Feedback port
//!
//! Supplies free-text user feedback to the Supervisor between refinement
//! iterations.

use coscientist_domain::ExecutionStatus;

pub trait FeedbackProvider: Send + Sync {
    /// Feedback for the plan update after `status`, if any.
    fn feedback(&self, status: &ExecutionStatus) -> Option<String>;
}

/// Never gives feedback.
pub struct NoFeedback;

impl FeedbackProvider for NoFeedback {
    fn feedback(&self, _status: &ExecutionStatus) -> Option<String> {
        None
    }
}

/// The same fixed text at every plan update, e.g. from a command-line flag.
pub struct FixedFeedback(pub String);

impl FeedbackProvider for FixedFeedback {
    fn feedback(&self, _status: &ExecutionStatus) -> Option<String> {
        let text = self.0.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_feedback_ignores_blank() {
        let status = ExecutionStatus::default();
        assert_eq!(FixedFeedback("  ".into()).feedback(&status), None);
        assert_eq!(
            FixedFeedback(" focus on dosage ".into()).feedback(&status),
            Some("focus on dosage".to_string())
        );
        assert_eq!(NoFeedback.feedback(&status), None);
    }
}
