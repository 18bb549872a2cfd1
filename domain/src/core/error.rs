//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid research goal: {}", .0.join("; "))]
    InvalidGoal(Vec<String>),

    #[error("Invalid hypothesis: {}", .0.join("; "))]
    InvalidHypothesis(Vec<String>),

    #[error("Hypothesis {0} is already in the store")]
    DuplicateHypothesis(String),

    #[error("Unknown hypothesis: {0}")]
    UnknownHypothesis(String),

    #[error("Invalid lineage for {id}: {reason}")]
    InvalidLineage { id: String, reason: String },

    #[error("Invalid pipeline transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Check if this error is a structural validation failure (goal or hypothesis)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidGoal(_) | DomainError::InvalidHypothesis(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_invalid_goal_lists_every_issue() {
        let error = DomainError::InvalidGoal(vec![
            "Research goal is too short".to_string(),
            "Research goal should be a statement, not a question".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "Invalid research goal: Research goal is too short; Research goal should be a statement, not a question"
        );
    }

    #[test]
    fn test_error_kind_checks() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::Cancelled.is_validation());
        assert!(DomainError::InvalidHypothesis(vec![]).is_validation());
        assert!(!DomainError::UnknownHypothesis("H-0001".to_string()).is_cancelled());
    }
}
