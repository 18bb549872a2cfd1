//! Research goal value object

use crate::core::error::DomainError;
use crate::validation::validate_research_goal;
use serde::{Deserialize, Serialize};

/// The research goal a pipeline run pursues (Value Object)
///
/// Constructed through [`ResearchGoal::parse`], which applies the goal
/// checklist, or [`ResearchGoal::try_new`] when only non-emptiness matters
/// (tests, replays of stored runs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResearchGoal {
    content: String,
}

impl ResearchGoal {
    /// Validate and create a research goal.
    ///
    /// The goal is accepted when the checklist reports at most one issue.
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let report = validate_research_goal(&content);
        if report.is_valid() {
            Ok(Self { content })
        } else {
            Err(DomainError::InvalidGoal(report.issues))
        }
    }

    /// Create a goal without running the checklist, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for ResearchGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
