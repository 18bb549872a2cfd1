//! Pipeline states and legal transitions.
//!
//! ```text
//! Idle → GoalSet → Generating → Reviewing → Filtering → InitialRanking
//!      → Refining(1) → … → Refining(N) → FinalRanking → Synthesizing → Done
//! ```
//!
//! `Reviewing` and `Filtering` may be skipped (a plan without a proximity
//! step goes straight from `Reviewing` to `InitialRanking`), and zero
//! refinement iterations go straight to `FinalRanking`. `Failed` is
//! reachable from every non-terminal state.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Coarse stage names, used for progress reporting and failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planning,
    Generation,
    Reflection,
    Proximity,
    Ranking,
    Evolution,
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Planning => "planning",
            Stage::Generation => "generation",
            Stage::Reflection => "reflection",
            Stage::Proximity => "proximity",
            Stage::Ranking => "ranking",
            Stage::Evolution => "evolution",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    Idle,
    GoalSet,
    Generating,
    Reviewing,
    Filtering,
    InitialRanking,
    Refining {
        iteration: u32,
    },
    FinalRanking,
    Synthesizing,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(&self, next: &PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (s, Failed) => !s.is_terminal(),
            (Idle, GoalSet)
            | (GoalSet, Generating)
            | (Generating, Reviewing)
            | (Generating, InitialRanking)
            | (Reviewing, Filtering)
            | (Reviewing, InitialRanking)
            | (Filtering, InitialRanking)
            | (InitialRanking, FinalRanking)
            | (FinalRanking, Synthesizing)
            | (Synthesizing, Done) => true,
            (InitialRanking, Refining { iteration }) => *iteration == 1,
            (Refining { iteration: a }, Refining { iteration: b }) => *b == a + 1,
            (Refining { .. }, FinalRanking) => true,
            _ => false,
        }
    }

    /// Move to `next`, or fail without changing state.
    pub fn advance(&mut self, next: PipelineState) -> Result<(), DomainError> {
        if self.can_transition_to(&next) {
            *self = next;
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// The stage this state belongs to, for reporting.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineState::Idle | PipelineState::GoalSet => Stage::Planning,
            PipelineState::Generating => Stage::Generation,
            PipelineState::Reviewing => Stage::Reflection,
            PipelineState::Filtering => Stage::Proximity,
            PipelineState::InitialRanking | PipelineState::FinalRanking => Stage::Ranking,
            PipelineState::Refining { .. } => Stage::Evolution,
            PipelineState::Synthesizing | PipelineState::Done | PipelineState::Failed => {
                Stage::Synthesis
            }
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::GoalSet => write!(f, "goal_set"),
            PipelineState::Generating => write!(f, "generating"),
            PipelineState::Reviewing => write!(f, "reviewing"),
            PipelineState::Filtering => write!(f, "filtering"),
            PipelineState::InitialRanking => write!(f, "initial_ranking"),
            PipelineState::Refining { iteration } => write!(f, "refining({iteration})"),
            PipelineState::FinalRanking => write!(f, "final_ranking"),
            PipelineState::Synthesizing => write!(f, "synthesizing"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}
