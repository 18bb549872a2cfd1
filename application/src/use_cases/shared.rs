//! Shared utilities for use cases.
//!
//! Cancellation and the time budget are only checked between stages; a
//! reasoning call in flight is never interrupted.

use crate::use_cases::run_pipeline::RunPipelineError;
use chrono::Local;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunPipelineError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunPipelineError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunPipelineError::Cancelled);
    }
    Ok(())
}

/// Stage-boundary check: cancellation first, then the wall-clock budget.
pub(crate) fn check_boundary(
    token: &Option<CancellationToken>,
    started: Instant,
    budget: Option<Duration>,
) -> Result<(), RunPipelineError> {
    check_cancelled(token)?;
    if let Some(budget) = budget {
        let elapsed = started.elapsed();
        if elapsed >= budget {
            return Err(RunPipelineError::BudgetExhausted { budget, elapsed });
        }
    }
    Ok(())
}

/// Local time as shown in reports and plans.
pub(crate) fn display_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Local time in ISO 8601 with microseconds, for result bundles.
pub(crate) fn iso_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_token_is_not_cancelled() {
        assert!(check_cancelled(&None).is_ok());
    }

    #[test]
    fn test_cancelled_token() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(
            check_boundary(&Some(token), Instant::now(), None),
            Err(RunPipelineError::Cancelled)
        );
    }

    #[test]
    fn test_exhausted_budget() {
        let result = check_boundary(&None, Instant::now(), Some(Duration::ZERO));
        assert!(matches!(
            result,
            Err(RunPipelineError::BudgetExhausted { .. })
        ));
        assert!(check_boundary(&None, Instant::now(), Some(Duration::from_secs(60))).is_ok());
    }

    #[test]
    fn test_timestamp_shapes() {
        assert_eq!(display_timestamp().len(), 19);
        assert!(iso_timestamp().contains('T'));
    }
}
