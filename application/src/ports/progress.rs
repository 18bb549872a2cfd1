//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use coscientist_domain::Stage;

/// Callback for progress updates during a research run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts with the number of reasoning calls it will make
    fn on_stage_start(&self, stage: Stage, total_tasks: usize);

    /// Called when one reasoning call of a stage finishes
    fn on_task_complete(&self, stage: Stage, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage);

    /// Called before each refinement iteration
    fn on_iteration_start(&self, _iteration: u32, _total: u32) {}

    /// Non-fatal condition worth showing to the user
    fn on_notice(&self, _message: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: Stage, _success: bool) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
