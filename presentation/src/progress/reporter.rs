//! Progress reporting for research runs

use colored::Colorize;
use coscientist_application::ProgressNotifier;
use coscientist_domain::Stage;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a research run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Planning => "Planning",
            Stage::Generation => "Generating hypotheses",
            Stage::Reflection => "Reviewing",
            Stage::Proximity => "Checking relevance",
            Stage::Ranking => "Ranking",
            Stage::Evolution => "Evolving",
            Stage::Synthesis => "Writing report",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: Stage, success: bool) {
        if let Ok(slot) = self.stage_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            if !success {
                pb.set_message(format!("{} call failed", "x".red()));
            }
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} done", stage.as_str().green()));
        }
    }

    fn on_iteration_start(&self, iteration: u32, total: u32) {
        let _ = self.multi.println(format!(
            "{} {}",
            "->".cyan(),
            format!("Iteration {iteration}/{total}").bold()
        ));
    }

    fn on_notice(&self, message: &str) {
        let _ = self
            .multi
            .println(format!("{} {}", "!".yellow().bold(), message));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        println!(
            "{} {} ({} calls)",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: Stage, success: bool) {
        if !success {
            println!("  {} call failed", "x".red());
        }
    }

    fn on_stage_complete(&self, _stage: Stage) {}

    fn on_iteration_start(&self, iteration: u32, total: u32) {
        println!("{} Iteration {}/{}", "->".cyan(), iteration, total);
    }

    fn on_notice(&self, message: &str) {
        println!("  {} {}", "!".yellow(), message);
    }
}
