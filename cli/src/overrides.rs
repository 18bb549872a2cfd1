//! Command-line flags applied over the loaded configuration.

use coscientist_infrastructure::FileConfig;
use coscientist_presentation::Cli;

/// Apply every flag the user passed; unset flags leave the file values alone.
pub fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.reasoning.model = Some(model.clone());
    }
    if let Some(temperature) = cli.temperature {
        config.reasoning.temperature = Some(temperature);
    }

    let pipeline = &mut config.pipeline;
    if let Some(count) = cli.hypotheses {
        pipeline.hypothesis_count = Some(count);
    }
    if let Some(iterations) = cli.iterations {
        pipeline.iterations = Some(iterations);
    }
    if let Some(format) = &cli.report_format {
        pipeline.output_format = Some(format.clone());
    }
    if let Some(concurrency) = cli.concurrency {
        pipeline.max_concurrency = Some(concurrency);
    }
    if let Some(secs) = cli.time_budget {
        pipeline.time_budget_secs = Some(secs);
    }
    if cli.no_supervisor {
        pipeline.use_supervisor = Some(false);
    }
    if cli.executive_summary {
        pipeline.executive_summary = Some(true);
    }

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if cli.no_log_file {
        config.logging.file = false;
    }
}
