//! CLI entrypoint for co-scientist
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;
mod overrides;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use coscientist_application::{
    FixedFeedback, NoProgress, ProgressNotifier, ResultBundle, RunPipelineInput,
    RunPipelineUseCase,
};
use coscientist_domain::{ConfigIssue, OutputFormat};
use coscientist_infrastructure::{
    ConfigError, ConfigLoader, FileConfig, JsonFileResultSink, JsonlConversationLogger,
    OpenAiGateway,
};
use coscientist_presentation::{Cli, ConsoleFormatter, OutputConfig, ProgressReporter};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    overrides::apply_cli_overrides(&mut config, &cli);

    let _log_guard = logging::init(cli.verbose, &config.logging);
    info!("Starting co-scientist");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", config.to_toml().context("Failed to render configuration")?);
        return Ok(ExitCode::SUCCESS);
    }

    report_issues(&config)?;

    let Some(goal) = cli.research_goal().map(str::to_string) else {
        bail!("A research goal is required. Pass it as an argument or with --goal.");
    };

    // Clamping issues were already reported by report_issues
    let (settings, _issues) = config.reasoning.to_role_settings();
    let (params, _issues) = config.pipeline.to_pipeline_params();
    let output_config = OutputConfig::resolve(&cli, config.output.format, config.output.color);
    if !output_config.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.reasoning)?);

    let cancellation = CancellationToken::new();
    spawn_ctrl_c_handler(cancellation.clone());

    let mut use_case =
        RunPipelineUseCase::new(gateway, settings.clone()).with_cancellation(cancellation);

    if config.logging.file
        && let Some(dir) = config.logging.resolved_directory()
        && let Some(logger) = JsonlConversationLogger::in_directory(dir)
    {
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }
    if let Some(feedback) = &cli.feedback {
        use_case = use_case.with_feedback(Arc::new(FixedFeedback(feedback.clone())));
    }
    if !cli.no_save {
        use_case = use_case.with_result_sink(Arc::new(JsonFileResultSink::new(
            config.output.directory.clone(),
        )));
    }

    if output_config.show_progress {
        println!();
        println!("{} {}", "Research goal:".cyan().bold(), goal);
        println!("{} {}", "Model:".cyan().bold(), settings.model);
        println!();
    }

    // === Execute ===
    let progress: Box<dyn ProgressNotifier> = if output_config.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };
    let result = use_case
        .execute_with_progress(
            RunPipelineInput::new(goal.clone(), params.clone()),
            progress.as_ref(),
        )
        .await;

    match result {
        Ok(output) => {
            let text = match output_config.format {
                OutputFormat::Full => ConsoleFormatter::format_full(&output),
                OutputFormat::Summary => ConsoleFormatter::format_summary(&output),
                OutputFormat::Json => {
                    let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
                    let bundle = ResultBundle::new(&goal, &settings, &params, &output, timestamp);
                    ConsoleFormatter::format_json(&bundle)
                }
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("{}", ConsoleFormatter::format_failure(&failure));
            Ok(if failure.is_cancelled() {
                ExitCode::from(130)
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Log warnings and stop on errors.
fn report_issues(config: &FileConfig) -> Result<()> {
    let issues: Vec<ConfigIssue> = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    if let Some(err) = ConfigError::from_issues(&issues) {
        return Err(err.into());
    }
    Ok(())
}

/// Cancel the run on Ctrl-C; the pipeline stops at the next stage boundary.
fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current stage");
            token.cancel();
        }
    });
}
