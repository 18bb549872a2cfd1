//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Console output format for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every ranked hypothesis with its review, then the full report
    Full,
    /// Top hypotheses and the executive summary
    Summary,
    /// The result bundle as JSON
    Json,
}

impl From<OutputFormat> for coscientist_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => coscientist_domain::OutputFormat::Full,
            OutputFormat::Summary => coscientist_domain::OutputFormat::Summary,
            OutputFormat::Json => coscientist_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for co-scientist
#[derive(Parser, Debug)]
#[command(name = "co-scientist")]
#[command(author, version, about = "AI co-scientist - generate, critique and rank research hypotheses")]
#[command(long_about = r#"
co-scientist turns a research goal into a ranked set of hypotheses and a report.

The pipeline:
1. Generation:  draft candidate hypotheses for the goal
2. Reflection:  critique each hypothesis
3. Proximity:   drop hypotheses that drift from the goal
4. Ranking:     pairwise tournament (or per-criterion scoring for large sets)
5. Evolution:   refine the top hypotheses and combine the best two, then re-rank
6. Synthesis:   write the research report

Configuration files are loaded from (in priority order):
1. COSCIENTIST_<SECTION>__<KEY> environment variables
2. --config <path>      Explicit config file
3. ./coscientist.toml   Project-level config
4. ~/.config/co-scientist/config.toml   Global config

The API key is read from OPENAI_API_KEY unless [reasoning] api_key_env says otherwise.

Example:
  co-scientist "To investigate how caffeine affects reaction time in sleep-deprived adults"
  co-scientist -m gpt-4o-mini -n 6 -i 2 --report-format grant_proposal "To determine ..."
"#)]
pub struct Cli {
    /// The research goal
    pub goal: Option<String>,

    /// Research goal (alternative to the positional argument)
    #[arg(short, long = "goal", value_name = "GOAL", conflicts_with = "goal")]
    pub goal_flag: Option<String>,

    /// Model for every role
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Temperature for every role (overrides the per-role defaults)
    #[arg(short, long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Number of hypotheses to generate
    #[arg(short = 'n', long, value_name = "N")]
    pub hypotheses: Option<usize>,

    /// Refinement iterations
    #[arg(short, long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Report format (scientific_report, executive_summary, grant_proposal, brief)
    #[arg(long, value_name = "FORMAT")]
    pub report_format: Option<String>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Directory for result bundles
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write a result bundle
    #[arg(long)]
    pub no_save: bool,

    /// Skip the Supervisor (goal analysis and plan updates)
    #[arg(long)]
    pub no_supervisor: bool,

    /// Condense the report into an executive summary
    #[arg(long)]
    pub executive_summary: bool,

    /// Feedback passed to the Supervisor at every plan update
    #[arg(long, value_name = "TEXT")]
    pub feedback: Option<String>,

    /// Reasoning calls in flight at once within a stage
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Stop between stages once this many seconds have passed
    #[arg(long, value_name = "SECS")]
    pub time_budget: Option<u64>,

    /// Do not write the log file or the JSONL transcript
    #[arg(long)]
    pub no_log_file: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The research goal from either the positional argument or `--goal`.
    pub fn research_goal(&self) -> Option<&str> {
        self.goal.as_deref().or(self.goal_flag.as_deref())
    }
}
