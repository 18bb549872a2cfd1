//! Presentation-level configuration
//!
//! How a run is shown on the console, after CLI flags are applied over the
//! `[output]` section of the config file.

use crate::cli::commands::Cli;
use coscientist_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI flags win over the file's `format` and `color`.
    ///
    /// JSON output never shows progress so stdout stays parseable.
    pub fn resolve(cli: &Cli, file_format: Option<OutputFormat>, file_color: bool) -> Self {
        let format = cli
            .output
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();
        Self {
            format,
            color: file_color && !cli.no_color,
            show_progress: !cli.quiet && format != OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_format_wins() {
        let cli = Cli::parse_from(["co-scientist", "-o", "full", "To x"]);
        let config = OutputConfig::resolve(&cli, Some(OutputFormat::Json), true);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.show_progress);
    }

    #[test]
    fn test_file_format_and_color() {
        let cli = Cli::parse_from(["co-scientist", "--no-color", "To x"]);
        let config = OutputConfig::resolve(&cli, Some(OutputFormat::Json), true);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["co-scientist", "-q", "To x"]);
        let config = OutputConfig::resolve(&cli, None, true);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(!config.show_progress);
    }
}
