//! Console output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is printed to the console.
///
/// The result bundle written to disk is unaffected by this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every ranked hypothesis with review and proximity details, then the report
    Full,
    /// Top three hypotheses and the executive summary (default)
    #[default]
    Summary,
    /// The result bundle as JSON on stdout
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Summary => "summary",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected full, summary or json)"
            )),
        }
    }
}
