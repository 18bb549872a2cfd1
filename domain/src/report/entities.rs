//! Research report record

use super::format::ReportFormat;
use serde::{Deserialize, Serialize};

/// Title used when the body offers no usable title line.
pub const DEFAULT_TITLE: &str = "Research Report";

const TITLE_SCAN_LINES: usize = 10;
const TITLE_MAX_LEN: usize = 100;

/// The synthesized report (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub title: String,
    pub research_goal: String,
    pub body_text: String,
    pub format: ReportFormat,
    pub hypothesis_count: usize,
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub executive_summary: Option<String>,
}

impl ResearchReport {
    pub fn new(
        research_goal: impl Into<String>,
        body_text: impl Into<String>,
        format: ReportFormat,
        hypothesis_count: usize,
        timestamp: impl Into<String>,
    ) -> Self {
        let body_text = body_text.into();
        Self {
            title: extract_title(&body_text),
            research_goal: research_goal.into(),
            body_text,
            format,
            hypothesis_count,
            timestamp: timestamp.into(),
            executive_summary: None,
        }
    }
}

/// First line among the first ten that is non-blank, is not a markdown
/// heading and is shorter than 100 characters, trimmed.
pub fn extract_title(body: &str) -> String {
    body.lines()
        .take(TITLE_SCAN_LINES)
        .find(|line| {
            !line.trim().is_empty()
                && !line.starts_with('#')
                && line.chars().count() < TITLE_MAX_LEN
        })
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_first_short_line() {
        let body = "\n\nCaffeine and Reaction Time Under Sleep Loss\n\nAbstract: ...";
        assert_eq!(extract_title(body), "Caffeine and Reaction Time Under Sleep Loss");
    }

    #[test]
    fn test_title_skips_headings_and_long_lines() {
        let long = "x".repeat(120);
        let body = format!("# Heading\n{long}\n  Adenosine Blockade Study  \nrest");
        assert_eq!(extract_title(&body), "Adenosine Blockade Study");
    }

    #[test]
    fn test_title_default_when_nothing_qualifies() {
        let body = format!("{}\n", "# only headings\n".repeat(12));
        assert_eq!(extract_title(&body), DEFAULT_TITLE);
        assert_eq!(extract_title(""), DEFAULT_TITLE);
    }

    #[test]
    fn test_title_scan_limited_to_ten_lines() {
        let body = format!("{}Late Title", "#\n".repeat(10));
        assert_eq!(extract_title(&body), DEFAULT_TITLE);
    }

    #[test]
    fn test_new_extracts_title() {
        let report = ResearchReport::new(
            "To investigate caffeine",
            "Title Line\nBody",
            ReportFormat::ResearchBrief,
            3,
            "2024-01-01 00:00:00",
        );
        assert_eq!(report.title, "Title Line");
        assert_eq!(report.hypothesis_count, 3);
        assert!(report.executive_summary.is_none());
    }
}
