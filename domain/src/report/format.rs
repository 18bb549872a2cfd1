//! Report templates

use serde::{Deserialize, Serialize};

/// Output template for the synthesized report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    ScientificReport,
    GrantProposal,
    ResearchBrief,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [
        ReportFormat::ScientificReport,
        ReportFormat::GrantProposal,
        ReportFormat::ResearchBrief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::ScientificReport => "scientific_report",
            ReportFormat::GrantProposal => "grant_proposal",
            ReportFormat::ResearchBrief => "research_brief",
        }
    }

    /// Human-readable name used in prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportFormat::ScientificReport => "scientific report",
            ReportFormat::GrantProposal => "grant proposal",
            ReportFormat::ResearchBrief => "concise research brief",
        }
    }

    /// Ordered `(section, guidance)` pairs the report must contain.
    pub fn sections(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ReportFormat::ScientificReport => &[
                ("Title", "A descriptive title for the research"),
                ("Abstract", "A concise summary of the problem, hypotheses, and implications (250 words max)"),
                ("Introduction", "Background on the research problem and its significance"),
                ("Hypotheses", "Detailed presentation of each hypothesis with supporting rationale"),
                ("Evidence and Prior Work", "How these hypotheses relate to existing scientific knowledge"),
                ("Methodology", "Proposed approaches for testing or validating these hypotheses"),
                ("Expected Outcomes", "Anticipated results and their interpretation"),
                ("Implications", "Broader impact and significance if the hypotheses are validated"),
                ("Limitations and Alternatives", "Acknowledging constraints and alternative explanations"),
                ("References", "Citations for all sources mentioned (in a standard academic format)"),
            ],
            ReportFormat::GrantProposal => &[
                ("Project Title", "A compelling title for the research project"),
                ("Executive Summary", "Brief overview of the project's aims and significance (250 words max)"),
                ("Background and Significance", "Context of the research problem and its importance"),
                ("Specific Aims", "Clear statement of research objectives based on the hypotheses"),
                ("Research Strategy", "Detailed hypotheses and approach to testing them"),
                ("Preliminary Data", "Existing evidence supporting the hypotheses"),
                ("Methodology", "Experimental design, techniques, and analytical approaches"),
                ("Timeline and Milestones", "Projected schedule for completing research activities"),
                ("Expected Outcomes and Impact", "Anticipated results and their significance"),
                ("Budget Justification", "Resources needed to conduct the proposed research"),
                ("References", "Citations for all sources mentioned (in a standard academic format)"),
            ],
            ReportFormat::ResearchBrief => &[
                ("Title", "A descriptive title for the research"),
                ("Key Question", "The central research question being addressed"),
                ("Hypotheses", "Clear statements of the proposed explanations or solutions"),
                ("Rationale", "Brief scientific justification for each hypothesis"),
                ("Quick-win Experiments", "Rapid tests that could validate or refute the hypotheses"),
                ("Long-term Research Direction", "Strategic vision if hypotheses are supported"),
                ("Practical Applications", "Potential real-world impacts of the research"),
                ("Key References", "3-5 most important citations supporting the approach"),
            ],
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "scientific_report" | "report" => Ok(ReportFormat::ScientificReport),
            "grant_proposal" | "grant" => Ok(ReportFormat::GrantProposal),
            "research_brief" | "brief" => Ok(ReportFormat::ResearchBrief),
            other => Err(format!(
                "unknown report format '{other}' (expected scientific_report, grant_proposal or research_brief)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_counts() {
        assert_eq!(ReportFormat::ScientificReport.sections().len(), 10);
        assert_eq!(ReportFormat::GrantProposal.sections().len(), 11);
        assert_eq!(ReportFormat::ResearchBrief.sections().len(), 8);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("grant-proposal".parse(), Ok(ReportFormat::GrantProposal));
        assert_eq!("brief".parse(), Ok(ReportFormat::ResearchBrief));
        assert!("poem".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ReportFormat::ResearchBrief).unwrap();
        assert_eq!(json, "\"research_brief\"");
    }
}
