//! Keyword-based analysis of a research query.

use serde::{Deserialize, Serialize};

const RESEARCH_TYPES: &[&str] = &[
    "explanation",
    "prediction",
    "design",
    "discovery",
    "exploration",
    "validation",
];

const SCOPE_TERMS: &[(&str, &str)] = &[
    ("narrow", "narrow"),
    ("focused", "narrow"),
    ("specific", "narrow"),
    ("broad", "broad"),
    ("complex", "broad"),
    ("wide", "broad"),
];

const DOMAIN_WINDOW: usize = 200;
const CONCEPT_WINDOW: usize = 300;
const LEAD_IN: usize = 20;

/// Characteristics of a research query, read from the Supervisor's analysis text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub domains: Vec<String>,
    pub research_type: String,
    pub scope: String,
    pub key_concepts: Vec<String>,
}

/// Excerpt around the first occurrence of `keyword`: from 20 characters
/// before it to `max_chars` after its start, cut back to the last period
/// when that period lies in the second half of the excerpt.
fn section_around(text: &str, keyword: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = text.to_lowercase().chars().collect();
    let needle: Vec<char> = keyword.to_lowercase().chars().collect();
    if lower.len() != chars.len() || needle.is_empty() {
        return String::new();
    }

    let Some(at) = lower.windows(needle.len()).position(|w| w == needle.as_slice()) else {
        return String::new();
    };
    let start = at.saturating_sub(LEAD_IN);
    let end = (at + max_chars).min(chars.len());
    let mut section = &chars[start..end];

    if let Some(last_period) = section.iter().rposition(|&c| c == '.')
        && last_period > section.len() / 2
    {
        section = &section[..=last_period];
    }
    section.iter().collect()
}

fn comma_items(section: &str, min_len: usize) -> Vec<String> {
    section
        .split(',')
        .map(str::trim)
        .filter(|item| item.chars().count() > min_len)
        .map(str::to_string)
        .collect()
}

/// Extract domains, research type, scope and key concepts from analysis text.
///
/// The first matching research type and scope term (in their fixed order)
/// win. Domains and concepts are comma-separated items from the excerpt
/// around "domain" and "concept".
pub fn analyze_query(text: &str) -> QueryAnalysis {
    let lower = text.to_lowercase();

    let domains = if lower.contains("domain") {
        comma_items(&section_around(text, "domain", DOMAIN_WINDOW), 0)
    } else {
        Vec::new()
    };

    let research_type = RESEARCH_TYPES
        .iter()
        .find(|t| lower.contains(*t))
        .map(|t| t.to_string())
        .unwrap_or_default();

    let scope = SCOPE_TERMS
        .iter()
        .find(|(term, _)| lower.contains(term))
        .map(|(_, scope)| scope.to_string())
        .unwrap_or_default();

    let key_concepts = if lower.contains("concept") || lower.contains("key") {
        comma_items(&section_around(text, "concept", CONCEPT_WINDOW), 2)
    } else {
        Vec::new()
    };

    QueryAnalysis {
        domains,
        research_type,
        scope,
        key_concepts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_and_scope() {
        let analysis = analyze_query("This is a prediction task with a narrow focus.");
        assert_eq!(analysis.research_type, "prediction");
        assert_eq!(analysis.scope, "narrow");
        assert!(analysis.domains.is_empty());
    }

    #[test]
    fn test_scope_order_prefers_narrow_terms() {
        // "focused" is checked before "broad".
        let analysis = analyze_query("A broad but focused study");
        assert_eq!(analysis.scope, "narrow");
    }

    #[test]
    fn test_domains_are_comma_items() {
        let analysis = analyze_query("Domains: neuroscience, pharmacology, sleep medicine");
        assert_eq!(
            analysis.domains,
            vec!["Domains: neuroscience", "pharmacology", "sleep medicine"]
        );
    }

    #[test]
    fn test_concepts_drop_short_items() {
        let analysis = analyze_query("Key concepts: caffeine, RT, adenosine");
        assert_eq!(analysis.key_concepts, vec!["Key concepts: caffeine", "adenosine"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze_query(""), QueryAnalysis::default());
    }
}
