//! Reflection critique assessment.

use crate::hypothesis::Review;

const POSITIVE_TERMS: &[&str] = &[
    "strong",
    "valid",
    "plausible",
    "consistent",
    "novel",
    "innovative",
];
const NEGATIVE_TERMS: &[&str] = &[
    "weak",
    "invalid",
    "implausible",
    "inconsistent",
    "contradicts",
    "flawed",
];

/// Quality when the critique contains no lexicon term at all.
pub const NEUTRAL_QUALITY: f64 = 0.5;

/// Lexicon quality estimate: `positive / (positive + negative)`.
///
/// Each term counts once if it occurs anywhere as a substring of the
/// lowercased text, however many times it appears. Substrings overlap on
/// purpose: "invalid" also contains "valid", so it counts on both sides.
pub fn quality_estimate(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let positive = POSITIVE_TERMS.iter().filter(|t| lower.contains(*t)).count();
    let negative = NEGATIVE_TERMS.iter().filter(|t| lower.contains(*t)).count();
    match positive + negative {
        0 => NEUTRAL_QUALITY,
        total => positive as f64 / total as f64,
    }
}

#[derive(Clone, Copy)]
enum Section {
    Strengths,
    Weaknesses,
}

fn bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

/// Collect bullet items listed under "Strengths" and "Weaknesses" headings.
fn listed_points(text: &str) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut section: Option<Section> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(item) = bullet(line) {
            match section {
                Some(Section::Strengths) => strengths.push(item.to_string()),
                Some(Section::Weaknesses) => weaknesses.push(item.to_string()),
                None => {}
            }
            continue;
        }

        let heading = line
            .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '#' | '*' | '.' | ')' | ' '))
            .to_lowercase();
        section = if heading.starts_with("strength") {
            Some(Section::Strengths)
        } else if heading.starts_with("weakness") {
            Some(Section::Weaknesses)
        } else {
            None
        };
    }
    (strengths, weaknesses)
}

/// Build the structured review from a Reflection critique.
///
/// - `valid` unless "invalid" or "implausible" appears
/// - `ethical_concerns` on "ethical concerns" or "ethical issues"
/// - `practical_limitations` on "impractical" or "limitation"
pub fn assess_review(text: &str) -> Review {
    let lower = text.to_lowercase();
    let (strengths, weaknesses) = listed_points(text);
    Review {
        valid: !lower.contains("invalid") && !lower.contains("implausible"),
        strengths,
        weaknesses,
        ethical_concerns: lower.contains("ethical concerns") || lower.contains("ethical issues"),
        practical_limitations: lower.contains("impractical") || lower.contains("limitation"),
        quality: quality_estimate(text),
        text: text.to_string(),
    }
}
