//! Winner extraction for pairwise comparisons.

use crate::ranking::Winner;

/// Decide the winner of a comparison between "hypothesis 1" and "hypothesis 2".
///
/// Rules, in priority order:
///
/// 1. "hypothesis K is superior" / "hypothesis K is stronger" (K=1 checked first)
/// 2. more "hypothesis K is more" + "hypothesis K has higher" phrases
/// 3. exactly one of the two identifiers appears in the last three
///    `.`-separated pieces of the text
/// 4. otherwise a tie
pub fn determine_winner(text: &str) -> Winner {
    let lower = text.to_lowercase();

    let declared = |k: u8| {
        lower.contains(&format!("hypothesis {k} is superior"))
            || lower.contains(&format!("hypothesis {k} is stronger"))
    };
    if declared(1) {
        return Winner::First;
    }
    if declared(2) {
        return Winner::Second;
    }

    let comparatives = |k: u8| {
        lower.matches(&format!("hypothesis {k} is more")).count()
            + lower.matches(&format!("hypothesis {k} has higher")).count()
    };
    let (first, second) = (comparatives(1), comparatives(2));
    if first != second {
        return if first > second {
            Winner::First
        } else {
            Winner::Second
        };
    }

    let pieces: Vec<&str> = text.split('.').collect();
    let tail = pieces[pieces.len().saturating_sub(3)..]
        .join(".")
        .to_lowercase();
    match (tail.contains("hypothesis 1"), tail.contains("hypothesis 2")) {
        (true, false) => Winner::First,
        (false, true) => Winner::Second,
        _ => Winner::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_declaration() {
        assert_eq!(
            determine_winner("Overall, Hypothesis 2 is superior."),
            Winner::Second
        );
        assert_eq!(
            determine_winner("Hypothesis 1 is stronger on testability."),
            Winner::First
        );
    }

    #[test]
    fn test_first_declaration_checked_first() {
        assert_eq!(
            determine_winner("Hypothesis 2 is stronger in scope but hypothesis 1 is superior."),
            Winner::First
        );
    }

    #[test]
    fn test_comparative_counts() {
        let text = "Hypothesis 2 is more novel. Hypothesis 2 has higher impact. \
                    Hypothesis 1 is more testable. Both are fine. Neither dominates. The end";
        assert_eq!(determine_winner(text), Winner::Second);
    }

    #[test]
    fn test_last_sentences_heuristic() {
        let text = "Hypothesis 1 explains more. Hypothesis 2 is cheaper. \
                    Weighing everything. I would pick hypothesis 1. Final.";
        assert_eq!(determine_winner(text), Winner::First);
    }

    #[test]
    fn test_tie_when_undecided() {
        assert_eq!(
            determine_winner("Both hypothesis 1 and hypothesis 2 have merit."),
            Winner::Tie
        );
        assert_eq!(determine_winner("No identifiers at all"), Winner::Tie);
    }
}
