//! Block splitting and free-text field assignment.
//!
//! A response is cut into paragraph-like blocks at blank lines. Inside a
//! paragraph, a line that opens with a field label (`Rationale: ...`) also
//! starts a new block, so both "one field per paragraph" and "one field per
//! line" layouts work.
//!
//! A block is assigned to a field by its opening label when it has one;
//! otherwise the first field (in [`Field::ALL`] order) whose label occurs
//! anywhere in the lowercased block, provided the block contains a colon.
//! The value is the text after the first colon.

use crate::hypothesis::HypothesisDraft;

/// A free-text hypothesis field and the labels that announce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Statement,
    Rationale,
    Evidence,
    Assumptions,
    Validation,
}

impl Field {
    /// Assignment precedence for blocks without an opening label.
    pub const ALL: [Field; 5] = [
        Field::Statement,
        Field::Rationale,
        Field::Evidence,
        Field::Assumptions,
        Field::Validation,
    ];

    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Field::Statement => &["statement"],
            Field::Rationale => &["rationale"],
            Field::Evidence => &["evidence"],
            Field::Assumptions => &["assumptions"],
            Field::Validation => &["validation", "testing"],
        }
    }

    fn slot<'a>(&self, draft: &'a mut HypothesisDraft) -> &'a mut String {
        match self {
            Field::Statement => &mut draft.statement,
            Field::Rationale => &mut draft.rationale,
            Field::Evidence => &mut draft.evidence,
            Field::Assumptions => &mut draft.assumptions,
            Field::Validation => &mut draft.validation_approach,
        }
    }
}

const HEADER_LABEL: &str = "hypothesis";

/// Strip list numbering and markdown emphasis from the start of a line.
fn bare(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c.is_whitespace() || matches!(c, '#' | '*' | '-' | '.' | ')' | '_')
    })
}

/// Label a line opens with, if it is a labeled line (`Label ...: value`).
fn opening_label(line: &str) -> Option<&'static str> {
    if !line.contains(':') {
        return None;
    }
    let lower = bare(line).to_lowercase();
    std::iter::once(HEADER_LABEL)
        .chain(Field::ALL.iter().flat_map(|f| f.labels().iter().copied()))
        .find(|label| lower.starts_with(label))
}

/// Split a response into blocks. Empty blocks are dropped.
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    for paragraph in text.split("\n\n") {
        let mut current: Vec<&str> = Vec::new();
        for line in paragraph.lines() {
            if opening_label(line).is_some() && !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
            current.push(line);
        }
        if !current.is_empty() {
            blocks.push(current.join("\n"));
        }
    }
    blocks
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

/// Text after the first colon, trimmed of whitespace and emphasis markers.
fn value_after_colon(block: &str) -> Option<String> {
    block.split_once(':').map(|(_, rest)| clean(rest))
}

fn clean(s: &str) -> String {
    s.trim().trim_matches('*').trim().to_string()
}

/// Field a block belongs to, or None.
fn classify(block: &str) -> Option<Field> {
    let first_line = block.lines().next().unwrap_or_default();
    if let Some(label) = opening_label(first_line)
        && let Some(field) = Field::ALL.iter().find(|f| f.labels().contains(&label))
    {
        return Some(*field);
    }
    if !block.contains(':') {
        return None;
    }
    let lower = block.to_lowercase();
    Field::ALL
        .iter()
        .copied()
        .find(|f| f.labels().iter().any(|label| lower.contains(label)))
}

fn is_header(block: &str) -> bool {
    bare(block).to_lowercase().starts_with(HEADER_LABEL)
}

/// Assign `block` to a field of `draft`. Returns false if nothing matched.
fn assign(draft: &mut HypothesisDraft, block: &str) -> bool {
    match (classify(block), value_after_colon(block)) {
        (Some(field), Some(value)) => {
            *field.slot(draft) = value;
            true
        }
        _ => false,
    }
}

/// Parse a single hypothesis (Evolution responses).
pub fn parse_draft(text: &str) -> HypothesisDraft {
    let mut draft = HypothesisDraft::default();
    for block in split_blocks(text) {
        if is_header(&block)
            && draft.statement.is_empty()
            && let Some(value) = value_after_colon(&block).filter(|v| !v.is_empty())
        {
            draft.statement = value;
            continue;
        }
        assign(&mut draft, &block);
    }
    draft
}

/// Parse up to `max` hypotheses from a Generation response.
///
/// A block opening with "Hypothesis" starts a new draft; its text after the
/// colon (or the whole block, without a colon) is the statement unless a
/// later `Statement:` block overrides it. Blocks before the first header are
/// ignored. Drafts without a statement are dropped.
pub fn parse_drafts(text: &str, max: usize) -> Vec<HypothesisDraft> {
    let mut drafts: Vec<HypothesisDraft> = Vec::new();
    for block in split_blocks(text) {
        if is_header(&block) {
            let statement = match value_after_colon(&block) {
                Some(value) if !value.is_empty() => value,
                Some(_) => String::new(),
                None => clean(&block),
            };
            drafts.push(HypothesisDraft {
                statement,
                ..Default::default()
            });
        } else if let Some(current) = drafts.last_mut() {
            assign(current, &block);
        }
    }
    drafts.retain(|d| !d.statement.is_empty());
    drafts.truncate(max);
    drafts
}
