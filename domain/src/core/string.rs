//! String utilities for the domain layer.
//!
//! Lengths here are counted in characters, not bytes, so prompt excerpts
//! never split a multi-byte character.

/// Return the first `max_chars` characters of `s` as a sub-slice.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate to at most `max_len` characters, ending in `...` when shortened.
///
/// The ellipsis counts towards the limit: the kept prefix is `max_len - 3`
/// characters long.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", take_chars(s, max_len.saturating_sub(3)))
    }
}

/// Keep the first `max_chars` characters and append `...` when anything was cut.
///
/// Unlike [`truncate`], the ellipsis is added on top of the kept prefix.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let head = take_chars(s, max_chars);
    if head.len() < s.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}
