//! String helpers shared by the overview and lineup parsers.
//!
//! - Whitespace normalization for text pulled out of anchors and headings
//! - Repair of names the source prints twice (visible + hidden copy)
//! - Truncation of long strings before they are put into log fields

/// Trim a string and collapse every internal whitespace run, including
/// newlines and tabs, into a single space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  FC\n\tMuster "), "FC Muster");
/// ```
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Undo the doubled-name artifact found on overview pages.
///
/// Some team anchors contain the name twice (once visible, once hidden), e.g.
/// `"FC Muster FC Muster"`. The string is split at its character midpoint; if
/// both halves are equal after trimming, only the first half is kept.
/// Anything else is returned unchanged.
pub fn collapse_doubled_name(name: &str) -> String {
    let trimmed = name.trim();
    let mid = trimmed.chars().count() / 2;
    let split = trimmed
        .char_indices()
        .nth(mid)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let (first, second) = trimmed.split_at(split);
    let first = first.trim();

    if !first.is_empty() && first == second.trim() {
        first.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (on a character boundary) with an
/// ellipsis and byte count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
