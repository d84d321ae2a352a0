//! Text normalization utilities for rendered output.

/// Collapse every whitespace run to one space and trim the ends.
///
/// # Examples
/// ```
/// use slovlex_retriever::render::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a\n\t b\u{a0}c "), "a b c");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` at `max_chars` characters.
///
/// # Returns
/// The (possibly shortened) text and whether anything was cut off.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => (&text[..offset], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a  b"), "a b");
        assert_eq!(normalize_whitespace("\n\n"), "");
        assert_eq!(normalize_whitespace("jeden\r\n  dva"), "jeden dva");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("účinnosť", 3), ("úči", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("abc", 10), ("abc", false));
        assert_eq!(truncate_chars("abc", 0), ("", true));
    }
}
