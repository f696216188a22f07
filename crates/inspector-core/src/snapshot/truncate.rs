//! Character-budget truncation.

/// Cut `text` to at most `limit` characters. Returns the kept prefix and
/// whether anything was dropped.
pub(crate) fn truncate(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}
