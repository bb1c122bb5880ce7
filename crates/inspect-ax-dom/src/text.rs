//! Text normalization.

/// Collapse whitespace runs to single spaces, trim, and keep at most
/// `max_chars` characters.
pub fn normalize_text(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => collapsed[..cut].to_string(),
        None => collapsed,
    }
}
