//! Text normalization helpers shared by the report and the exporters.

/// Replace every newline with a space and trim surrounding whitespace.
///
/// Runs of spaces left behind by indented feed text are kept as they are.
pub fn collapse_newlines(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

/// Return the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Left-align `label` in a column `width` characters wide.
pub fn pad_label(label: &str, width: usize) -> String {
    format!("{:<width$}", label, width = width)
}
