//! Text helpers for log output.

/// Characters of a response body echoed to the log by default.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Prefix of `text` holding at most `max_chars` characters.
///
/// Cuts on a char boundary so multi-byte bodies never panic.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
