//! Recovery of the delimited-text payload from a raw response body.
//!
//! The API sometimes returns its CSV as a single string-encoded value: the
//! whole body wrapped in double quotes with newlines written as the two
//! characters `\` `n`. Such a body can never contain a real newline, which
//! is what separates it from clean CSV whose first and last fields happen
//! to be quoted.
//!
//! Unescaping only ever happens on wrapped bodies. Clean text passes through
//! untouched, so literal `\n` inside a clean CSV cell survives and running
//! the step twice changes nothing.

use crate::error::{ParseError, ParseResult};
use rp_core::{preview, DEFAULT_PREVIEW_CHARS};
use std::borrow::Cow;
use tracing::debug;


/// Payload text ready for tabular parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<'a> {
    /// Delimited text.
    pub text: Cow<'a, str>,
    /// Whether an outer quote layer was removed.
    pub was_wrapped: bool,
}

/// Undo the optional outer quoting of a response body.
///
/// # Errors
/// Returns `ParseError::EmptyResponse` if the body is empty or whitespace.
pub fn unwrap_payload(raw: &str) -> ParseResult<Payload<'_>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    debug!(
        preview = %preview(trimmed, DEFAULT_PREVIEW_CHARS),
        "Payload before unwrapping"
    );

    if !is_wrapped(trimmed) {
        return Ok(Payload {
            text: Cow::Borrowed(trimmed),
            was_wrapped: false,
        });
    }

    let text = match serde_json::from_str::<String>(trimmed) {
        Ok(decoded) => decoded,
        Err(e) => {
            // Not a valid JSON string literal (e.g. a stray backslash).
            // Strip the quote layer and restore newlines only.
            debug!(error = %e, "Wrapped payload is not a JSON string, stripping quotes");
            trimmed[1..trimmed.len() - 1].replace("\\n", "\n")
        }
    };

    debug!(
        preview = %preview(&text, DEFAULT_PREVIEW_CHARS),
        "Payload after unwrapping"
    );

    Ok(Payload {
        text: Cow::Owned(text),
        was_wrapped: true,
    })
}

/// Check for a single string-encoded body: `"..."` with no real newline.
fn is_wrapped(trimmed: &str) -> bool {
    trimmed.len() >= 2
        && trimmed.starts_with('"')
        && trimmed.ends_with('"')
        && !trimmed.contains('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        for raw in ["", "   ", "\n\t  \r\n"] {
            assert!(matches!(
                unwrap_payload(raw),
                Err(ParseError::EmptyResponse)
            ));
        }
    }

    #[test]
    fn test_clean_csv_passes_through() {
        let raw = "Date,Price\n2020-01-01,1.0\n";
        let payload = unwrap_payload(raw).unwrap();
        assert!(!payload.was_wrapped);
        assert_eq!(payload.text, "Date,Price\n2020-01-01,1.0");
        assert!(matches!(payload.text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrapped_body_is_unescaped() {
        let raw = "\",Date,Price,realized_price\\n0,2020-01-01,7000.0,6500.0\"";
        let payload = unwrap_payload(raw).unwrap();
        assert!(payload.was_wrapped);
        assert_eq!(
            payload.text,
            ",Date,Price,realized_price\n0,2020-01-01,7000.0,6500.0"
        );
    }

    #[test]
    fn test_wrapped_body_with_escaped_quotes() {
        let raw = r#""Date,Note\n2020-01-01,\"a,b\"""#;
        let payload = unwrap_payload(raw).unwrap();
        assert_eq!(payload.text, "Date,Note\n2020-01-01,\"a,b\"");
    }

    #[test]
    fn test_wrapped_body_with_invalid_escape_falls_back() {
        // `\q` is not a JSON escape, so only the quote layer and `\n` change.
        let raw = r#""Date,Note\n2020-01-01,a\qb""#;
        let payload = unwrap_payload(raw).unwrap();
        assert!(payload.was_wrapped);
        assert_eq!(payload.text, "Date,Note\n2020-01-01,a\\qb");
    }

    #[test]
    fn test_clean_csv_with_quoted_edges_not_unwrapped() {
        let raw = "\"Date\",\"Note\"\n\"2020-01-01\",\"x\\ny\"";
        let payload = unwrap_payload(raw).unwrap();
        assert!(!payload.was_wrapped);
        assert_eq!(payload.text, raw);
    }

    #[test]
    fn test_literal_backslash_n_in_clean_csv_preserved() {
        let raw = "Date,Note\n2020-01-01,path\\nvalue\n";
        let payload = unwrap_payload(raw).unwrap();
        assert!(payload.text.contains("path\\nvalue"));
    }

    #[test]
    fn test_escaped_backslash_n_in_wrapped_body_preserved() {
        // `\\n` inside the string literal is a backslash followed by `n`.
        let raw = r#""Date,Note\n2020-01-01,a\\nb""#;
        let payload = unwrap_payload(raw).unwrap();
        assert!(payload.was_wrapped);
        assert_eq!(payload.text, "Date,Note\n2020-01-01,a\\nb");
        assert_eq!(payload.text.lines().count(), 2);
    }

    #[test]
    fn test_unwrap_is_idempotent() {
        let raw = "\"Date,Price,realized_price\\n2020-01-01,7000.0,6500.0\\n2020-01-02,7100.0,6600.0\"";
        let once = unwrap_payload(raw).unwrap();
        let twice = unwrap_payload(&once.text).unwrap();
        assert!(!twice.was_wrapped);
        assert_eq!(once.text, twice.text);
        assert_eq!(twice.text.lines().count(), 3);
    }

    #[test]
    fn test_single_quote_char_is_not_wrapped() {
        let payload = unwrap_payload("\"").unwrap();
        assert!(!payload.was_wrapped);
        assert_eq!(payload.text, "\"");
    }
}
