//! Shared header parsing for GEDCOM X responses.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Warning | `code agent "text" ["date"]`, comma-separated | `299 FamilySearch "Deprecated"` |
//! | ETag | Quoted entity tag, optional weak prefix | `W/"123-gzip"` |
//!
//! # Examples
//!
//! ```
//! use gedcomx_client::protocol::{normalize_etag, parse_warning_header};
//!
//! let warnings = parse_warning_header(r#"299 FamilySearch "Deprecated Resource""#);
//! assert_eq!(warnings[0].code, 299);
//!
//! assert_eq!(normalize_etag(r#""1234-gzip""#), r#""1234""#);
//! ```
//!
//! [RFC 7234 Section 5.5]: https://datatracker.ietf.org/doc/html/rfc7234#section-5.5

use crate::protocol::constants::GZIP_ETAG_SUFFIX;
use regex::Regex;
use std::sync::LazyLock;

static WARNING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d{3})\s+(\S+)\s+"((?:[^"\\]|\\.)*)"(?:\s+"([^"]*)")?"#)
        .unwrap_or_else(|_| unreachable!("static warning pattern"))
});

/// A single entry of a `Warning` response header ([RFC 7234 Section 5.5]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderWarning {
    /// Three digit warn-code
    pub code: u16,
    /// warn-agent, usually the application name
    pub application: String,
    /// warn-text with escapes removed
    pub message: String,
    /// Optional warn-date, kept verbatim
    pub date: Option<String>,
}

/// Parse a `Warning` header value into structured warnings.
///
/// Malformed entries are skipped, so the result may be empty.
///
/// # Examples
///
/// ```
/// use gedcomx_client::protocol::parse_warning_header;
///
/// let value = r#"299 FamilySearch "First", 199 - "Second" "Sat, 01 Jan 2000 00:00:00 GMT""#;
/// let warnings = parse_warning_header(value);
/// assert_eq!(warnings.len(), 2);
/// assert_eq!(warnings[1].application, "-");
/// assert!(warnings[1].date.is_some());
/// ```
pub fn parse_warning_header(value: &str) -> Vec<HeaderWarning> {
    WARNING_PATTERN
        .captures_iter(value)
        .filter_map(|caps| {
            let code = caps.get(1)?.as_str().parse().ok()?;
            Some(HeaderWarning {
                code,
                application: caps.get(2)?.as_str().to_string(),
                message: caps.get(3)?.as_str().replace("\\\"", "\""),
                date: caps.get(4).map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}

/// Strip the `-gzip` suffix that compressing proxies add to entity tags.
///
/// Handles quoted, weak and bare tags. Other tags are returned unchanged.
pub fn normalize_etag(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(inner) = trimmed.strip_suffix('"') {
        if let Some(stripped) = inner.strip_suffix(GZIP_ETAG_SUFFIX) {
            return format!("{}\"", stripped);
        }
        return trimmed.to_string();
    }
    trimmed
        .strip_suffix(GZIP_ETAG_SUFFIX)
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_warning() {
        let warnings = parse_warning_header(r#"299 FamilySearch "Deprecated Resource""#);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, 299);
        assert_eq!(warnings[0].application, "FamilySearch");
        assert_eq!(warnings[0].message, "Deprecated Resource");
        assert_eq!(warnings[0].date, None);
    }

    #[test]
    fn test_parse_warning_with_escaped_quote() {
        let warnings = parse_warning_header(r#"199 agent "say \"hi\"""#);
        assert_eq!(warnings[0].message, "say \"hi\"");
    }

    #[test]
    fn test_parse_warning_garbage() {
        assert!(parse_warning_header("not a warning").is_empty());
        assert!(parse_warning_header("").is_empty());
    }

    #[test]
    fn test_normalize_quoted_etag() {
        assert_eq!(normalize_etag(r#""abc-gzip""#), r#""abc""#);
    }

    #[test]
    fn test_normalize_weak_etag() {
        assert_eq!(normalize_etag(r#"W/"abc-gzip""#), r#"W/"abc""#);
    }

    #[test]
    fn test_normalize_bare_etag() {
        assert_eq!(normalize_etag("abc-gzip"), "abc");
        assert_eq!(normalize_etag("abc"), "abc");
    }

    #[test]
    fn test_normalize_untouched_etag() {
        assert_eq!(normalize_etag(r#""12345""#), r#""12345""#);
    }
}
