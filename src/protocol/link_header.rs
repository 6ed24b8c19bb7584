//! RFC 5988 `Link` header parsing.
//!
//! A header value holds one or more comma-separated entries:
//!
//! ```text
//! <https://example.com/persons/P1/ancestry>; rel="ancestry",
//! <>; rel="person"; template="https://example.com/persons/{pid}{?access_token}"
//! ```
//!
//! Targets are resolved against the URI of the response that carried the
//! header. The link-extension parameters `template`, `type`, `accept`,
//! `allow`, `hreflang` and `title` are copied onto the resulting [`Link`].
//! A broken entry is dropped on its own; the entries around it still parse.
//!
//! [RFC 5988]: https://datatracker.ietf.org/doc/html/rfc5988

use crate::error::{GedcomxError, Result};
use crate::link::Link;
use std::iter::Peekable;
use std::str::Chars;
use url::Url;

/// Parse one `Link` header value.
///
/// Produces one [`Link`] per relation token, so `rel="next last"` yields two
/// links sharing a target. Entries without a `rel` parameter are dropped.
///
/// A malformed entry (no `<target>`, an unclosed target, or a target that
/// cannot be resolved against `base`) is skipped up to the next top-level
/// comma and parsing continues with the following entry.
///
/// # Examples
///
/// ```
/// use gedcomx_client::protocol::parse_link_header;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/persons/P1").unwrap();
/// let links = parse_link_header(r#"</persons/P1/ancestry>; rel="ancestry""#, &base);
/// assert_eq!(links[0].rel, "ancestry");
/// assert_eq!(links[0].href.as_deref(), Some("https://example.com/persons/P1/ancestry"));
/// ```
pub fn parse_link_header(value: &str, base: &Url) -> Vec<Link> {
    let mut cursor = Cursor::new(value);
    let mut links = Vec::new();

    loop {
        cursor.skip_whitespace();
        if cursor.is_done() {
            break;
        }
        if cursor.eat(',') {
            continue;
        }
        match parse_entry(&mut cursor, base) {
            Ok(entry) => links.extend(entry),
            Err(e) => {
                tracing::warn!("Skipping Link entry: {}", e);
                cursor.skip_entry();
            }
        }
    }

    links
}

/// One `<target>; params` entry. Yields nothing when `rel` is missing.
fn parse_entry(cursor: &mut Cursor<'_>, base: &Url) -> Result<Vec<Link>> {
    if !cursor.eat('<') {
        return Err(GedcomxError::InvalidHeader(
            "Link entry must start with '<'".to_string(),
        ));
    }
    let target = cursor.take_while(|c| c != '>');
    if !cursor.eat('>') {
        return Err(GedcomxError::InvalidHeader(format!(
            "Unterminated Link target: <{}",
            target
        )));
    }

    let params = cursor.parameters();
    // anything left before the next entry is junk
    cursor.take_while(|c| c != ',');

    let Some(rel) = param(&params, "rel") else {
        return Ok(Vec::new());
    };
    let href = match target.trim() {
        "" => None,
        t => Some(base.join(t)?.to_string()),
    };

    Ok(rel
        .split_whitespace()
        .map(|relation| Link {
            rel: relation.to_string(),
            href: href.clone(),
            template: param(&params, "template").map(str::to_string),
            title: param(&params, "title").map(str::to_string),
            media_type: param(&params, "type").map(str::to_string),
            accept: param(&params, "accept").map(str::to_string),
            allow: param(&params, "allow").map(str::to_string),
            hreflang: param(&params, "hreflang").map(str::to_string),
        })
        .collect())
}

/// First value of a parameter; later duplicates are ignored.
fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(value: &'a str) -> Self {
        Cursor {
            chars: value.chars().peekable(),
        }
    }

    fn is_done(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if !keep(c) {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        out
    }

    /// Drop the rest of a bad entry, up to the next comma outside quotes.
    fn skip_entry(&mut self) {
        while let Some(&c) = self.chars.peek() {
            match c {
                ',' => break,
                '"' => {
                    self.chars.next();
                    self.quoted();
                }
                _ => {
                    self.chars.next();
                }
            }
        }
    }

    /// Quoted string body; the opening quote has been consumed.
    fn quoted(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.chars.next() {
                        out.push(escaped);
                    }
                }
                other => out.push(other),
            }
        }
        out
    }

    /// `; name=value` pairs up to the next top-level comma.
    fn parameters(&mut self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        loop {
            self.skip_whitespace();
            if !self.eat(';') {
                break;
            }
            self.skip_whitespace();
            let name = self
                .take_while(|c| !matches!(c, '=' | ';' | ',') && !c.is_whitespace())
                .to_ascii_lowercase();
            self.skip_whitespace();
            let value = if self.eat('=') {
                self.skip_whitespace();
                if self.eat('"') {
                    self.quoted()
                } else {
                    self.take_while(|c| !matches!(c, ';' | ','))
                        .trim()
                        .to_string()
                }
            } else {
                String::new()
            };
            if !name.is_empty() {
                params.push((name, value));
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/platform/tree/persons/P1").unwrap()
    }

    #[test]
    fn test_parse_absolute_target() {
        let links =
            parse_link_header(r#"<https://other.org/x>; rel="collection""#, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href.as_deref(), Some("https://other.org/x"));
    }

    #[test]
    fn test_parse_multiple_entries() {
        let value = r#"</a>; rel="ancestry", <descendancy>; rel="descendancy"; title="Desc""#;
        let links = parse_link_header(value, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href.as_deref(), Some("https://example.com/a"));
        assert_eq!(
            links[1].href.as_deref(),
            Some("https://example.com/platform/tree/persons/descendancy")
        );
        assert_eq!(links[1].title.as_deref(), Some("Desc"));
    }

    #[test]
    fn test_parse_template_with_commas() {
        let value = r#"<>; rel="person-search"; template="https://example.com/search{?q,start,count}"; type="application/x-gedcomx-atom+json""#;
        let links = parse_link_header(value, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, None);
        assert_eq!(
            links[0].template.as_deref(),
            Some("https://example.com/search{?q,start,count}")
        );
        assert_eq!(
            links[0].media_type.as_deref(),
            Some("application/x-gedcomx-atom+json")
        );
    }

    #[test]
    fn test_parse_extension_params() {
        let value = r#"</persons>; rel=persons; accept="application/x-gedcomx-v1+json"; allow="GET,POST"; hreflang=en"#;
        let links = parse_link_header(value, &base());
        assert_eq!(links[0].rel, "persons");
        assert_eq!(links[0].allow.as_deref(), Some("GET,POST"));
        assert_eq!(links[0].hreflang.as_deref(), Some("en"));
        assert_eq!(
            links[0].accept.as_deref(),
            Some("application/x-gedcomx-v1+json")
        );
    }

    #[test]
    fn test_multiple_relation_tokens() {
        let links = parse_link_header(r#"</page/9>; rel="next last""#, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel, "next");
        assert_eq!(links[1].rel, "last");
        assert_eq!(links[0].href, links[1].href);
    }

    #[test]
    fn test_entry_without_rel_is_dropped() {
        let links = parse_link_header(r#"</x>; title="none", </y>; rel="self""#, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "self");
    }

    #[test]
    fn test_malformed_entry() {
        assert!(parse_link_header(r#"https://x; rel="self""#, &base()).is_empty());
        assert!(parse_link_header(r#"<https://x; rel="self""#, &base()).is_empty());
    }

    #[test]
    fn test_malformed_entry_keeps_neighbours() {
        let value = r#"</ancestry>; rel="ancestry", broken; rel="x", </notes>; rel="notes""#;
        let links = parse_link_header(value, &base());
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["ancestry", "notes"]);
    }

    #[test]
    fn test_unclosed_trailing_target_keeps_earlier_entries() {
        let value = r#"</a>; rel="a", <https://x/b; rel="b""#;
        let links = parse_link_header(value, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn test_unresolvable_target_skipped() {
        let value = r#"<http://[::1>; rel="a", </b>; rel="b""#;
        let links = parse_link_header(value, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "b");
    }

    #[test]
    fn test_skipped_entry_with_quoted_comma() {
        let value = r#"junk; title="a, b", </c>; rel="c""#;
        let links = parse_link_header(value, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "c");
    }
}
