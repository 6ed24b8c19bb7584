//! Link extraction from a response and its parsed entity.
//!
//! The link set of a state is the union of four sources, appended in order:
//!
//! 1. `Location` header, as a `self` link
//! 2. every `Link` header entry
//! 3. links of the main data element (e.g. the person a person state wraps)
//! 4. links of the document root, when it is not the main data element
//!
//! Duplicate relations are kept. Lookup is first-match, so the order above
//! decides which target wins.

use super::{rel, Link, Links};
use crate::client::ApiResponse;
use crate::protocol::parse_link_header;
use http::header::{LINK, LOCATION};

/// Build the link set visible at a state.
///
/// `main` and `document` are the link collections of the main data element and
/// of the root entity. When both refer to the same collection it is only
/// appended once.
///
/// Malformed `Link` header entries are skipped with a warning; the valid
/// entries of the same value are kept.
pub fn extract_links(response: &ApiResponse, main: Option<&Links>, document: Option<&Links>) -> Links {
    let mut links = Links::new();
    let base = response.url();

    if let Some(location) = response.headers().get(LOCATION) {
        match location.to_str().map(|value| base.join(value.trim())) {
            Ok(Ok(target)) => links.push(Link::new(rel::SELF, target.to_string())),
            _ => tracing::warn!("Ignoring unusable Location header at {}", base),
        }
    }

    for value in response.headers().get_all(LINK) {
        let Ok(value) = value.to_str() else {
            tracing::warn!("Ignoring non-ASCII Link header at {}", base);
            continue;
        };
        links.extend(parse_link_header(value, base));
    }

    if let Some(main) = main {
        links.extend(main.iter().cloned());
    }

    if let Some(document) = document {
        let same = main.is_some_and(|main| std::ptr::eq(main, document));
        if !same {
            links.extend(document.iter().cloned());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use url::Url;

    fn response() -> ApiResponse {
        ApiResponse::new(
            StatusCode::CREATED,
            Url::parse("https://example.com/platform/tree/persons").unwrap(),
        )
    }

    fn links(pairs: &[(&str, &str)]) -> Links {
        pairs.iter().map(|(r, h)| Link::new(*r, *h)).collect()
    }

    #[test]
    fn test_merge_order() {
        let response = response()
            .with_header("Location", "https://example.com/persons/ABCD-EFG")
            .with_header("Link", r#"<https://example.com/other>; rel="self""#)
            .with_header("Link", r#"</ancestry>; rel="ancestry""#);
        let main = links(&[("person", "https://example.com/persons/ABCD-EFG"), ("self", "https://main")]);
        let document = links(&[("collection", "https://example.com/tree")]);

        let merged = extract_links(&response, Some(&main), Some(&document));
        let rels: Vec<&str> = merged.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "self", "ancestry", "person", "self", "collection"]);
        assert_eq!(
            merged.get(rel::SELF).unwrap().href.as_deref(),
            Some("https://example.com/persons/ABCD-EFG")
        );
        assert_eq!(
            merged.get(rel::ANCESTRY).unwrap().href.as_deref(),
            Some("https://example.com/ancestry")
        );
    }

    #[test]
    fn test_document_is_main_element() {
        let document = links(&[("collection", "https://example.com/tree")]);
        let merged = extract_links(&response(), Some(&document), Some(&document));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_relative_location() {
        let response = response().with_header("Location", "persons/P1");
        let merged = extract_links(&response, None, None);
        assert_eq!(
            merged.get(rel::SELF).unwrap().href.as_deref(),
            Some("https://example.com/platform/tree/persons/P1")
        );
    }

    #[test]
    fn test_malformed_link_header_skipped() {
        let response = response()
            .with_header("Link", "garbage")
            .with_header("Link", r#"</notes>; rel="notes""#);
        let merged = extract_links(&response, None, None);
        assert_eq!(merged.len(), 1);
        assert!(merged.contains(rel::NOTES));
    }

    #[test]
    fn test_malformed_entry_keeps_valid_entries() {
        let response = response().with_header(
            "Link",
            r#"</ancestry>; rel="ancestry", broken; rel="x", </notes>; rel="notes""#,
        );
        let merged = extract_links(&response, None, None);
        assert!(merged.contains(rel::ANCESTRY));
        assert!(merged.contains(rel::NOTES));
        assert!(!merged.contains("x"));
    }

    #[test]
    fn test_no_sources() {
        assert!(extract_links(&response(), None, None).is_empty());
    }
}
