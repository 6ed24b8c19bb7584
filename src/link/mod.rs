//! Hypermedia links.
//!
//! A [`Link`] names a transition by relation and points at a target, either a
//! concrete `href` or a URI `template`. [`Links`] is an ordered collection in
//! which lookup by relation is first-match-wins.
//!
//! In GEDCOM X JSON, links are written as an object keyed by relation:
//!
//! ```json
//! { "links": { "self": { "href": "https://example.com/persons/P1" } } }
//! ```
//!
//! # Examples
//!
//! ```
//! use gedcomx_client::link::{rel, Link, Links};
//!
//! let mut links = Links::new();
//! links.push(Link::new(rel::SELF, "https://example.com/a"));
//! links.push(Link::new(rel::SELF, "https://example.com/b"));
//! assert_eq!(links.get(rel::SELF).unwrap().href.as_deref(), Some("https://example.com/a"));
//! assert!(links.get(rel::ANCESTRY).is_none());
//! ```

pub mod rel;
mod extract;

pub use extract::extract_links;

use crate::error::Result;
use crate::protocol::expand_template;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// A hypermedia link.
///
/// A link is actionable when it carries an `href` or a `template`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name, the lookup key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rel: String,
    /// Target URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// RFC 6570 URI template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Human readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Media type of the target
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Media types accepted by the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    /// HTTP methods allowed on the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<String>,
    /// Language of the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl Link {
    /// Link with a concrete target.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Link with a URI template target.
    pub fn templated(rel: impl Into<String>, template: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            template: Some(template.into()),
            ..Default::default()
        }
    }

    /// Whether the link can be followed at all.
    #[inline]
    pub fn is_actionable(&self) -> bool {
        self.href.is_some() || self.template.is_some()
    }

    /// The `href` resolved against `base`; `None` when the link only has a template.
    pub fn resolve(&self, base: &Url) -> Result<Option<Url>> {
        match &self.href {
            Some(href) => Ok(Some(base.join(href)?)),
            None => Ok(None),
        }
    }

    /// The `href` if present, otherwise the template expanded with `vars`,
    /// resolved against `base`.
    pub fn expand(&self, base: &Url, vars: &[(&str, &str)]) -> Result<Option<Url>> {
        if let Some(href) = &self.href {
            return Ok(Some(base.join(href)?));
        }
        match &self.template {
            Some(template) => Ok(Some(base.join(&expand_template(template, vars))?)),
            None => Ok(None),
        }
    }
}

/// Ordered link collection; lookup by relation returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    /// Empty collection.
    pub fn new() -> Self {
        Links(Vec::new())
    }

    /// First link with the given relation.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.rel == rel)
    }

    /// All links with the given relation, in order.
    pub fn get_all<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.0.iter().filter(move |link| link.rel == rel)
    }

    /// Whether any link carries this relation.
    #[inline]
    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    /// Append a link, keeping any existing link with the same relation first.
    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    /// Append links of another collection whose relation is not yet present.
    pub fn merge(&mut self, other: &Links) {
        for link in &other.0 {
            if !self.contains(&link.rel) {
                self.0.push(link.clone());
            }
        }
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    /// Number of links.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<Link> for Links {
    fn extend<I: IntoIterator<Item = Link>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Links(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.0.len());
        let mut map = serializer.serialize_map(None)?;
        for link in &self.0 {
            // a JSON object cannot hold a relation twice
            if seen.contains(&link.rel.as_str()) {
                continue;
            }
            seen.push(&link.rel);
            let body = Link {
                rel: String::new(),
                ..link.clone()
            };
            map.serialize_entry(&link.rel, &body)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(LinksVisitor)
    }
}

struct LinksVisitor;

impl<'de> Visitor<'de> for LinksVisitor {
    type Value = Links;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of relation to link, or a list of links")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Links, A::Error> {
        let mut links = Vec::new();
        while let Some((rel, mut link)) = access.next_entry::<String, Link>()? {
            link.rel = rel;
            links.push(link);
        }
        Ok(Links(links))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> std::result::Result<Links, A::Error> {
        let mut links = Vec::new();
        while let Some(link) = access.next_element::<Link>()? {
            links.push(link);
        }
        Ok(Links(links))
    }

    fn visit_unit<E>(self) -> std::result::Result<Links, E> {
        Ok(Links::new())
    }
}

/// Anything that carries its own link collection.
pub trait Linked {
    /// The declared links.
    fn links(&self) -> &Links;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let links: Links = vec![
            Link::new(rel::PERSON, "https://x/1"),
            Link::new(rel::PERSON, "https://x/2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(links.get(rel::PERSON).unwrap().href.as_deref(), Some("https://x/1"));
        assert_eq!(links.get_all(rel::PERSON).count(), 2);
    }

    #[test]
    fn test_missing_relation_is_stable() {
        let links = Links::new();
        for _ in 0..3 {
            assert!(links.get(rel::ANCESTRY).is_none());
        }
    }

    #[test]
    fn test_deserialize_map_form_keeps_order() {
        let json = r#"{"zeta": {"href": "/z"}, "alpha": {"template": "/a/{id}", "type": "text/plain"}}"#;
        let links: Links = serde_json::from_str(json).unwrap();
        assert_eq!(links.len(), 2);
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["zeta", "alpha"]);
        assert_eq!(links.get("alpha").unwrap().media_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_deserialize_array_form() {
        let json = r#"[{"rel": "self", "href": "/s"}]"#;
        let links: Links = serde_json::from_str(json).unwrap();
        assert_eq!(links.get(rel::SELF).unwrap().href.as_deref(), Some("/s"));
    }

    #[test]
    fn test_serialize_map_form() {
        let links: Links = vec![
            Link::new(rel::SELF, "/s"),
            Link::new(rel::SELF, "/ignored"),
        ]
        .into_iter()
        .collect();
        let value = serde_json::to_value(&links).unwrap();
        assert_eq!(value, serde_json::json!({"self": {"href": "/s"}}));
    }

    #[test]
    fn test_merge_skips_known_relations() {
        let mut links: Links = vec![Link::new(rel::SELF, "/a")].into_iter().collect();
        let other: Links = vec![Link::new(rel::SELF, "/b"), Link::new(rel::NOTES, "/n")]
            .into_iter()
            .collect();
        links.merge(&other);
        assert_eq!(links.len(), 2);
        assert_eq!(links.get(rel::SELF).unwrap().href.as_deref(), Some("/a"));
    }

    #[test]
    fn test_expand_prefers_href() {
        let base = Url::parse("https://example.com/platform/").unwrap();
        let link = Link {
            rel: rel::PERSON.into(),
            href: Some("persons/P1".into()),
            template: Some("persons/{pid}".into()),
            ..Default::default()
        };
        let url = link.expand(&base, &[("pid", "P2")]).unwrap().unwrap();
        assert_eq!(url.as_str(), "https://example.com/platform/persons/P1");

        let templated = Link::templated(rel::PERSON, "persons/{pid}");
        let url = templated.expand(&base, &[("pid", "P2")]).unwrap().unwrap();
        assert_eq!(url.as_str(), "https://example.com/platform/persons/P2");
        assert!(templated.resolve(&base).unwrap().is_none());
    }
}
