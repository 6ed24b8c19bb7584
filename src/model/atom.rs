//! Atom feed wrapper used by search and match results.

use super::common::impl_linked;
use super::document::Gedcomx;
use super::Entity;
use crate::link::{Linked, Links};
use crate::protocol::constants::media_types;
use serde::{Deserialize, Serialize};

/// A page of Atom entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Feed identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Feed title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Total number of results across all pages
    #[serde(rename = "results", default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    /// Offset of the first entry of this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Entries of this page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
    /// Hypermedia links (paging, search templates)
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// One search or match result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier of the matched resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Relevance score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Match confidence (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Embedded document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EntryContent>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Entry {
    /// The embedded GEDCOM X document, if any.
    pub fn gedcomx(&self) -> Option<&Gedcomx> {
        self.content.as_ref().and_then(|c| c.gedcomx.as_ref())
    }
}

/// Content of an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryContent {
    /// The GEDCOM X document for the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gedcomx: Option<Gedcomx>,
}

impl_linked!(Feed, Entry);

impl Entity for Feed {
    const MEDIA_TYPE: &'static str = media_types::ATOM_GEDCOMX_JSON;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_from_json() {
        let feed: Feed = serde_json::from_str(
            r#"{
                "results": 42,
                "index": 0,
                "entries": [{"id": "P1", "score": 0.9, "content": {"gedcomx": {"persons": [{"id": "P1"}]}}}],
                "links": {"next": {"href": "https://example.com/search?start=1"}}
            }"#,
        )
        .unwrap();

        assert_eq!(feed.total_results, Some(42));
        assert_eq!(feed.entries[0].gedcomx().unwrap().persons[0].id.as_deref(), Some("P1"));
        assert!(feed.links().contains("next"));
    }
}
