//! Source descriptions, agents, collections and places.

use super::common::{impl_linked, Attribution, Note, ResourceReference, SourceReference, TextValue};
use super::{embed_by_id, Embed};
use crate::link::{Linked, Links};
use serde::{Deserialize, Serialize};

/// A bibliographic citation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Language of the citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Citation text
    pub value: String,
}

/// Description of a source of genealogical information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescription {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URI of the described resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Resource type URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Titles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<TextValue>,
    /// Citations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<SourceCitation>,
    /// Agent that mediated access to the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediator: Option<ResourceReference>,
    /// Sources of this source
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
    /// Notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl SourceDescription {
    /// Source description with a title and a citation.
    pub fn new(title: impl Into<String>, citation: impl Into<String>) -> Self {
        SourceDescription {
            titles: vec![TextValue::new(title)],
            citations: vec![SourceCitation {
                lang: None,
                value: citation.into(),
            }],
            ..Default::default()
        }
    }
}

/// A person or organization: contributor, repository, submitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Names of the agent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<TextValue>,
    /// Home page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<ResourceReference>,
    /// `mailto:` references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ResourceReference>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// A collection of genealogical data, e.g. the family tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Number of items in the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// Description of a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDescription {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Names of the place, most specific first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<TextValue>,
    /// Place type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    /// The place being described
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<ResourceReference>,
    /// Enclosing jurisdiction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<ResourceReference>,
    /// Latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl_linked!(SourceDescription, Agent, Collection, PlaceDescription);

impl Embed for SourceDescription {
    fn embed(&mut self, other: Self) {
        embed_by_id(&mut self.sources, other.sources, |s| s.id.as_deref());
        embed_by_id(&mut self.notes, other.notes, |n| n.id.as_deref());
        self.links.merge(&other.links);
    }
}

impl Embed for Agent {
    fn embed(&mut self, other: Self) {
        self.links.merge(&other.links);
    }
}

impl Embed for Collection {
    fn embed(&mut self, other: Self) {
        self.links.merge(&other.links);
    }
}

impl Embed for PlaceDescription {
    fn embed(&mut self, other: Self) {
        self.links.merge(&other.links);
    }
}
