//! Types shared across GEDCOM X resources.

use super::Embed;
use crate::link::{Linked, Links};
use serde::{Deserialize, Serialize};

/// Who changed a resource, when and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    /// Agent that contributed the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<ResourceReference>,
    /// Milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
    /// Reason given for the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,
}

impl Attribution {
    /// Attribution carrying only a change message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Attribution {
            change_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// A pointer to another resource, by URI and optionally by local id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    /// URI of the referenced resource; `#id` for in-document references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Local id of the referenced resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl ResourceReference {
    /// Reference to `resource`.
    pub fn new(resource: impl Into<String>) -> Self {
        ResourceReference {
            resource: Some(resource.into()),
            resource_id: None,
        }
    }
}

/// A language tagged string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    /// Language of the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// The text
    pub value: String,
}

impl TextValue {
    /// Untagged text.
    pub fn new(value: impl Into<String>) -> Self {
        TextValue {
            lang: None,
            value: value.into(),
        }
    }
}

/// A note attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Body of the note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Note {
    /// Note with a subject and text.
    pub fn new(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Note {
            subject: Some(subject.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Reference from a resource to a source description (also used for media).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URI of the source description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local id of the source description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_id: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl SourceReference {
    /// Reference to the source description at `description`.
    pub fn new(description: impl Into<String>) -> Self {
        SourceReference {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Reference from a conclusion to a subject it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceReference {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URI of the evidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl EvidenceReference {
    /// Reference to the evidence at `resource`.
    pub fn new(resource: impl Into<String>) -> Self {
        EvidenceReference {
            resource: Some(resource.into()),
            ..Default::default()
        }
    }
}

/// Reference from a person to a discussion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscussionReference {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URI of the discussion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl DiscussionReference {
    /// Reference to the discussion at `resource`.
    pub fn new(resource: impl Into<String>) -> Self {
        DiscussionReference {
            resource: Some(resource.into()),
            ..Default::default()
        }
    }
}

/// Server computed summary of a person, used by trees and search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DisplayProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
    /// Position in an ancestry (pedigree) listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascendancy_number: Option<String>,
    /// Position in a descendancy listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descendancy_number: Option<String>,
}

macro_rules! impl_linked {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Linked for $ty {
                fn links(&self) -> &Links {
                    &self.links
                }
            }
        )*
    };
}
pub(crate) use impl_linked;

impl_linked!(Note, SourceReference, EvidenceReference, DiscussionReference);

macro_rules! impl_embed_links_only {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Embed for $ty {
                fn embed(&mut self, other: Self) {
                    self.links.merge(&other.links);
                }
            }
        )*
    };
}

impl_embed_links_only!(Note, SourceReference, EvidenceReference, DiscussionReference);
