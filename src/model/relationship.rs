//! Relationships between persons.

use super::common::{impl_linked, Attribution, EvidenceReference, Note, ResourceReference, SourceReference};
use super::conclusion::Fact;
use super::{embed_by_id, Embed};
use crate::link::{Linked, Links};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A couple or parent-child relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Relationship type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    /// Identifiers keyed by identifier type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<String, Vec<String>>,
    /// First participant (the parent in a parent-child relationship)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person1: Option<ResourceReference>,
    /// Second participant (the child in a parent-child relationship)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person2: Option<ResourceReference>,
    /// Facts about the relationship
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
    /// Source references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
    /// Evidence references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceReference>,
    /// Media references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<SourceReference>,
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

impl Relationship {
    /// Relationship of `relationship_type` between two person URIs.
    pub fn between(
        relationship_type: impl Into<String>,
        person1: impl Into<String>,
        person2: impl Into<String>,
    ) -> Self {
        Relationship {
            relationship_type: Some(relationship_type.into()),
            person1: Some(ResourceReference::new(person1)),
            person2: Some(ResourceReference::new(person2)),
            ..Default::default()
        }
    }

    /// Whether either participant references `resource`.
    pub fn involves(&self, resource: &str) -> bool {
        [&self.person1, &self.person2]
            .into_iter()
            .flatten()
            .any(|r| r.resource.as_deref() == Some(resource))
    }
}

/// A child together with up to two parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAndParentsRelationship {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The father
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<ResourceReference>,
    /// The mother
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<ResourceReference>,
    /// The child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<ResourceReference>,
    /// Facts about the father's role (biological, adoptive, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub father_facts: Vec<Fact>,
    /// Facts about the mother's role
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mother_facts: Vec<Fact>,
    /// Source references
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

impl_linked!(Relationship, ChildAndParentsRelationship);

impl Embed for Relationship {
    fn embed(&mut self, other: Self) {
        if self.person1.is_none() {
            self.person1 = other.person1;
        }
        if self.person2.is_none() {
            self.person2 = other.person2;
        }
        embed_by_id(&mut self.facts, other.facts, |f| f.id.as_deref());
        embed_by_id(&mut self.sources, other.sources, |s| s.id.as_deref());
        embed_by_id(&mut self.evidence, other.evidence, |e| e.id.as_deref());
        embed_by_id(&mut self.media, other.media, |m| m.id.as_deref());
        embed_by_id(&mut self.notes, other.notes, |n| n.id.as_deref());
        self.links.merge(&other.links);
    }
}

impl Embed for ChildAndParentsRelationship {
    fn embed(&mut self, other: Self) {
        embed_by_id(&mut self.father_facts, other.father_facts, |f| f.id.as_deref());
        embed_by_id(&mut self.mother_facts, other.mother_facts, |f| f.id.as_deref());
        embed_by_id(&mut self.sources, other.sources, |s| s.id.as_deref());
        embed_by_id(&mut self.notes, other.notes, |n| n.id.as_deref());
        self.links.merge(&other.links);
    }
}
