//! The person resource.

use super::common::{
    impl_linked, Attribution, DiscussionReference, DisplayProperties, EvidenceReference, Note,
    SourceReference,
};
use super::conclusion::{Fact, Gender, Name};
use super::{embed_by_id, Embed};
use crate::link::{Linked, Links};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A person and the conclusions made about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifiers keyed by identifier type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<String, Vec<String>>,
    /// Whether the person is living
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living: Option<bool>,
    /// Whether the person is private
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Gender conclusion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Name>,
    /// Facts
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
    /// Discussion references
    #[serde(
        rename = "discussion-references",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub discussion_references: Vec<DiscussionReference>,
    /// Server computed summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayProperties>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Person {
    /// Empty person with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Person {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Full text of the preferred name, falling back to the first name.
    pub fn preferred_name(&self) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.preferred == Some(true))
            .or_else(|| self.names.first())
            .and_then(Name::text)
    }
}

impl_linked!(Person);

impl Embed for Person {
    fn embed(&mut self, other: Self) {
        if self.gender.is_none() {
            self.gender = other.gender;
        }
        if self.display.is_none() {
            self.display = other.display;
        }
        for (kind, values) in other.identifiers {
            self.identifiers.entry(kind).or_default().extend(values);
        }
        embed_by_id(&mut self.names, other.names, |n| n.id.as_deref());
        embed_by_id(&mut self.facts, other.facts, |f| f.id.as_deref());
        embed_by_id(&mut self.sources, other.sources, |s| s.id.as_deref());
        embed_by_id(&mut self.evidence, other.evidence, |e| e.id.as_deref());
        embed_by_id(&mut self.media, other.media, |m| m.id.as_deref());
        embed_by_id(&mut self.notes, other.notes, |n| n.id.as_deref());
        embed_by_id(
            &mut self.discussion_references,
            other.discussion_references,
            |d| d.id.as_deref(),
        );
        self.links.merge(&other.links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{rel, Link};

    #[test]
    fn test_person_from_json() {
        let person: Person = serde_json::from_str(
            r#"{
                "id": "KWQS-BBQ",
                "living": false,
                "gender": {"type": "http://gedcomx.org/Male"},
                "names": [{"preferred": true, "nameForms": [{"fullText": "John Smith"}]}],
                "discussion-references": [{"resource": "https://example.com/discussions/1"}],
                "links": {"person": {"href": "https://example.com/persons/KWQS-BBQ"}}
            }"#,
        )
        .unwrap();

        assert_eq!(person.preferred_name(), Some("John Smith"));
        assert_eq!(person.discussion_references.len(), 1);
        assert!(person.links().contains(rel::PERSON));
    }

    #[test]
    fn test_embed_merges_conclusions() {
        let mut person = Person::with_id("P1");
        person.links.push(Link::new(rel::SELF, "https://example.com/persons/P1"));

        let mut notes = Person::with_id("P1");
        notes.notes.push(Note::new("subject", "text"));
        notes.links.push(Link::new(rel::SELF, "https://example.com/other"));
        notes.links.push(Link::new(rel::NOTES, "https://example.com/persons/P1/notes"));
        person.embed(notes);

        assert_eq!(person.notes.len(), 1);
        assert_eq!(
            person.links.get(rel::SELF).unwrap().href.as_deref(),
            Some("https://example.com/persons/P1")
        );
        assert!(person.links.contains(rel::NOTES));
    }
}
