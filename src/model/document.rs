//! The GEDCOM X root document.

use super::common::{impl_linked, Attribution};
use super::person::Person;
use super::relationship::{ChildAndParentsRelationship, Relationship};
use super::source::{Agent, Collection, PlaceDescription, SourceDescription};
use super::{embed_by_id, Embed, Entity};
use crate::link::{Linked, Links};
use crate::protocol::constants::media_types;
use serde::{Deserialize, Serialize};

/// A GEDCOM X document: typed collections plus the document's own links.
///
/// Every write sent to the server wraps its payload in one of these, even a
/// single fact.
///
/// # Examples
///
/// ```
/// use gedcomx_client::model::{Gedcomx, Person};
///
/// let doc = Gedcomx::with_person(Person::with_id("P1"));
/// let json = serde_json::to_string(&doc).unwrap();
/// assert_eq!(json, r#"{"persons":[{"id":"P1"}]}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gedcomx {
    /// Local identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Language of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// URI of the source description describing this document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Change attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    /// Persons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
    /// Relationships
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    /// FamilySearch child-and-parents relationships
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_and_parents_relationships: Vec<ChildAndParentsRelationship>,
    /// Source descriptions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_descriptions: Vec<SourceDescription>,
    /// Agents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<Agent>,
    /// Collections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<Collection>,
    /// Place descriptions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<PlaceDescription>,
    /// Hypermedia links
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Gedcomx {
    /// Document holding one person.
    pub fn with_person(person: Person) -> Self {
        Gedcomx {
            persons: vec![person],
            ..Default::default()
        }
    }

    /// Document holding one relationship.
    pub fn with_relationship(relationship: Relationship) -> Self {
        Gedcomx {
            relationships: vec![relationship],
            ..Default::default()
        }
    }

    /// Document holding one child-and-parents relationship.
    pub fn with_child_and_parents(relationship: ChildAndParentsRelationship) -> Self {
        Gedcomx {
            child_and_parents_relationships: vec![relationship],
            ..Default::default()
        }
    }

    /// Document holding one source description.
    pub fn with_source_description(description: SourceDescription) -> Self {
        Gedcomx {
            source_descriptions: vec![description],
            ..Default::default()
        }
    }

    /// Document holding one collection.
    pub fn with_collection(collection: Collection) -> Self {
        Gedcomx {
            collections: vec![collection],
            ..Default::default()
        }
    }

    /// Person with the given local id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id.as_deref() == Some(id))
    }
}

impl_linked!(Gedcomx);

impl Entity for Gedcomx {
    const MEDIA_TYPE: &'static str = media_types::GEDCOMX_JSON;
}

impl Embed for Gedcomx {
    fn embed(&mut self, other: Self) {
        embed_by_id(&mut self.persons, other.persons, |p| p.id.as_deref());
        embed_by_id(&mut self.relationships, other.relationships, |r| r.id.as_deref());
        embed_by_id(
            &mut self.child_and_parents_relationships,
            other.child_and_parents_relationships,
            |r| r.id.as_deref(),
        );
        embed_by_id(
            &mut self.source_descriptions,
            other.source_descriptions,
            |s| s.id.as_deref(),
        );
        embed_by_id(&mut self.agents, other.agents, |a| a.id.as_deref());
        embed_by_id(&mut self.collections, other.collections, |c| c.id.as_deref());
        embed_by_id(&mut self.places, other.places, |p| p.id.as_deref());
        self.links.merge(&other.links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::rel;
    use crate::model::Note;

    #[test]
    fn test_embed_document() {
        let mut doc = Gedcomx::with_person(Person::with_id("P1"));
        let mut notes = Person::with_id("P1");
        notes.notes.push(Note::new("s", "t"));
        let mut fetched = Gedcomx::with_person(notes);
        fetched.relationships.push(Relationship::between("http://gedcomx.org/Couple", "#P1", "#P2"));

        doc.embed(fetched);
        assert_eq!(doc.persons.len(), 1);
        assert_eq!(doc.persons[0].notes.len(), 1);
        assert_eq!(doc.relationships.len(), 1);
    }

    #[test]
    fn test_links_array_form() {
        let doc: Gedcomx = serde_json::from_str(
            r#"{"links":[{"rel":"persons","href":"https://example.com/persons"}]}"#,
        )
        .unwrap();
        assert!(doc.links().contains(rel::PERSONS));
    }
}
