//! GEDCOM X object model.
//!
//! Thin serde data types for the JSON representation of GEDCOM X documents,
//! the FamilySearch extensions the state engine navigates, and the Atom feed
//! wrapper used by search and match results.
//!
//! Field names follow the wire format (camelCase, empty collections omitted).
//!
//! # Module Organization
//!
//! ```text
//! model/
//! ├── common       - attribution, references, notes, display properties
//! ├── conclusion   - names, facts, gender
//! ├── person       - Person
//! ├── relationship - Relationship, ChildAndParentsRelationship
//! ├── source       - source descriptions, agents, collections, places
//! ├── document     - the Gedcomx root entity
//! └── atom         - Feed / Entry
//! ```

mod atom;
mod common;
mod conclusion;
mod document;
mod person;
mod relationship;
mod source;

pub use atom::{Entry, EntryContent, Feed};
pub use common::{
    Attribution, DiscussionReference, DisplayProperties, EvidenceReference, Note,
    ResourceReference, SourceReference, TextValue,
};
pub use conclusion::{types, Date, Fact, Gender, Name, NameForm, NamePart, PlaceReference};
pub use document::Gedcomx;
pub use person::Person;
pub use relationship::{ChildAndParentsRelationship, Relationship};
pub use source::{Agent, Collection, PlaceDescription, SourceCitation, SourceDescription};

use crate::link::Linked;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A root document a state can carry.
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + Default + Linked + Send + Sync + 'static {
    /// Media type the document is negotiated as.
    const MEDIA_TYPE: &'static str;
}

/// Merge a separately fetched copy of a resource into an existing one.
///
/// Items are matched by id and merged recursively; unmatched items are
/// appended. Links already present are kept.
pub trait Embed {
    /// Fold `other` into `self`.
    fn embed(&mut self, other: Self);
}

pub(crate) fn embed_by_id<T, F>(into: &mut Vec<T>, from: Vec<T>, id: F)
where
    T: Embed,
    F: Fn(&T) -> Option<&str>,
{
    for item in from {
        let existing = id(&item).and_then(|wanted| into.iter().position(|x| id(x) == Some(wanted)));
        match existing {
            Some(index) => into[index].embed(item),
            None => into.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_by_id_merges_and_appends() {
        let mut persons = vec![Person::with_id("P1")];
        let mut update = Person::with_id("P1");
        update.names.push(Name::full_text("Jane Doe"));
        embed_by_id(&mut persons, vec![update, Person::with_id("P2")], |p| p.id.as_deref());

        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].names.len(), 1);
        assert_eq!(persons[1].id.as_deref(), Some("P2"));
    }
}
