//! State kinds.
//!
//! A kind is a zero-sized marker describing one resource a state can
//! represent: which root entity the response body parses into, which element
//! of that entity is the "main" one, and which relation names the resource
//! itself. [`ApplicationState`](super::ApplicationState) is generic over the
//! kind, and resource specific operations are inherent impls on the aliases
//! (`PersonState`, `CollectionState`, ...).

use crate::link::{rel, Linked};
use crate::model::{
    Agent, ChildAndParentsRelationship, Collection, Entity, Feed, Gedcomx, Person,
    PlaceDescription, Relationship, SourceDescription,
};
use crate::protocol::constants::media_types;

/// Capability descriptor of a resource kind.
pub trait StateKind: Send + Sync + 'static {
    /// Root document of the response body.
    type Entity: Entity;
    /// Primary element within the root document.
    type Main: Linked;

    /// Relation naming the resource, consulted before `self`.
    const SELF_REL: Option<&'static str> = None;

    /// The primary element, if the document holds one.
    fn main_data_element(entity: &Self::Entity) -> Option<&Self::Main>;

    /// Media type requested for and sent as this kind.
    fn media_type() -> &'static str {
        <Self::Entity as Entity>::MEDIA_TYPE
    }
}

macro_rules! main_kind {
    ($(#[$doc:meta])* $kind:ident, $entity:ty, $main:ty, $self_rel:expr, |$e:ident| $main_expr:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $kind;

        impl StateKind for $kind {
            type Entity = $entity;
            type Main = $main;
            const SELF_REL: Option<&'static str> = $self_rel;

            fn main_data_element($e: &Self::Entity) -> Option<&Self::Main> {
                $main_expr
            }
        }
    };
}

macro_rules! document_kind {
    ($(#[$doc:meta])* $kind:ident, $entity:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $kind;

        impl StateKind for $kind {
            type Entity = $entity;
            type Main = $entity;

            fn main_data_element(_: &Self::Entity) -> Option<&Self::Main> {
                None
            }
        }
    };
}

main_kind!(
    /// A collection, such as the family tree.
    CollectionKind, Gedcomx, Collection, Some(rel::COLLECTION), |e| e.collections.first()
);
main_kind!(
    /// A single person.
    PersonKind, Gedcomx, Person, Some(rel::PERSON), |e| e.persons.first()
);
main_kind!(
    /// A single relationship.
    RelationshipKind, Gedcomx, Relationship, Some(rel::RELATIONSHIP), |e| e.relationships.first()
);
main_kind!(
    /// A single source description.
    SourceDescriptionKind, Gedcomx, SourceDescription, Some(rel::DESCRIPTION),
    |e| e.source_descriptions.first()
);
main_kind!(
    /// A single agent.
    AgentKind, Gedcomx, Agent, None, |e| e.agents.first()
);
main_kind!(
    /// A single place description.
    PlaceDescriptionKind, Gedcomx, PlaceDescription, Some(rel::DESCRIPTION), |e| e.places.first()
);

document_kind!(
    /// A list of collections.
    CollectionsKind, Gedcomx
);
document_kind!(
    /// The persons of a collection.
    PersonsKind, Gedcomx
);
document_kind!(
    /// The relationships of a collection.
    RelationshipsKind, Gedcomx
);
document_kind!(
    /// A person's spouses together with the couple relationships.
    PersonSpousesKind, Gedcomx
);
document_kind!(
    /// A person's parents together with the parent relationships.
    PersonParentsKind, Gedcomx
);
document_kind!(
    /// A person's children together with the child relationships.
    PersonChildrenKind, Gedcomx
);
document_kind!(
    /// Pedigree of a person.
    AncestryResultsKind, Gedcomx
);
document_kind!(
    /// Descendants of a person.
    DescendancyResultsKind, Gedcomx
);
document_kind!(
    /// A list of source descriptions.
    SourceDescriptionsKind, Gedcomx
);
document_kind!(
    /// Result of following a preferred-relationship link.
    PreferredRelationshipKind, Gedcomx
);
document_kind!(
    /// Person search results.
    PersonSearchResultsKind, Feed
);
document_kind!(
    /// Possible duplicates of a person.
    PersonMatchResultsKind, Feed
);
document_kind!(
    /// Place search results.
    PlaceSearchResultsKind, Feed
);

/// A FamilySearch child-and-parents relationship.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildAndParentsRelationshipKind;

impl StateKind for ChildAndParentsRelationshipKind {
    type Entity = Gedcomx;
    type Main = ChildAndParentsRelationship;
    const SELF_REL: Option<&'static str> = Some(rel::RELATIONSHIP);

    fn main_data_element(entity: &Gedcomx) -> Option<&ChildAndParentsRelationship> {
        entity.child_and_parents_relationships.first()
    }

    fn media_type() -> &'static str {
        media_types::FAMILYSEARCH_JSON
    }
}
