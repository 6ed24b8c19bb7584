//! Hypermedia application states.
//!
//! Navigation starts from a [`StateFactory`] reading a well-known URI, and
//! continues purely through links discovered in responses:
//!
//! ```ignore
//! use gedcomx_client::state::StateFactory;
//! use gedcomx_client::model::Person;
//!
//! let factory = StateFactory::default();
//! let tree = factory
//!     .new_collection_state("https://sandbox.familysearch.org/platform/collections/tree")
//!     .await?
//!     .authenticate_via_oauth2_password("user", "pass", "client-id", None)
//!     .await?;
//! let person = tree.add_person(&Person::default(), &[]).await?.if_successful()?;
//! let ancestry = person.get(&[]).await?.read_ancestry(&[]).await?;
//! ```
//!
//! # Module Organization
//!
//! ```text
//! state/
//! ├── application  - ApplicationState: verbs, accessors, link plumbing
//! ├── kind         - StateKind and the resource kinds
//! ├── factory      - StateFactory
//! ├── option       - per-transition options
//! ├── embed        - embedded resource loading
//! ├── oauth2       - token negotiation
//! ├── collection   - collections
//! ├── person       - persons
//! ├── relationship - relationships
//! ├── family       - spouses, parents, children
//! ├── tree         - ancestry and descendancy
//! ├── source       - source descriptions and agents
//! ├── search       - person search, matches, place search
//! ├── places       - place descriptions
//! └── fs           - FamilySearch extensions
//! ```
//!
//! Read-style operations return `Ok(None)` when the resource does not offer
//! the link they need. Write-style operations fail with
//! [`GedcomxError::UnsupportedOperation`](crate::GedcomxError::UnsupportedOperation)
//! before sending anything.

mod application;
mod collection;
mod embed;
mod factory;
mod family;
mod fs;
mod kind;
mod oauth2;
mod option;
mod person;
mod places;
mod relationship;
mod search;
mod source;
mod tree;

pub use application::ApplicationState;
pub use embed::{DEFAULT_PERSON_EMBEDDED_RELS, DEFAULT_RELATIONSHIP_EMBEDDED_RELS};
pub use factory::StateFactory;
pub use family::FamilyKind;
pub use kind::*;
pub use option::{CacheDirectives, HeaderParameter, Preconditions, QueryParameter, StateTransitionOption};
pub use search::SearchQuery;
pub use tree::{AncestryNode, AncestryTree, DescendancyNode, DescendancyTree};

/// A collection.
pub type CollectionState = ApplicationState<CollectionKind>;
/// A list of collections.
pub type CollectionsState = ApplicationState<CollectionsKind>;
/// A person.
pub type PersonState = ApplicationState<PersonKind>;
/// The persons of a collection.
pub type PersonsState = ApplicationState<PersonsKind>;
/// A relationship.
pub type RelationshipState = ApplicationState<RelationshipKind>;
/// The relationships of a collection.
pub type RelationshipsState = ApplicationState<RelationshipsKind>;
/// A person's spouses.
pub type PersonSpousesState = ApplicationState<PersonSpousesKind>;
/// A person's parents.
pub type PersonParentsState = ApplicationState<PersonParentsKind>;
/// A person's children.
pub type PersonChildrenState = ApplicationState<PersonChildrenKind>;
/// Pedigree of a person.
pub type AncestryResultsState = ApplicationState<AncestryResultsKind>;
/// Descendants of a person.
pub type DescendancyResultsState = ApplicationState<DescendancyResultsKind>;
/// A source description.
pub type SourceDescriptionState = ApplicationState<SourceDescriptionKind>;
/// A list of source descriptions.
pub type SourceDescriptionsState = ApplicationState<SourceDescriptionsKind>;
/// An agent.
pub type AgentState = ApplicationState<AgentKind>;
/// Person search results.
pub type PersonSearchResultsState = ApplicationState<PersonSearchResultsKind>;
/// Possible duplicates of a person.
pub type PersonMatchResultsState = ApplicationState<PersonMatchResultsKind>;
/// A place description.
pub type PlaceDescriptionState = ApplicationState<PlaceDescriptionKind>;
/// Place search results.
pub type PlaceSearchResultsState = ApplicationState<PlaceSearchResultsKind>;
/// A FamilySearch child-and-parents relationship.
pub type ChildAndParentsRelationshipState = ApplicationState<ChildAndParentsRelationshipKind>;
/// The outcome of reading or updating a preferred relationship.
pub type PreferredRelationshipState = ApplicationState<PreferredRelationshipKind>;
