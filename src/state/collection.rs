//! Collection operations.
//!
//! A collection is the usual entry point of a session: it links to its
//! persons, relationships and source descriptions, to the search endpoints
//! and to the OAuth2 token endpoint.

use super::kind::{
    ChildAndParentsRelationshipKind, CollectionKind, CollectionsKind, PersonKind,
    PersonSearchResultsKind, PersonsKind, PlaceDescriptionKind, PlaceSearchResultsKind,
    RelationshipKind, RelationshipsKind, SourceDescriptionKind, SourceDescriptionsKind,
};
use super::option::StateTransitionOption;
use super::search::SearchQuery;
use super::{
    ChildAndParentsRelationshipState, CollectionState, CollectionsState, PersonSearchResultsState,
    PersonState, PersonsState, PlaceDescriptionState, PlaceSearchResultsState, RelationshipState,
    RelationshipsState, SourceDescriptionState, SourceDescriptionsState,
};
use crate::client::MultipartField;
use crate::error::Result;
use crate::link::rel;
use crate::model::{
    types, ChildAndParentsRelationship, Collection, Gedcomx, Person, Relationship,
    SourceDescription,
};
use http::Method;

impl CollectionState {
    /// The collection.
    pub fn collection(&self) -> Option<&Collection> {
        self.main_data_element()
    }

    /// Update the collection's metadata.
    pub async fn update(
        &self,
        collection: &Collection,
        options: &[&dyn StateTransitionOption],
    ) -> Result<CollectionState> {
        let url = self.self_uri()?;
        self.post_as::<CollectionKind, _>(url, &Gedcomx::with_collection(collection.clone()), options)
            .await
    }

    /// Read the persons of the collection.
    pub async fn read_persons(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonsState>> {
        self.follow::<PersonsKind>(rel::PERSONS, options).await
    }

    /// Read one person by id through the `person` template.
    pub async fn read_person(
        &self,
        person_id: &str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        self.follow_with::<PersonKind>(rel::PERSON, &[("pid", person_id)], options).await
    }

    /// Create a person.
    pub async fn add_person(&self, person: &Person, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_person_document(&Gedcomx::with_person(person.clone()), options).await
    }

    /// Create a person from a full document (sources and agents included).
    pub async fn add_person_document(
        &self,
        document: &Gedcomx,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let url = self.required_link(rel::PERSONS, "add person")?;
        self.post_as::<PersonKind, _>(url, document, options).await
    }

    /// Read the person record of the authenticated user.
    pub async fn read_person_for_current_user(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        self.follow::<PersonKind>(rel::CURRENT_USER_PERSON, options).await
    }

    /// Read the relationships of the collection.
    pub async fn read_relationships(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<RelationshipsState>> {
        self.follow::<RelationshipsKind>(rel::RELATIONSHIPS, options).await
    }

    /// Create a relationship.
    pub async fn add_relationship(
        &self,
        relationship: &Relationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let url = self.required_link(rel::RELATIONSHIPS, "add relationship")?;
        self.post_as::<RelationshipKind, _>(url, &Gedcomx::with_relationship(relationship.clone()), options)
            .await
    }

    /// Create a couple relationship between two persons.
    pub async fn add_spouse_relationship(
        &self,
        person1: &PersonState,
        person2: &PersonState,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let relationship = Relationship::between(
            types::COUPLE,
            person1.self_uri()?.as_str(),
            person2.self_uri()?.as_str(),
        );
        self.add_relationship(&relationship, options).await
    }

    /// Create a parent-child relationship.
    pub async fn add_parent_child_relationship(
        &self,
        parent: &PersonState,
        child: &PersonState,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let relationship = Relationship::between(
            types::PARENT_CHILD,
            parent.self_uri()?.as_str(),
            child.self_uri()?.as_str(),
        );
        self.add_relationship(&relationship, options).await
    }

    /// Create a FamilySearch child-and-parents relationship.
    pub async fn add_child_and_parents_relationship(
        &self,
        relationship: &ChildAndParentsRelationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let url = self.required_link(rel::RELATIONSHIPS, "add child-and-parents relationship")?;
        let document = Gedcomx::with_child_and_parents(relationship.clone());
        self.post_as::<ChildAndParentsRelationshipKind, _>(url, &document, options).await
    }

    /// Read the source descriptions of the collection.
    pub async fn read_source_descriptions(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<SourceDescriptionsState>> {
        self.follow::<SourceDescriptionsKind>(rel::SOURCE_DESCRIPTIONS, options).await
    }

    /// Create a source description.
    pub async fn add_source_description(
        &self,
        description: &SourceDescription,
        options: &[&dyn StateTransitionOption],
    ) -> Result<SourceDescriptionState> {
        let url = self.required_link(rel::SOURCE_DESCRIPTIONS, "add source description")?;
        let document = Gedcomx::with_source_description(description.clone());
        self.post_as::<SourceDescriptionKind, _>(url, &document, options).await
    }

    /// Read the resources submitted by the authenticated user.
    pub async fn read_resources_of_current_user(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<SourceDescriptionsState>> {
        self.follow::<SourceDescriptionsKind>(rel::CURRENT_USER_RESOURCES, options).await
    }

    /// Read the sub-collections.
    pub async fn read_subcollections(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<CollectionsState>> {
        self.follow::<CollectionsKind>(rel::SUBCOLLECTIONS, options).await
    }

    /// Upload an artifact (photo, document, story).
    ///
    /// `description` becomes the artifact's source description; the file
    /// travels as a multipart part.
    pub async fn add_artifact(
        &self,
        description: Option<&SourceDescription>,
        file: MultipartField,
        options: &[&dyn StateTransitionOption],
    ) -> Result<SourceDescriptionState> {
        let url = self.required_link(rel::ARTIFACTS, "add artifact")?;
        let mut fields = Vec::new();
        if let Some(description) = description {
            if let Some(title) = description.titles.first() {
                fields.push(MultipartField::text("title", title.value.clone()));
            }
            if let Some(citation) = description.citations.first() {
                fields.push(MultipartField::text("citation", citation.value.clone()));
            }
        }
        fields.push(file);
        let request = self
            .media_request::<SourceDescriptionKind>(Method::POST, url)?
            .multipart(fields);
        self.invoke(request, options).await
    }

    /// Search for persons through the `person-search` template.
    pub async fn search_for_persons(
        &self,
        query: &SearchQuery,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonSearchResultsState>> {
        let q = query.build();
        self.follow_with::<PersonSearchResultsKind>(rel::PERSON_SEARCH, &[("q", &q)], options)
            .await
    }

    /// Search for places through the `place-search` template.
    pub async fn search_for_places(
        &self,
        query: &SearchQuery,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PlaceSearchResultsState>> {
        let q = query.build();
        self.follow_with::<PlaceSearchResultsKind>(rel::PLACE_SEARCH, &[("q", &q)], options)
            .await
    }

    /// Read one place description by id through the `place` template.
    pub async fn read_place_description(
        &self,
        place_id: &str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PlaceDescriptionState>> {
        self.follow_with::<PlaceDescriptionKind>(rel::PLACE_DESCRIPTION, &[("pid", place_id)], options)
            .await
    }
}

impl CollectionsState {
    /// Create a collection.
    pub async fn add_collection(
        &self,
        collection: &Collection,
        options: &[&dyn StateTransitionOption],
    ) -> Result<CollectionState> {
        let url = self.self_uri()?;
        self.post_as::<CollectionKind, _>(url, &Gedcomx::with_collection(collection.clone()), options)
            .await
    }

    /// Read one of the listed collections.
    pub async fn read_collection(
        &self,
        collection: &Collection,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<CollectionState>> {
        self.follow_links::<CollectionKind>(&collection.links, &[rel::COLLECTION, rel::SELF], options)
            .await
    }
}

impl PersonsState {
    /// Create a person in this list.
    pub async fn add_person(&self, person: &Person, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let url = self.self_uri()?;
        self.post_as::<PersonKind, _>(url, &Gedcomx::with_person(person.clone()), options)
            .await
    }

    /// Read the collection the persons belong to.
    pub async fn read_collection(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<CollectionState>> {
        self.follow::<CollectionKind>(rel::COLLECTION, options).await
    }
}

impl RelationshipsState {
    /// Create a relationship in this list.
    pub async fn add_relationship(
        &self,
        relationship: &Relationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let url = self.self_uri()?;
        self.post_as::<RelationshipKind, _>(url, &Gedcomx::with_relationship(relationship.clone()), options)
            .await
    }

    /// Read the collection the relationships belong to.
    pub async fn read_collection(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<CollectionState>> {
        self.follow::<CollectionKind>(rel::COLLECTION, options).await
    }
}
