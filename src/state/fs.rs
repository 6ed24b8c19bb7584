//! FamilySearch extensions.
//!
//! Child-and-parents relationships and the per-user preferred spouse and
//! parent relationships of a person. Reading a preferred relationship does
//! not follow redirects: the server answers `303 See Other` with the
//! relationship in `Location`, and that answer is the resulting state.

use super::application::ApplicationState;
use super::kind::{ChildAndParentsRelationshipKind, PersonKind, PreferredRelationshipKind, StateKind};
use super::option::StateTransitionOption;
use super::{ChildAndParentsRelationshipState, PersonState, PreferredRelationshipState};
use crate::error::Result;
use crate::link::rel;
use crate::model::{ChildAndParentsRelationship, Fact, Gedcomx, Note, ResourceReference, SourceReference};
use http::header::LOCATION;
use http::Method;

impl ChildAndParentsRelationshipState {
    /// The child-and-parents relationship.
    pub fn relationship(&self) -> Option<&ChildAndParentsRelationship> {
        self.main_data_element()
    }

    /// Read the father.
    pub async fn read_father(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        let reference = self.relationship().and_then(|r| r.father.as_ref());
        self.read_member(rel::FATHER, reference, options).await
    }

    /// Read the mother.
    pub async fn read_mother(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        let reference = self.relationship().and_then(|r| r.mother.as_ref());
        self.read_member(rel::MOTHER, reference, options).await
    }

    /// Read the child.
    pub async fn read_child(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        let reference = self.relationship().and_then(|r| r.child.as_ref());
        self.read_member(rel::CHILD, reference, options).await
    }

    async fn read_member(
        &self,
        relation: &str,
        reference: Option<&ResourceReference>,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        if self.links().contains(relation) {
            return self.follow::<PersonKind>(relation, options).await;
        }
        match reference.and_then(|r| r.resource.as_deref()) {
            Some(resource) if !resource.starts_with('#') => {
                let url = self.response().url().join(resource)?;
                let request = self.media_request::<PersonKind>(Method::GET, url)?;
                self.invoke(request, options).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Update the relationship.
    pub async fn update(
        &self,
        relationship: &ChildAndParentsRelationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let url = self.self_uri()?;
        let document = Gedcomx::with_child_and_parents(relationship.clone());
        self.post_as::<ChildAndParentsRelationshipKind, _>(url, &document, options).await
    }

    fn relationship_part(&self, f: impl FnOnce(&mut ChildAndParentsRelationship)) -> Gedcomx {
        let mut relationship = ChildAndParentsRelationship {
            id: self.relationship().and_then(|r| r.id.clone()),
            ..Default::default()
        };
        f(&mut relationship);
        Gedcomx::with_child_and_parents(relationship)
    }

    /// Add a fact about the father's role.
    pub async fn add_father_fact(
        &self,
        fact: &Fact,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let document = self.relationship_part(|r| r.father_facts = vec![fact.clone()]);
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Add a fact about the mother's role.
    pub async fn add_mother_fact(
        &self,
        fact: &Fact,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let document = self.relationship_part(|r| r.mother_facts = vec![fact.clone()]);
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Delete a father or mother fact.
    pub async fn delete_fact(
        &self,
        fact: &Fact,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        self.delete_linked(&fact.links, &[rel::CONCLUSION, rel::SELF], "delete fact", options)
            .await
    }

    /// Remove the father from the relationship.
    pub async fn delete_father(&self, options: &[&dyn StateTransitionOption]) -> Result<ChildAndParentsRelationshipState> {
        self.delete_role(rel::FATHER_ROLE, "delete father", options).await
    }

    /// Remove the mother from the relationship.
    pub async fn delete_mother(&self, options: &[&dyn StateTransitionOption]) -> Result<ChildAndParentsRelationshipState> {
        self.delete_role(rel::MOTHER_ROLE, "delete mother", options).await
    }

    async fn delete_role(
        &self,
        role: &str,
        operation: &'static str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let url = self.required_link(role, operation)?;
        let request = self.create_request(Method::DELETE, url)?;
        self.invoke(request, options).await
    }

    /// Attach a source reference.
    pub async fn add_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ChildAndParentsRelationshipState> {
        let document = self.relationship_part(|r| r.sources = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::SOURCE_REFERENCES, &document, options).await
    }

    /// Add a note.
    pub async fn add_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<ChildAndParentsRelationshipState> {
        let document = self.relationship_part(|r| r.notes = vec![note.clone()]);
        self.post_to_rel_or_self(rel::NOTES, &document, options).await
    }
}

impl PersonState {
    /// Read the couple relationship the current user prefers for this
    /// person. A `303` answer is the expected outcome.
    pub async fn read_preferred_spouse_relationship(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PreferredRelationshipState>> {
        self.read_preferred(rel::PREFERRED_SPOUSE_RELATIONSHIP, options).await
    }

    /// Read the parent relationship the current user prefers for this
    /// person.
    pub async fn read_preferred_parent_relationship(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PreferredRelationshipState>> {
        self.read_preferred(rel::PREFERRED_PARENT_RELATIONSHIP, options).await
    }

    async fn read_preferred(
        &self,
        relation: &str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PreferredRelationshipState>> {
        let Some(url) = self.optional_link(relation, &[])? else {
            return Ok(None);
        };
        let request = self
            .media_request::<PreferredRelationshipKind>(Method::GET, url)?
            .follow_redirects(false);
        self.invoke(request, options).await.map(Some)
    }

    /// Make `relationship` the preferred couple relationship.
    pub async fn update_preferred_spouse_relationship<T: StateKind>(
        &self,
        relationship: &ApplicationState<T>,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let operation = "update preferred spouse relationship";
        self.update_preferred(rel::PREFERRED_SPOUSE_RELATIONSHIP, operation, relationship, options)
            .await
    }

    /// Make `relationship` the preferred parent relationship.
    pub async fn update_preferred_parent_relationship<T: StateKind>(
        &self,
        relationship: &ApplicationState<T>,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let operation = "update preferred parent relationship";
        self.update_preferred(rel::PREFERRED_PARENT_RELATIONSHIP, operation, relationship, options)
            .await
    }

    async fn update_preferred<T: StateKind>(
        &self,
        relation: &str,
        operation: &'static str,
        relationship: &ApplicationState<T>,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let url = self.required_link(relation, operation)?;
        let target = relationship.self_uri()?;
        let request = self
            .create_request(Method::PUT, url)?
            .with_header(LOCATION, target.as_str())?;
        self.invoke(request, options).await
    }

    /// Clear the preferred couple relationship.
    pub async fn delete_preferred_spouse_relationship(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let operation = "delete preferred spouse relationship";
        let url = self.required_link(rel::PREFERRED_SPOUSE_RELATIONSHIP, operation)?;
        let request = self.create_request(Method::DELETE, url)?;
        self.invoke(request, options).await
    }

    /// Clear the preferred parent relationship.
    pub async fn delete_preferred_parent_relationship(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let operation = "delete preferred parent relationship";
        let url = self.required_link(rel::PREFERRED_PARENT_RELATIONSHIP, operation)?;
        let request = self.create_request(Method::DELETE, url)?;
        self.invoke(request, options).await
    }
}

impl PreferredRelationshipState {
    /// Target of the preferred relationship, taken from `Location`.
    pub fn preferred_uri(&self) -> Option<&str> {
        self.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiRequest, ApiResponse, GedcomxClient};
    use crate::state::StateFactory;
    use http::StatusCode;
    use url::Url;

    fn capr(body: &str) -> ChildAndParentsRelationshipState {
        let url = Url::parse("https://example.com/child-and-parents-relationships/R1").unwrap();
        let response = ApiResponse::new(StatusCode::OK, url.clone()).with_body(body.to_string());
        StateFactory::default()
            .build(ApiRequest::new(Method::GET, url), response, GedcomxClient::new(), None)
            .unwrap()
    }

    #[test]
    fn test_child_and_parents_accessors() {
        let state = capr(
            r##"{"childAndParentsRelationships": [{"id": "R1",
                "father": {"resource": "#F"}, "child": {"resource": "#C"}}]}"##,
        );
        let relationship = state.relationship().unwrap();
        assert_eq!(relationship.id.as_deref(), Some("R1"));
        assert!(relationship.mother.is_none());
    }

    #[tokio::test]
    async fn test_delete_father_without_role_link_is_unsupported() {
        let state = capr(r#"{"childAndParentsRelationships": [{"id": "R1"}]}"#);
        let err = state.delete_father(&[]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::GedcomxError::UnsupportedOperation { operation: "delete father", .. }
        ));
    }

    #[tokio::test]
    async fn test_read_member_by_local_reference_is_none() {
        let state = capr(
            r##"{"childAndParentsRelationships": [{"id": "R1", "father": {"resource": "#F"}}]}"##,
        );
        assert!(state.read_father(&[]).await.unwrap().is_none());
        assert!(state.read_mother(&[]).await.unwrap().is_none());
    }
}
