//! A person's immediate family: spouses, parents and children.
//!
//! These states list the relatives of one person together with the
//! relationships that connect them, so the same lookups apply to all three.

use super::application::ApplicationState;
use super::kind::{
    PersonChildrenKind, PersonKind, PersonParentsKind, PersonSpousesKind, RelationshipKind,
    StateKind,
};
use super::option::StateTransitionOption;
use super::{PersonState, RelationshipState};
use crate::error::Result;
use crate::link::rel;
use crate::model::{Gedcomx, Person, Relationship};

/// Kinds listing relatives alongside their relationships.
pub trait FamilyKind: StateKind<Entity = Gedcomx> {}

impl FamilyKind for PersonSpousesKind {}
impl FamilyKind for PersonParentsKind {}
impl FamilyKind for PersonChildrenKind {}

impl<K: FamilyKind> ApplicationState<K> {
    /// The listed person with `id`.
    pub fn relative(&self, id: &str) -> Option<&Person> {
        self.entity().and_then(|e| e.person(id))
    }

    /// First listed relationship involving `person`; later matches are
    /// ignored.
    pub fn find_relationship_to(&self, person: &Person) -> Option<&Relationship> {
        let id = person.id.as_deref()?;
        let reference = format!("#{}", id);
        self.relationships().iter().find(|r| r.involves(&reference))
    }

    /// Read the relationship to `person`; `None` if there is none or it has
    /// no link to follow.
    pub async fn read_relationship_to(
        &self,
        person: &Person,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<RelationshipState>> {
        let Some(relationship) = self.find_relationship_to(person) else {
            return Ok(None);
        };
        self.follow_links::<RelationshipKind>(&relationship.links, &[rel::RELATIONSHIP, rel::SELF], options)
            .await
    }

    /// Delete the relationship to `person`.
    ///
    /// Fails with an unsupported operation when no relationship involves the
    /// person or it carries no link.
    pub async fn remove_relationship_to(
        &self,
        person: &Person,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let links = match self.find_relationship_to(person) {
            Some(relationship) => relationship.links.clone(),
            None => return Err(self.unsupported("remove relationship")),
        };
        let rels = [rel::RELATIONSHIP, rel::SELF];
        let base = self.response().url();
        for candidate in rels {
            if let Some(url) = links.get(candidate).map(|l| l.resolve(base)).transpose()?.flatten() {
                let request = self.media_request::<RelationshipKind>(http::Method::DELETE, url)?;
                return self.invoke(request, options).await;
            }
        }
        Err(self.unsupported("remove relationship"))
    }

    /// Read a listed relative through its `person` or `self` link.
    pub async fn read_listed_person(
        &self,
        person: &Person,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        self.follow_links::<PersonKind>(&person.links, &[rel::PERSON, rel::SELF], options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiRequest, ApiResponse, GedcomxClient};
    use crate::state::StateFactory;
    use http::{Method, StatusCode};
    use url::Url;

    const SPOUSES: &str = r##"{
        "persons": [{"id": "P2"}, {"id": "P3"}],
        "relationships": [
            {"id": "R1", "person1": {"resource": "#P1"}, "person2": {"resource": "#P2"},
             "links": {"relationship": {"href": "https://example.com/relationships/R1"}}},
            {"id": "R2", "person1": {"resource": "#P2"}, "person2": {"resource": "#P1"}},
            {"id": "R3", "person1": {"resource": "#P1"}, "person2": {"resource": "#P3"}}
        ]
    }"##;

    fn spouses() -> ApplicationState<PersonSpousesKind> {
        let url = Url::parse("https://example.com/persons/P1/spouses").unwrap();
        let response = ApiResponse::new(StatusCode::OK, url.clone()).with_body(SPOUSES);
        StateFactory::default()
            .build::<PersonSpousesKind>(ApiRequest::new(Method::GET, url), response, GedcomxClient::new(), None)
            .unwrap()
    }

    #[test]
    fn test_find_relationship_to_returns_first_match() {
        let state = spouses();
        let spouse = state.relative("P2").unwrap().clone();
        let found = state.find_relationship_to(&spouse).unwrap();
        assert_eq!(found.id.as_deref(), Some("R1"));
    }

    #[test]
    fn test_find_relationship_to_unknown_person() {
        let state = spouses();
        assert!(state.find_relationship_to(&Person::with_id("P9")).is_none());
        assert!(state.find_relationship_to(&Person::default()).is_none());
    }

    #[tokio::test]
    async fn test_remove_relationship_without_link_is_unsupported() {
        let state = spouses();
        let err = state
            .remove_relationship_to(&Person::with_id("P9"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::GedcomxError::UnsupportedOperation { .. }));

        let err = state
            .remove_relationship_to(&Person::with_id("P3"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::GedcomxError::UnsupportedOperation { .. }));
    }

    #[tokio::test]
    async fn test_read_relationship_to_without_link_is_none() {
        let state = spouses();
        let found = state
            .read_relationship_to(&Person::with_id("P3"), &[])
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
