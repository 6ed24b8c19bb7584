//! Person operations.
//!
//! Conclusion updates are posted to the matching plural relation (e.g.
//! `conclusions`, `notes`) and fall back to the person itself. Deletes
//! address the conclusion's own link and fail when it has none.

use super::embed::DEFAULT_PERSON_EMBEDDED_RELS;
use super::kind::{
    AncestryResultsKind, CollectionKind, DescendancyResultsKind, PersonChildrenKind, PersonKind,
    PersonMatchResultsKind, PersonParentsKind, PersonSpousesKind, SourceDescriptionsKind,
};
use super::option::StateTransitionOption;
use super::{
    AncestryResultsState, CollectionState, DescendancyResultsState, PersonChildrenState,
    PersonMatchResultsState, PersonParentsState, PersonSpousesState, PersonState,
    RelationshipState, SourceDescriptionState, SourceDescriptionsState,
};
use crate::error::Result;
use crate::link::rel;
use crate::model::{
    types, DiscussionReference, EvidenceReference, Fact, Gedcomx, Gender, Name, Note, Person,
    Relationship, SourceReference,
};

impl PersonState {
    /// The person.
    pub fn person(&self) -> Option<&Person> {
        self.main_data_element()
    }

    /// Couple relationships of the person in this document.
    pub fn spouse_relationships(&self) -> Vec<&Relationship> {
        self.related(|r, me| {
            r.relationship_type.as_deref() == Some(types::COUPLE) && r.involves(me)
        })
    }

    /// Parent-child relationships in which the person is the child.
    pub fn parent_relationships(&self) -> Vec<&Relationship> {
        self.related(|r, me| {
            r.relationship_type.as_deref() == Some(types::PARENT_CHILD)
                && r.person2.as_ref().and_then(|p| p.resource.as_deref()) == Some(me)
        })
    }

    /// Parent-child relationships in which the person is the parent.
    pub fn child_relationships(&self) -> Vec<&Relationship> {
        self.related(|r, me| {
            r.relationship_type.as_deref() == Some(types::PARENT_CHILD)
                && r.person1.as_ref().and_then(|p| p.resource.as_deref()) == Some(me)
        })
    }

    fn related<F>(&self, pred: F) -> Vec<&Relationship>
    where
        F: Fn(&Relationship, &str) -> bool,
    {
        let Some(id) = self.person().and_then(|p| p.id.as_deref()) else {
            return Vec::new();
        };
        let me = format!("#{}", id);
        self.relationships().iter().filter(|r| pred(r, &me)).collect()
    }

    /// Update the person.
    pub async fn update(&self, person: &Person, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let url = self.self_uri()?;
        self.post_as::<PersonKind, _>(url, &Gedcomx::with_person(person.clone()), options)
            .await
    }

    /// Load the default set of embedded resources.
    pub async fn load_default_embedded_resources(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(DEFAULT_PERSON_EMBEDDED_RELS, options).await
    }

    /// Load names, facts and gender.
    pub async fn load_conclusions(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::CONCLUSIONS], options).await
    }

    /// Load source references.
    pub async fn load_source_references(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::SOURCE_REFERENCES], options).await
    }

    /// Load evidence references.
    pub async fn load_evidence_references(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::EVIDENCE_REFERENCES], options).await
    }

    /// Load media references.
    pub async fn load_media_references(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::MEDIA_REFERENCES], options).await
    }

    /// Load notes.
    pub async fn load_notes(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::NOTES], options).await
    }

    /// Load discussion references.
    pub async fn load_discussion_references(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::DISCUSSION_REFERENCES], options).await
    }

    /// Load relationships in which the person is the child.
    pub async fn load_parent_relationships(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::PARENT_RELATIONSHIPS], options).await
    }

    /// Load couple relationships.
    pub async fn load_spouse_relationships(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::SPOUSE_RELATIONSHIPS], options).await
    }

    /// Load relationships in which the person is the parent.
    pub async fn load_child_relationships(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(&[rel::CHILD_RELATIONSHIPS], options).await
    }

    /// Read the collection the person belongs to.
    pub async fn read_collection(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<CollectionState>> {
        self.follow::<CollectionKind>(rel::COLLECTION, options).await
    }

    /// Read the pedigree of the person.
    pub async fn read_ancestry(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<AncestryResultsState>> {
        self.follow::<AncestryResultsKind>(rel::ANCESTRY, options).await
    }

    /// Read the descendants of the person.
    pub async fn read_descendancy(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<DescendancyResultsState>> {
        self.follow::<DescendancyResultsKind>(rel::DESCENDANCY, options).await
    }

    /// Read possible duplicates of the person.
    pub async fn read_matches(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonMatchResultsState>> {
        self.follow::<PersonMatchResultsKind>(rel::MATCHES, options).await
    }

    /// Read the spouses of the person.
    pub async fn read_spouses(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonSpousesState>> {
        self.follow::<PersonSpousesKind>(rel::SPOUSES, options).await
    }

    /// Read the parents of the person.
    pub async fn read_parents(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonParentsState>> {
        self.follow::<PersonParentsKind>(rel::PARENTS, options).await
    }

    /// Read the children of the person.
    pub async fn read_children(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonChildrenState>> {
        self.follow::<PersonChildrenKind>(rel::CHILDREN, options).await
    }

    /// Read the artifacts attached to the person.
    pub async fn read_artifacts(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<SourceDescriptionsState>> {
        self.follow::<SourceDescriptionsKind>(rel::ARTIFACTS, options).await
    }

    /// Read the other participant of `relationship`.
    pub async fn read_relative(
        &self,
        relationship: &Relationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PersonState>> {
        let local = self.person().and_then(|p| p.id.as_deref()).map(|id| format!("#{}", id));
        let own = self.self_uri()?.to_string();
        let other = [&relationship.person1, &relationship.person2]
            .into_iter()
            .flatten()
            .filter_map(|r| r.resource.as_deref())
            .find(|resource| *resource != own && Some(*resource) != local.as_deref());
        let Some(resource) = other else {
            return Ok(None);
        };
        if resource.starts_with('#') {
            return Ok(None);
        }
        let url = self.response().url().join(resource)?;
        let request = self.media_request::<PersonKind>(http::Method::GET, url)?;
        self.invoke(request, options).await.map(Some)
    }

    /// Create a couple relationship to `spouse` in the person's collection.
    pub async fn add_spouse(&self, spouse: &PersonState, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        let collection = self.collection_for("add spouse", options).await?;
        collection.add_spouse_relationship(self, spouse, options).await
    }

    /// Create a parent-child relationship with this person as the parent.
    pub async fn add_child(&self, child: &PersonState, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        let collection = self.collection_for("add child", options).await?;
        collection.add_parent_child_relationship(self, child, options).await
    }

    /// Create a parent-child relationship with this person as the child.
    pub async fn add_parent(&self, parent: &PersonState, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        let collection = self.collection_for("add parent", options).await?;
        collection.add_parent_child_relationship(parent, self, options).await
    }

    async fn collection_for(
        &self,
        operation: &'static str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<CollectionState> {
        match self.read_collection(options).await? {
            Some(collection) => collection.if_successful(),
            None => Err(self.unsupported(operation)),
        }
    }

    fn person_part(&self, f: impl FnOnce(&mut Person)) -> Gedcomx {
        let mut person = Person {
            id: self.person().and_then(|p| p.id.clone()),
            ..Default::default()
        };
        f(&mut person);
        Gedcomx::with_person(person)
    }

    /// Post conclusions (names, facts, gender) carried by `person`.
    pub async fn update_conclusions(&self, person: &Person, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let document = self.person_part(|p| {
            p.names = person.names.clone();
            p.facts = person.facts.clone();
            p.gender = person.gender.clone();
        });
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Set the gender.
    pub async fn update_gender(&self, gender: &Gender, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let document = self.person_part(|p| p.gender = Some(gender.clone()));
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Delete a gender conclusion.
    pub async fn delete_gender(&self, gender: &Gender, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.delete_linked(&gender.links, &[rel::CONCLUSION, rel::SELF], "delete gender", options)
            .await
    }

    /// Add a name.
    pub async fn add_name(&self, name: &Name, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_names(std::slice::from_ref(name), options).await
    }

    /// Add several names.
    pub async fn add_names(&self, names: &[Name], options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let document = self.person_part(|p| p.names = names.to_vec());
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Update a name.
    pub async fn update_name(&self, name: &Name, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_name(name, options).await
    }

    /// Delete a name.
    pub async fn delete_name(&self, name: &Name, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.delete_linked(&name.links, &[rel::CONCLUSION, rel::SELF], "delete name", options)
            .await
    }

    /// Add a fact.
    pub async fn add_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_facts(std::slice::from_ref(fact), options).await
    }

    /// Add several facts.
    pub async fn add_facts(&self, facts: &[Fact], options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let document = self.person_part(|p| p.facts = facts.to_vec());
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Update a fact.
    pub async fn update_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_fact(fact, options).await
    }

    /// Delete a fact.
    pub async fn delete_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.delete_linked(&fact.links, &[rel::CONCLUSION, rel::SELF], "delete fact", options)
            .await
    }

    /// Attach a source reference.
    pub async fn add_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let document = self.person_part(|p| p.sources = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::SOURCE_REFERENCES, &document, options).await
    }

    /// Attach a reference to the source description behind `source`.
    pub async fn add_source_reference_to(
        &self,
        source: &SourceDescriptionState,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let reference = SourceReference::new(source.self_uri()?.as_str());
        self.add_source_reference(&reference, options).await
    }

    /// Update a source reference.
    pub async fn update_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        self.add_source_reference(reference, options).await
    }

    /// Detach a source reference.
    pub async fn delete_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let rels = [rel::SOURCE_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete source reference", options)
            .await
    }

    /// Attach an evidence reference.
    pub async fn add_evidence_reference(
        &self,
        reference: &EvidenceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let document = self.person_part(|p| p.evidence = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::EVIDENCE_REFERENCES, &document, options).await
    }

    /// Detach an evidence reference.
    pub async fn delete_evidence_reference(
        &self,
        reference: &EvidenceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let rels = [rel::EVIDENCE_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete evidence reference", options)
            .await
    }

    /// Attach a media reference.
    pub async fn add_media_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let document = self.person_part(|p| p.media = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::MEDIA_REFERENCES, &document, options).await
    }

    /// Detach a media reference.
    pub async fn delete_media_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let rels = [rel::MEDIA_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete media reference", options)
            .await
    }

    /// Attach a discussion reference.
    pub async fn add_discussion_reference(
        &self,
        reference: &DiscussionReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let document = self.person_part(|p| p.discussion_references = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::DISCUSSION_REFERENCES, &document, options).await
    }

    /// Detach a discussion reference.
    pub async fn delete_discussion_reference(
        &self,
        reference: &DiscussionReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<PersonState> {
        let rels = [rel::DISCUSSION_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete discussion reference", options)
            .await
    }

    /// Add a note.
    pub async fn add_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        let document = self.person_part(|p| p.notes = vec![note.clone()]);
        self.post_to_rel_or_self(rel::NOTES, &document, options).await
    }

    /// Update a note.
    pub async fn update_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.add_note(note, options).await
    }

    /// Read a single note through its own link.
    pub async fn read_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        self.follow_links::<PersonKind>(&note.links, &[rel::NOTE, rel::SELF], options)
            .await
    }

    /// Delete a note.
    pub async fn delete_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<PersonState> {
        self.delete_linked(&note.links, &[rel::NOTE, rel::SELF], "delete note", options)
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

    fn person_state(body: &str) -> PersonState {
        let url = Url::parse("https://example.com/persons/P1").unwrap();
        let response = ApiResponse::new(StatusCode::OK, url.clone()).with_body(body.to_string());
        StateFactory::default()
            .build::<PersonKind>(ApiRequest::new(Method::GET, url), response, GedcomxClient::new(), None)
            .unwrap()
    }

    #[test]
    fn test_relationship_classification() {
        let state = person_state(
            r##"{
                "persons": [{"id": "P1"}, {"id": "P2"}, {"id": "P3"}, {"id": "P4"}],
                "relationships": [
                    {"type": "http://gedcomx.org/Couple", "person1": {"resource": "#P2"}, "person2": {"resource": "#P1"}},
                    {"type": "http://gedcomx.org/ParentChild", "person1": {"resource": "#P3"}, "person2": {"resource": "#P1"}},
                    {"type": "http://gedcomx.org/ParentChild", "person1": {"resource": "#P1"}, "person2": {"resource": "#P4"}}
                ]
            }"##,
        );

        assert_eq!(state.spouse_relationships().len(), 1);
        let parents = state.parent_relationships();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].person1.as_ref().unwrap().resource.as_deref(), Some("#P3"));
        let children = state.child_relationships();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].person2.as_ref().unwrap().resource.as_deref(), Some("#P4"));
    }

    #[tokio::test]
    async fn test_delete_name_without_link_is_unsupported() {
        let state = person_state(r#"{"persons": [{"id": "P1"}]}"#);
        let err = state
            .delete_name(&Name::full_text("John Smith"), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::GedcomxError::UnsupportedOperation { operation: "delete name", .. }
        ));
    }

    #[tokio::test]
    async fn test_add_spouse_without_collection_is_unsupported() {
        let state = person_state(r#"{"persons": [{"id": "P1"}]}"#);
        let spouse = person_state(r#"{"persons": [{"id": "P2"}]}"#);
        let err = state.add_spouse(&spouse, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::GedcomxError::UnsupportedOperation { operation: "add spouse", .. }
        ));
    }
}
