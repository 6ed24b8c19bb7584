//! Relationship operations.

use super::embed::DEFAULT_RELATIONSHIP_EMBEDDED_RELS;
use super::kind::{PersonKind, RelationshipKind};
use super::option::StateTransitionOption;
use super::{PersonState, RelationshipState};
use crate::error::Result;
use crate::link::rel;
use crate::model::{
    EvidenceReference, Fact, Gedcomx, Note, Relationship, ResourceReference, SourceReference,
};
use http::Method;

impl RelationshipState {
    /// The relationship.
    pub fn relationship(&self) -> Option<&Relationship> {
        self.main_data_element()
    }

    /// Read the first participant.
    pub async fn read_person1(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        let reference = self.relationship().and_then(|r| r.person1.as_ref());
        self.read_participant(rel::PERSON1, reference, options).await
    }

    /// Read the second participant.
    pub async fn read_person2(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<PersonState>> {
        let reference = self.relationship().and_then(|r| r.person2.as_ref());
        self.read_participant(rel::PERSON2, reference, options).await
    }

    async fn read_participant(
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
        relationship: &Relationship,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let url = self.self_uri()?;
        let document = Gedcomx::with_relationship(relationship.clone());
        self.post_as::<RelationshipKind, _>(url, &document, options).await
    }

    /// Load the default set of embedded resources.
    pub async fn load_default_embedded_resources(&mut self, options: &[&dyn StateTransitionOption]) -> Result<()> {
        self.load_embedded_resources(DEFAULT_RELATIONSHIP_EMBEDDED_RELS, options).await
    }

    /// Load facts.
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

    fn relationship_part(&self, f: impl FnOnce(&mut Relationship)) -> Gedcomx {
        let mut relationship = Relationship {
            id: self.relationship().and_then(|r| r.id.clone()),
            ..Default::default()
        };
        f(&mut relationship);
        Gedcomx::with_relationship(relationship)
    }

    /// Add a fact.
    pub async fn add_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        self.add_facts(std::slice::from_ref(fact), options).await
    }

    /// Add several facts.
    pub async fn add_facts(&self, facts: &[Fact], options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        let document = self.relationship_part(|r| r.facts = facts.to_vec());
        self.post_to_rel_or_self(rel::CONCLUSIONS, &document, options).await
    }

    /// Update a fact.
    pub async fn update_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        self.add_fact(fact, options).await
    }

    /// Delete a fact.
    pub async fn delete_fact(&self, fact: &Fact, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        self.delete_linked(&fact.links, &[rel::CONCLUSION, rel::SELF], "delete fact", options)
            .await
    }

    /// Attach a source reference.
    pub async fn add_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let document = self.relationship_part(|r| r.sources = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::SOURCE_REFERENCES, &document, options).await
    }

    /// Update a source reference.
    pub async fn update_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        self.add_source_reference(reference, options).await
    }

    /// Detach a source reference.
    pub async fn delete_source_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let rels = [rel::SOURCE_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete source reference", options)
            .await
    }

    /// Attach an evidence reference.
    pub async fn add_evidence_reference(
        &self,
        reference: &EvidenceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let document = self.relationship_part(|r| r.evidence = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::EVIDENCE_REFERENCES, &document, options).await
    }

    /// Detach an evidence reference.
    pub async fn delete_evidence_reference(
        &self,
        reference: &EvidenceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let rels = [rel::EVIDENCE_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete evidence reference", options)
            .await
    }

    /// Attach a media reference.
    pub async fn add_media_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let document = self.relationship_part(|r| r.media = vec![reference.clone()]);
        self.post_to_rel_or_self(rel::MEDIA_REFERENCES, &document, options).await
    }

    /// Detach a media reference.
    pub async fn delete_media_reference(
        &self,
        reference: &SourceReference,
        options: &[&dyn StateTransitionOption],
    ) -> Result<RelationshipState> {
        let rels = [rel::MEDIA_REFERENCE, rel::SELF];
        self.delete_linked(&reference.links, &rels, "delete media reference", options)
            .await
    }

    /// Add a note.
    pub async fn add_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        let document = self.relationship_part(|r| r.notes = vec![note.clone()]);
        self.post_to_rel_or_self(rel::NOTES, &document, options).await
    }

    /// Update a note.
    pub async fn update_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        self.add_note(note, options).await
    }

    /// Delete a note.
    pub async fn delete_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<RelationshipState> {
        self.delete_linked(&note.links, &[rel::NOTE, rel::SELF], "delete note", options)
            .await
    }
}
