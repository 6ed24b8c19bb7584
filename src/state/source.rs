//! Source descriptions and agents.

use super::kind::{CollectionKind, SourceDescriptionKind};
use super::option::StateTransitionOption;
use super::{AgentState, CollectionState, SourceDescriptionState, SourceDescriptionsState};
use crate::error::Result;
use crate::link::{rel, Link};
use crate::model::{Agent, Gedcomx, Note, SourceDescription};

impl SourceDescriptionState {
    /// The source description.
    pub fn source_description(&self) -> Option<&SourceDescription> {
        self.main_data_element()
    }

    /// Update the source description.
    pub async fn update(
        &self,
        description: &SourceDescription,
        options: &[&dyn StateTransitionOption],
    ) -> Result<SourceDescriptionState> {
        let url = self.self_uri()?;
        let document = Gedcomx::with_source_description(description.clone());
        self.post_as::<SourceDescriptionKind, _>(url, &document, options).await
    }

    /// Read the collection holding the description.
    pub async fn read_collection(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<CollectionState>> {
        self.follow::<CollectionKind>(rel::COLLECTION, options).await
    }

    /// Add a note to the description.
    pub async fn add_note(&self, note: &Note, options: &[&dyn StateTransitionOption]) -> Result<SourceDescriptionState> {
        let description = SourceDescription {
            id: self.source_description().and_then(|d| d.id.clone()),
            notes: vec![note.clone()],
            ..Default::default()
        };
        let document = Gedcomx::with_source_description(description);
        self.post_to_rel_or_self(rel::NOTES, &document, options).await
    }

    /// File the description under `collection`.
    ///
    /// Posts a reference to this description to the collection's source
    /// descriptions.
    pub async fn move_to_collection(
        &self,
        collection: &CollectionState,
        options: &[&dyn StateTransitionOption],
    ) -> Result<SourceDescriptionState> {
        let Some(target) = collection.optional_link(rel::SOURCE_DESCRIPTIONS, &[])? else {
            return Err(self.unsupported("move to collection"));
        };
        let mut description = SourceDescription {
            id: self.source_description().and_then(|d| d.id.clone()),
            ..Default::default()
        };
        description
            .links
            .push(Link::new(rel::SELF, self.self_uri()?.as_str()));
        let document = Gedcomx::with_source_description(description);
        self.post_as::<SourceDescriptionKind, _>(target, &document, options).await
    }
}

impl SourceDescriptionsState {
    /// Create a source description in this list.
    pub async fn add_source_description(
        &self,
        description: &SourceDescription,
        options: &[&dyn StateTransitionOption],
    ) -> Result<SourceDescriptionState> {
        let url = self.self_uri()?;
        let document = Gedcomx::with_source_description(description.clone());
        self.post_as::<SourceDescriptionKind, _>(url, &document, options).await
    }

    /// Read the collection the descriptions belong to.
    pub async fn read_collection(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<CollectionState>> {
        self.follow::<CollectionKind>(rel::COLLECTION, options).await
    }
}

impl AgentState {
    /// The agent.
    pub fn agent(&self) -> Option<&Agent> {
        self.main_data_element()
    }
}
