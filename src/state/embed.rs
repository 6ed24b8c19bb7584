//! Embedded resource loading.
//!
//! Some resources are served in pieces: a person document links to its
//! conclusions, notes and relationships instead of inlining them. Loading an
//! embedded resource GETs the linked document and merges it into the entity
//! of the current state.
//!
//! A 5xx on any embedded request aborts the load. Any other non-200 answer,
//! or a missing link, just means there is nothing to embed.

use super::application::ApplicationState;
use super::kind::StateKind;
use super::option::StateTransitionOption;
use crate::error::{GedcomxError, Result};
use crate::link::rel;
use crate::model::{Embed, Gedcomx};
use http::{Method, StatusCode};

/// Relations embedded by default for a person.
pub const DEFAULT_PERSON_EMBEDDED_RELS: &[&str] = &[
    rel::CONCLUSIONS,
    rel::SOURCE_REFERENCES,
    rel::EVIDENCE_REFERENCES,
    rel::MEDIA_REFERENCES,
    rel::NOTES,
    rel::PARENT_RELATIONSHIPS,
    rel::SPOUSE_RELATIONSHIPS,
    rel::CHILD_RELATIONSHIPS,
    rel::DISCUSSION_REFERENCES,
];

/// Relations embedded by default for a relationship.
pub const DEFAULT_RELATIONSHIP_EMBEDDED_RELS: &[&str] = &[
    rel::CONCLUSIONS,
    rel::SOURCE_REFERENCES,
    rel::MEDIA_REFERENCES,
    rel::EVIDENCE_REFERENCES,
    rel::NOTES,
];

impl<K: StateKind<Entity = Gedcomx>> ApplicationState<K> {
    /// Fetch the resources linked under `rels` and merge them into this
    /// state's entity.
    ///
    /// This mutates the state in place; the request, response and links are
    /// left untouched. Requests are sent one after another in `rels` order.
    pub async fn load_embedded_resources(
        &mut self,
        rels: &[&str],
        options: &[&dyn StateTransitionOption],
    ) -> Result<()> {
        for relation in rels {
            let Some(url) = self.optional_link(relation, &[])? else {
                continue;
            };
            let request = self.media_request::<K>(Method::GET, url.clone())?;
            let embedded = self.invoke::<K>(request, options).await?;

            match embedded.status() {
                StatusCode::OK => {
                    if let Some(document) = embedded.entity().cloned() {
                        self.entity_mut().get_or_insert_with(Gedcomx::default).embed(document);
                    }
                }
                status if status.is_server_error() => {
                    return Err(GedcomxError::EmbeddedResource {
                        rel: relation.to_string(),
                        uri: url.to_string(),
                        response: Box::new(embedded.response().clone()),
                    });
                }
                status => {
                    tracing::warn!("Skipping embedded {} at {}: {}", relation, url, status);
                }
            }
        }
        Ok(())
    }
}
