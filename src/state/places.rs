//! Place descriptions.

use super::kind::{PlaceDescriptionKind, PlaceSearchResultsKind};
use super::option::StateTransitionOption;
use super::{PlaceDescriptionState, PlaceSearchResultsState};
use crate::error::Result;
use crate::link::rel;
use crate::model::PlaceDescription;
use http::Method;

impl PlaceDescriptionState {
    /// The place description.
    pub fn place_description(&self) -> Option<&PlaceDescription> {
        self.main_data_element()
    }

    /// Read the place this one lies within.
    ///
    /// The `jurisdiction` reference of the description is preferred over a
    /// `place` link.
    pub async fn read_jurisdiction(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PlaceDescriptionState>> {
        let jurisdiction = self
            .place_description()
            .and_then(|p| p.jurisdiction.as_ref())
            .and_then(|j| j.resource.as_deref())
            .filter(|resource| !resource.starts_with('#'));
        match jurisdiction {
            Some(resource) => {
                let url = self.response().url().join(resource)?;
                let request = self.media_request::<PlaceDescriptionKind>(Method::GET, url)?;
                self.invoke(request, options).await.map(Some)
            }
            None => self.follow::<PlaceDescriptionKind>(rel::PLACE, options).await,
        }
    }

    /// Read the places lying within this one.
    pub async fn read_children(
        &self,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<PlaceSearchResultsState>> {
        self.follow::<PlaceSearchResultsKind>(rel::CHILDREN, options).await
    }
}
