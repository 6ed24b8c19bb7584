//! State construction.
//!
//! Every state is built by a [`StateFactory`]: it parses the entity of a
//! response, extracts the link set and threads the client, access token and
//! factory on to the new state. The factory is also the entry point of a
//! session, reading the first resource from a URI supplied by the caller.

use super::application::{entity_of, ApplicationState};
use super::kind::{
    CollectionKind, PersonKind, PlaceDescriptionKind, RelationshipKind, SourceDescriptionKind,
    StateKind,
};
use crate::client::{ApiRequest, ApiResponse, ClientPool, Environment, GedcomxClient};
use crate::error::Result;
use crate::link::{extract_links, Linked};
use http::Method;
use url::Url;

/// Builds application states.
///
/// # Examples
///
/// ```ignore
/// use gedcomx_client::client::Environment;
/// use gedcomx_client::state::StateFactory;
///
/// #[tokio::main]
/// async fn main() -> gedcomx_client::Result<()> {
///     let factory = StateFactory::default();
///     let tree = factory.new_family_tree_state(Environment::Sandbox).await?.if_successful()?;
///     println!("{:?}", tree.collection());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateFactory {
    pool: ClientPool,
}

impl StateFactory {
    /// Factory dispatching through `pool`.
    pub fn new(pool: ClientPool) -> Self {
        StateFactory { pool }
    }

    /// Factory whose every request goes through `client`.
    pub fn with_client(client: GedcomxClient) -> Self {
        Self::new(ClientPool::new(client))
    }

    /// The client pool.
    pub fn pool(&self) -> &ClientPool {
        &self.pool
    }

    /// Turn a completed round trip into a state of kind `K`.
    ///
    /// The body is parsed only for successful responses that carry one.
    pub fn build<K: StateKind>(
        &self,
        request: ApiRequest,
        response: ApiResponse,
        client: GedcomxClient,
        access_token: Option<String>,
    ) -> Result<ApplicationState<K>> {
        let entity = entity_of::<K::Entity>(&request, &response)?;
        let links = match &entity {
            Some(entity) => extract_links(
                &response,
                K::main_data_element(entity).map(Linked::links),
                Some(entity.links()),
            ),
            None => extract_links(&response, None, None),
        };
        Ok(ApplicationState::new(
            request,
            response,
            entity,
            links,
            access_token,
            client,
            self.clone(),
        ))
    }

    /// Read the resource at `uri` as kind `K`.
    pub async fn new_state<K: StateKind>(&self, uri: &str) -> Result<ApplicationState<K>> {
        self.read::<K>(Url::parse(uri)?, None).await
    }

    /// Read the resource at `uri` as kind `K` using an existing token.
    pub async fn new_authenticated_state<K: StateKind>(
        &self,
        uri: &str,
        access_token: &str,
    ) -> Result<ApplicationState<K>> {
        self.read::<K>(Url::parse(uri)?, Some(access_token)).await
    }

    async fn read<K: StateKind>(&self, url: Url, access_token: Option<&str>) -> Result<ApplicationState<K>> {
        let mut request = ApiRequest::new(Method::GET, url).accept(K::media_type())?;
        if let Some(token) = access_token {
            request = request.bearer(token)?;
        }
        let client = self.pool.client_for(request.url());
        tracing::debug!("Reading initial state at {}", request.url());
        let response = client.execute(&request).await?;
        self.build::<K>(request, response, client, access_token.map(str::to_string))
    }

    /// Read a collection.
    pub async fn new_collection_state(&self, uri: &str) -> Result<ApplicationState<CollectionKind>> {
        self.new_state::<CollectionKind>(uri).await
    }

    /// Read the family tree collection of a well-known deployment.
    pub async fn new_family_tree_state(&self, environment: Environment) -> Result<ApplicationState<CollectionKind>> {
        self.new_collection_state(&environment.family_tree_uri()).await
    }

    /// Read the historical records collection of a well-known deployment.
    pub async fn new_records_state(&self, environment: Environment) -> Result<ApplicationState<CollectionKind>> {
        self.new_collection_state(&environment.records_uri()).await
    }

    /// Read the places collection of a well-known deployment.
    pub async fn new_places_state(&self, environment: Environment) -> Result<ApplicationState<CollectionKind>> {
        self.new_collection_state(&environment.places_uri()).await
    }

    /// Read a person.
    pub async fn new_person_state(&self, uri: &str) -> Result<ApplicationState<PersonKind>> {
        self.new_state::<PersonKind>(uri).await
    }

    /// Read a relationship.
    pub async fn new_relationship_state(&self, uri: &str) -> Result<ApplicationState<RelationshipKind>> {
        self.new_state::<RelationshipKind>(uri).await
    }

    /// Read a source description.
    pub async fn new_source_description_state(
        &self,
        uri: &str,
    ) -> Result<ApplicationState<SourceDescriptionKind>> {
        self.new_state::<SourceDescriptionKind>(uri).await
    }

    /// Read a place description.
    pub async fn new_place_description_state(
        &self,
        uri: &str,
    ) -> Result<ApplicationState<PlaceDescriptionKind>> {
        self.new_state::<PlaceDescriptionKind>(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::rel;
    use http::StatusCode;

    fn round_trip(method: Method, status: StatusCode, body: &str) -> (ApiRequest, ApiResponse) {
        let url = Url::parse("https://example.com/persons/P1").unwrap();
        let request = ApiRequest::new(method, url.clone());
        let response = ApiResponse::new(status, url).with_body(body.to_string());
        (request, response)
    }

    const PERSON: &str = r#"{
        "links": {"self": {"href": "https://example.com/doc"}},
        "persons": [{"id": "P1", "links": {"person": {"href": "https://example.com/persons/P1"}}}]
    }"#;

    #[test]
    fn test_build_parses_entity_and_links() {
        let factory = StateFactory::default();
        let (request, response) = round_trip(Method::GET, StatusCode::OK, PERSON);
        let state = factory
            .build::<PersonKind>(request, response, GedcomxClient::new(), None)
            .unwrap();

        assert_eq!(state.person().unwrap().id.as_deref(), Some("P1"));
        assert!(state.links().contains(rel::PERSON));
        assert!(state.links().contains(rel::SELF));
    }

    #[test]
    fn test_build_skips_entity_without_body_semantics() {
        let factory = StateFactory::default();
        for (method, status) in [
            (Method::HEAD, StatusCode::OK),
            (Method::OPTIONS, StatusCode::OK),
            (Method::GET, StatusCode::NOT_MODIFIED),
            (Method::GET, StatusCode::NOT_FOUND),
        ] {
            let (request, response) = round_trip(method, status, PERSON);
            let state = factory
                .build::<PersonKind>(request, response, GedcomxClient::new(), None)
                .unwrap();
            assert!(state.entity().is_none());
        }
    }

    #[test]
    fn test_build_propagates_token() {
        let factory = StateFactory::default();
        let (request, response) = round_trip(Method::GET, StatusCode::OK, "");
        let state = factory
            .build::<PersonKind>(request, response, GedcomxClient::new(), Some("t".into()))
            .unwrap();
        assert!(state.entity().is_none());
        assert_eq!(state.access_token(), Some("t"));
    }
}
