//! The generic application state.

use super::kind::{AgentKind, StateKind};
use super::option::StateTransitionOption;
use super::StateFactory;
use crate::client::{ApiRequest, ApiResponse, GedcomxClient};
use crate::error::{GedcomxError, Result};
use crate::link::{rel, Link, Links};
use crate::model::{
    Agent, Attribution, ChildAndParentsRelationship, Collection, Entity, Entry, Feed, Gedcomx,
    Person, PlaceDescription, Relationship, SourceDescription,
};
use crate::protocol::HeaderWarning;
use http::{Method, StatusCode};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use url::Url;

/// One point in a hypermedia navigation session.
///
/// A state is the outcome of exactly one HTTP round trip: the request that
/// was sent, the response that came back, the entity parsed from it and the
/// links discovered in it. Verb operations never modify the state they are
/// called on; they return a new one of the same kind.
///
/// The kind parameter `K` fixes the root entity type and the operations
/// available; see the aliases in [`crate::state`].
pub struct ApplicationState<K: StateKind> {
    request: ApiRequest,
    response: ApiResponse,
    entity: Option<K::Entity>,
    links: Links,
    access_token: Option<String>,
    client: GedcomxClient,
    factory: StateFactory,
    kind: PhantomData<fn() -> K>,
}

impl<K: StateKind> ApplicationState<K> {
    pub(crate) fn new(
        request: ApiRequest,
        response: ApiResponse,
        entity: Option<K::Entity>,
        links: Links,
        access_token: Option<String>,
        client: GedcomxClient,
        factory: StateFactory,
    ) -> Self {
        ApplicationState {
            request,
            response,
            entity,
            links,
            access_token,
            client,
            factory,
            kind: PhantomData,
        }
    }

    /// The request that produced this state.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// The response this state wraps.
    pub fn response(&self) -> &ApiResponse {
        &self.response
    }

    /// The parsed root entity; absent for HEAD, OPTIONS, 204, 304, errors
    /// and empty bodies.
    pub fn entity(&self) -> Option<&K::Entity> {
        self.entity.as_ref()
    }

    pub(crate) fn entity_mut(&mut self) -> &mut Option<K::Entity> {
        &mut self.entity
    }

    /// The primary element of the entity (the person of a person state, ...).
    pub fn main_data_element(&self) -> Option<&K::Main> {
        self.entity.as_ref().and_then(K::main_data_element)
    }

    /// The main data element, or a protocol violation if the server sent none.
    pub fn require_main_data_element(&self) -> Result<&K::Main> {
        self.main_data_element().ok_or_else(|| GedcomxError::ProtocolViolation {
            message: "expected resource missing from response".to_string(),
            uri: self.response.url().to_string(),
        })
    }

    /// Every link visible at this state, in lookup order.
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// First link with relation `rel`.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }

    /// The bearer token propagated to derived states.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Whether an access token is set.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Use `token` for this state and every state derived from it.
    pub fn authenticate_with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub(crate) fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    /// The client this state dispatches through.
    pub fn client(&self) -> &GedcomxClient {
        &self.client
    }

    /// The factory building derived states.
    pub fn factory(&self) -> &StateFactory {
        &self.factory
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Normalized entity tag of the response.
    pub fn etag(&self) -> Option<String> {
        self.response.etag()
    }

    /// `Last-Modified` of the response.
    pub fn last_modified(&self) -> Option<&str> {
        self.response.last_modified()
    }

    /// Structured `Warning` headers of the response.
    pub fn warnings(&self) -> Vec<HeaderWarning> {
        self.response.warnings()
    }

    /// `X-ENTITY-ID` of the response, the id of a created resource.
    pub fn entity_id(&self) -> Option<&str> {
        self.response.entity_id()
    }

    /// `Location` of the response.
    pub fn location(&self) -> Option<&str> {
        self.response.location()
    }

    /// `Content-Location` of the response.
    pub fn content_location(&self) -> Option<&str> {
        self.response.content_location()
    }

    /// Whether the response is a 4xx or 5xx.
    pub fn has_error(&self) -> bool {
        self.has_client_error() || self.has_server_error()
    }

    /// Whether the response is a 4xx.
    pub fn has_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Whether the response is a 5xx.
    pub fn has_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// This state, or an application error carrying the response if it is a
    /// 4xx or 5xx.
    pub fn if_successful(self) -> Result<Self> {
        if self.has_error() {
            return Err(GedcomxError::from_response(self.response));
        }
        Ok(self)
    }

    /// URI of the resource this state represents.
    ///
    /// The kind's own relation wins over `self`, which wins over the URI
    /// that was requested.
    pub fn self_uri(&self) -> Result<Url> {
        let base = self.response.url();
        let candidates = K::SELF_REL.into_iter().chain(std::iter::once(rel::SELF));
        for candidate in candidates {
            if let Some(url) = self.links.get(candidate).map(|l| l.resolve(base)).transpose()?.flatten() {
                return Ok(url);
            }
        }
        Ok(self.request.url().clone())
    }

    /// Read the resource again.
    pub async fn get(&self, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.verb_request(Method::GET)?;
        self.invoke(request, options).await
    }

    /// Read the headers of the resource.
    pub async fn head(&self, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.verb_request(Method::HEAD)?;
        self.invoke(request, options).await
    }

    /// Ask which methods the resource allows.
    pub async fn options(&self, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.verb_request(Method::OPTIONS)?;
        self.invoke(request, options).await
    }

    /// Delete the resource.
    pub async fn delete(&self, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.verb_request(Method::DELETE)?;
        self.invoke(request, options).await
    }

    /// Replace the resource with `entity`.
    pub async fn put(&self, entity: &K::Entity, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.entity_request(Method::PUT, entity)?;
        self.invoke(request, options).await
    }

    /// Post `entity` to the resource.
    pub async fn post(&self, entity: &K::Entity, options: &[&dyn StateTransitionOption]) -> Result<Self> {
        let request = self.entity_request(Method::POST, entity)?;
        self.invoke(request, options).await
    }

    /// Next page of a paged resource; `None` on the last page.
    pub async fn read_next_page(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<Self>> {
        self.follow::<K>(rel::NEXT, options).await
    }

    /// Previous page of a paged resource.
    pub async fn read_previous_page(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<Self>> {
        if self.links.contains(rel::PREVIOUS) {
            return self.follow::<K>(rel::PREVIOUS, options).await;
        }
        self.follow::<K>(rel::PREV, options).await
    }

    /// First page of a paged resource.
    pub async fn read_first_page(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<Self>> {
        self.follow::<K>(rel::FIRST, options).await
    }

    /// Last page of a paged resource.
    pub async fn read_last_page(&self, options: &[&dyn StateTransitionOption]) -> Result<Option<Self>> {
        self.follow::<K>(rel::LAST, options).await
    }

    /// Read the agent that contributed a change.
    pub async fn read_contributor(
        &self,
        attribution: Option<&Attribution>,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<ApplicationState<AgentKind>>> {
        let resource = attribution
            .and_then(|a| a.contributor.as_ref())
            .and_then(|c| c.resource.as_deref());
        let Some(resource) = resource else {
            return Ok(None);
        };
        let url = self.response.url().join(resource)?;
        let request = self.media_request::<AgentKind>(Method::GET, url)?;
        self.invoke(request, options).await.map(Some)
    }

    fn verb_request(&self, method: Method) -> Result<ApiRequest> {
        let accept = self.request.accept_header().unwrap_or_else(|| K::media_type()).to_string();
        self.create_request(method, self.self_uri()?)?.accept(&accept)
    }

    fn entity_request(&self, method: Method, entity: &K::Entity) -> Result<ApiRequest> {
        let content_type = self
            .request
            .content_type_header()
            .unwrap_or_else(|| K::media_type())
            .to_string();
        self.verb_request(method)?.content_type(&content_type)?.json(entity)
    }

    /// Bare request carrying the access token, if any.
    pub(crate) fn create_request(&self, method: Method, url: Url) -> Result<ApiRequest> {
        let request = ApiRequest::new(method, url);
        match &self.access_token {
            Some(token) => request.bearer(token),
            None => Ok(request),
        }
    }

    /// Request negotiating the media type of kind `T`.
    pub(crate) fn media_request<T: StateKind>(&self, method: Method, url: Url) -> Result<ApiRequest> {
        self.create_request(method, url)?.accept(T::media_type())
    }

    /// Request sending `body` as kind `T`.
    pub(crate) fn entity_request_as<T: StateKind, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<ApiRequest> {
        self.media_request::<T>(method, url)?
            .content_type(T::media_type())?
            .json(body)
    }

    /// Apply `options`, send and build a state of kind `T`.
    pub(crate) async fn invoke<T: StateKind>(
        &self,
        mut request: ApiRequest,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ApplicationState<T>> {
        for option in options {
            option.apply(&mut request)?;
        }
        let client = self
            .factory
            .pool()
            .get(request.url())
            .unwrap_or_else(|| self.client.clone());
        let response = client.execute(&request).await?;
        self.factory
            .build::<T>(request, response, client, self.access_token.clone())
    }

    /// Resolve the link `rel`, expanding templates with `vars`.
    pub(crate) fn optional_link(&self, rel: &str, vars: &[(&str, &str)]) -> Result<Option<Url>> {
        match self.links.get(rel) {
            Some(link) => link.expand(self.response.url(), vars),
            None => Ok(None),
        }
    }

    /// Resolve the link `rel` or fail with an unsupported operation.
    pub(crate) fn required_link(&self, rel: &str, operation: &'static str) -> Result<Url> {
        match self.optional_link(rel, &[])? {
            Some(url) => Ok(url),
            None => Err(self.unsupported(operation)),
        }
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> GedcomxError {
        let uri = self
            .self_uri()
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.request.url().to_string());
        GedcomxError::UnsupportedOperation { operation, uri }
    }

    /// GET the link `rel` as kind `T`; `None` when the link is missing.
    pub(crate) async fn follow<T: StateKind>(
        &self,
        rel: &str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<ApplicationState<T>>> {
        self.follow_with::<T>(rel, &[], options).await
    }

    /// GET the link `rel` with template variables as kind `T`.
    pub(crate) async fn follow_with<T: StateKind>(
        &self,
        rel: &str,
        vars: &[(&str, &str)],
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<ApplicationState<T>>> {
        let Some(url) = self.optional_link(rel, vars)? else {
            return Ok(None);
        };
        let request = self.media_request::<T>(Method::GET, url)?;
        self.invoke(request, options).await.map(Some)
    }

    /// GET the first actionable link of `links` among `rels` as kind `T`.
    pub(crate) async fn follow_links<T: StateKind>(
        &self,
        links: &Links,
        rels: &[&str],
        options: &[&dyn StateTransitionOption],
    ) -> Result<Option<ApplicationState<T>>> {
        let base = self.response.url();
        for candidate in rels {
            if let Some(url) = links.get(candidate).map(|l| l.resolve(base)).transpose()?.flatten() {
                let request = self.media_request::<T>(Method::GET, url)?;
                return self.invoke(request, options).await.map(Some);
            }
        }
        Ok(None)
    }

    /// POST `body` as kind `T` to `url`.
    pub(crate) async fn post_as<T: StateKind, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        options: &[&dyn StateTransitionOption],
    ) -> Result<ApplicationState<T>> {
        let request = self.entity_request_as::<T, B>(Method::POST, url, body)?;
        self.invoke(request, options).await
    }

    /// POST `body` to the link `rel`, falling back to the self URI.
    pub(crate) async fn post_to_rel_or_self<B: Serialize + ?Sized>(
        &self,
        rel: &str,
        body: &B,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Self> {
        let url = match self.optional_link(rel, &[])? {
            Some(url) => url,
            None => self.self_uri()?,
        };
        self.post_as::<K, B>(url, body, options).await
    }

    /// DELETE the resource behind the first of `rels` found in `links`.
    pub(crate) async fn delete_linked(
        &self,
        links: &Links,
        rels: &[&str],
        operation: &'static str,
        options: &[&dyn StateTransitionOption],
    ) -> Result<Self> {
        let base = self.response.url();
        for candidate in rels {
            if let Some(url) = links.get(candidate).map(|l| l.resolve(base)).transpose()?.flatten() {
                let request = self.media_request::<K>(Method::DELETE, url)?;
                return self.invoke(request, options).await;
            }
        }
        Err(self.unsupported(operation))
    }
}

impl<K: StateKind<Entity = Gedcomx>> ApplicationState<K> {
    /// Persons of the document.
    pub fn persons(&self) -> &[Person] {
        self.entity
            .as_ref()
            .map(|e| e.persons.as_slice())
            .unwrap_or_default()
    }

    /// Relationships of the document.
    pub fn relationships(&self) -> &[Relationship] {
        self.entity
            .as_ref()
            .map(|e| e.relationships.as_slice())
            .unwrap_or_default()
    }

    /// Child-and-parents relationships of the document.
    pub fn child_and_parents_relationships(&self) -> &[ChildAndParentsRelationship] {
        self.entity
            .as_ref()
            .map(|e| e.child_and_parents_relationships.as_slice())
            .unwrap_or_default()
    }

    /// Source descriptions of the document.
    pub fn source_descriptions(&self) -> &[SourceDescription] {
        self.entity
            .as_ref()
            .map(|e| e.source_descriptions.as_slice())
            .unwrap_or_default()
    }

    /// Agents of the document.
    pub fn agents(&self) -> &[Agent] {
        self.entity
            .as_ref()
            .map(|e| e.agents.as_slice())
            .unwrap_or_default()
    }

    /// Collections of the document.
    pub fn collections(&self) -> &[Collection] {
        self.entity
            .as_ref()
            .map(|e| e.collections.as_slice())
            .unwrap_or_default()
    }

    /// Place descriptions of the document.
    pub fn places(&self) -> &[PlaceDescription] {
        self.entity
            .as_ref()
            .map(|e| e.places.as_slice())
            .unwrap_or_default()
    }
}

impl<K: StateKind<Entity = Feed>> ApplicationState<K> {
    /// Entries of this page.
    pub fn entries(&self) -> &[Entry] {
        self.entity
            .as_ref()
            .map(|f| f.entries.as_slice())
            .unwrap_or_default()
    }

    /// Total number of results across all pages.
    pub fn total_results(&self) -> Option<u64> {
        self.entity.as_ref().and_then(|f| f.total_results)
    }
}

impl<K: StateKind> Clone for ApplicationState<K> {
    fn clone(&self) -> Self {
        ApplicationState {
            request: self.request.clone(),
            response: self.response.clone(),
            entity: self.entity.clone(),
            links: self.links.clone(),
            access_token: self.access_token.clone(),
            client: self.client.clone(),
            factory: self.factory.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: StateKind> fmt::Debug for ApplicationState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationState")
            .field("kind", &std::any::type_name::<K>())
            .field("method", self.request.method())
            .field("url", &self.request.url().as_str())
            .field("status", &self.response.status())
            .field("links", &self.links.len())
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

pub(crate) fn entity_of<E: Entity>(request: &ApiRequest, response: &ApiResponse) -> Result<Option<E>> {
    if !crate::client::expects_entity(request.method(), response.status()) || response.body().is_empty() {
        return Ok(None);
    }
    response.json::<E>().map(Some)
}
