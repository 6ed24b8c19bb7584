//! OAuth2 token negotiation.
//!
//! The token endpoint is discovered through the
//! [`OAUTH2_TOKEN`](crate::link::rel::OAUTH2_TOKEN) link. All four grants
//! share one path: POST the form, read `access_token` (or the legacy `token`
//! key) from the JSON answer and keep it on the state.

use super::application::ApplicationState;
use super::kind::StateKind;
use crate::client::{form_pairs, ApiRequest};
use crate::error::{GedcomxError, Result};
use crate::link::rel;
use crate::protocol::constants::media_types;
use http::Method;
use serde_json::{Map, Value};

impl<K: StateKind> ApplicationState<K> {
    /// Resource owner password grant.
    pub async fn authenticate_via_oauth2_password(
        self,
        username: &str,
        password: &str,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<Self> {
        self.authenticate_via_oauth2(&[
            ("grant_type", Some("password")),
            ("username", Some(username)),
            ("password", Some(password)),
            ("client_id", Some(client_id)),
            ("client_secret", client_secret),
        ])
        .await
    }

    /// Authorization code grant.
    pub async fn authenticate_via_oauth2_auth_code(
        self,
        auth_code: &str,
        redirect_uri: &str,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<Self> {
        self.authenticate_via_oauth2(&[
            ("grant_type", Some("authorization_code")),
            ("code", Some(auth_code)),
            ("redirect_uri", Some(redirect_uri)),
            ("client_id", Some(client_id)),
            ("client_secret", client_secret),
        ])
        .await
    }

    /// Client credentials grant.
    pub async fn authenticate_via_oauth2_client_credentials(
        self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self> {
        self.authenticate_via_oauth2(&[
            ("grant_type", Some("client_credentials")),
            ("client_id", Some(client_id)),
            ("client_secret", Some(client_secret)),
        ])
        .await
    }

    /// Unauthenticated session grant, for read-only public access.
    pub async fn unauthenticated_access(self, ip_address: &str, client_id: &str) -> Result<Self> {
        self.authenticate_via_oauth2(&[
            ("grant_type", Some("unauthenticated_session")),
            ("ip_address", Some(ip_address)),
            ("client_id", Some(client_id)),
        ])
        .await
    }

    /// POST `params` (absent values dropped) to the token endpoint and keep
    /// the returned token.
    ///
    /// Fails before any request when the state has no token endpoint link.
    pub async fn authenticate_via_oauth2(mut self, params: &[(&str, Option<&str>)]) -> Result<Self> {
        let Some(endpoint) = self.optional_link(rel::OAUTH2_TOKEN, &[])? else {
            return Err(GedcomxError::MissingTokenEndpoint {
                uri: self.self_uri()?.to_string(),
            });
        };

        let request = ApiRequest::new(Method::POST, endpoint)
            .accept(media_types::JSON)?
            .content_type(media_types::FORM_URLENCODED)?
            .form(form_pairs(params));
        let client = self
            .factory()
            .pool()
            .get(request.url())
            .unwrap_or_else(|| self.client().clone());
        let response = client.execute(&request).await?;

        if !response.is_success() {
            return Err(GedcomxError::from_response(response));
        }

        // empty or non-object bodies count as a missing token
        let body: Option<Map<String, Value>> = response.json().ok();
        let token = body.as_ref().and_then(|body| {
            ["access_token", "token"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str))
                .map(str::to_string)
        });
        match token {
            Some(token) => {
                tracing::debug!("Obtained access token from {}", response.url());
                self.set_access_token(token);
                Ok(self)
            }
            None => Err(GedcomxError::IllegalTokenResponse {
                response: Box::new(response),
            }),
        }
    }
}
