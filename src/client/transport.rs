//! Transport abstraction.
//!
//! The state engine never talks to sockets directly. It hands a finished
//! [`ApiRequest`] to a [`Transport`] and receives a fully buffered
//! [`ApiResponse`]. [`ReqwestTransport`] is the production implementation;
//! tests substitute an in-memory one.

use crate::client::config::ClientConfig;
use crate::client::request::{ApiRequest, RequestBody};
use crate::client::response::ApiResponse;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Abstraction for network operations.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Perform one HTTP round trip.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest` backed transport.
///
/// Keeps two clients so that redirect handling can be chosen per request.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    following: reqwest::Client,
    direct: reqwest::Client,
}

impl ReqwestTransport {
    /// Build both clients from `config`.
    pub fn new(config: &ClientConfig) -> Self {
        ReqwestTransport {
            following: Self::builder(config).build().unwrap_or_default(),
            direct: Self::builder(config)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_default(),
        }
    }

    fn builder(config: &ClientConfig) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_secs(config.connection_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_connections)
            .user_agent(config.user_agent.clone());

        if !config.proxy_url.is_empty() {
            if let Ok(proxy) = reqwest::Proxy::all(&config.proxy_url) {
                builder = builder.proxy(proxy);
            }
        }
        builder
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let client = if request.follows_redirects() {
            &self.following
        } else {
            &self.direct
        };

        let mut builder = client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        builder = match request.request_body() {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes.clone()),
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Multipart(fields) => {
                let mut form = reqwest::multipart::Form::new();
                for field in fields {
                    let mut part = reqwest::multipart::Part::bytes(field.data.to_vec());
                    if let Some(file_name) = &field.file_name {
                        part = part.file_name(file_name.clone());
                    }
                    if let Some(content_type) = &field.content_type {
                        part = part.mime_str(content_type)?;
                    }
                    form = form.part(field.name.clone(), part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse::from_parts(status, url, headers, body))
    }
}
