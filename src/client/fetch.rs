//! Main GEDCOM X HTTP client implementation.
//!
//! Provides the shared [`GedcomxClient`] every application state dispatches
//! through.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```ignore
//! use gedcomx_client::GedcomxClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GedcomxClient::new();
//!     let response = client.get("https://example.com/platform/collections/tree").await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags on every request
//!
//! ```ignore
//! use gedcomx_client::client::{FeatureFlagFilter, GedcomxClient};
//! use std::sync::Arc;
//!
//! let client = GedcomxClient::new();
//! client.add_filter(Arc::new(FeatureFlagFilter::new(["consolidate-redundant-resources"])));
//! ```

use crate::client::config::ClientConfig;
use crate::client::filter::RequestFilter;
use crate::client::request::ApiRequest;
use crate::client::response::ApiResponse;
use crate::client::transport::{ReqwestTransport, Transport};
use crate::error::Result;
use http::Method;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// The GEDCOM X HTTP client.
///
/// Cheap to clone; clones share the transport, configuration and filter list.
///
/// # Features
///
/// - Pluggable [`Transport`] (reqwest by default)
/// - Shared [`RequestFilter`] list applied to every request
/// - Optional request/response tracing
///
/// The filter list is a shared mutable list: registering filters while other
/// tasks dispatch through the same client is not coordinated beyond the lock.
#[derive(Clone)]
pub struct GedcomxClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    filters: Arc<RwLock<Vec<Arc<dyn RequestFilter>>>>,
}

impl GedcomxClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = ReqwestTransport::new(&config);
        Self::with_transport(Arc::new(transport), config)
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        GedcomxClient {
            transport,
            config: Arc::new(config),
            filters: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a filter for all subsequent requests
    pub fn add_filter(&self, filter: Arc<dyn RequestFilter>) {
        self.filters.write().push(filter);
    }

    /// Remove every registered filter
    pub fn clear_filters(&self) {
        self.filters.write().clear();
    }

    /// Make a simple GET request
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::GET, Url::parse(url)?);
        self.execute(&request).await
    }

    /// Apply filters and send the request.
    ///
    /// A non-2xx response is not an error here; only transport failures are.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut request = request.clone();
        let filters: Vec<Arc<dyn RequestFilter>> = self.filters.read().clone();
        for filter in &filters {
            filter.filter(&mut request)?;
        }

        if self.config.enable_logging {
            tracing::debug!(
                "--> {} {} headers={:?}",
                request.method(),
                request.url(),
                request.headers()
            );
        }

        let response = self.transport.send(&request).await?;

        if self.config.enable_logging {
            tracing::debug!(
                "<-- {} {} ({} bytes)",
                response.status(),
                response.url(),
                response.body().len()
            );
        }

        Ok(response)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for GedcomxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GedcomxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GedcomxClient")
            .field("config", &self.config)
            .field("filters", &self.filters.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FeatureFlagFilter;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
            self.seen.lock().push(request.clone());
            Ok(ApiResponse::new(http::StatusCode::OK, request.url().clone()))
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GedcomxClient::new();
        assert_eq!(client.config().request_timeout_ms, 30000);
    }

    #[tokio::test]
    async fn test_filters_applied_to_sent_request_only() {
        let recorder = Arc::new(Recorder::default());
        let client = GedcomxClient::with_transport(recorder.clone(), ClientConfig::default());
        client.add_filter(Arc::new(FeatureFlagFilter::new(["flag"])));

        let request = ApiRequest::new(Method::GET, Url::parse("https://example.com/").unwrap());
        client.execute(&request).await.unwrap();

        assert!(request.header("x-fs-feature-tag").is_none());
        let seen = recorder.seen.lock();
        assert_eq!(seen[0].header("x-fs-feature-tag"), Some("flag"));
    }

    #[tokio::test]
    async fn test_clones_share_filters() {
        let recorder = Arc::new(Recorder::default());
        let client = GedcomxClient::with_transport(recorder.clone(), ClientConfig::default());
        let other = client.clone();
        other.add_filter(Arc::new(FeatureFlagFilter::new(["shared"])));

        client.get("https://example.com/x").await.unwrap();
        assert_eq!(recorder.seen.lock()[0].header("x-fs-feature-tag"), Some("shared"));

        client.clear_filters();
        client.get("https://example.com/y").await.unwrap();
        assert!(recorder.seen.lock()[1].header("x-fs-feature-tag").is_none());
    }
}
