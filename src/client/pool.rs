//! Per-origin client registry.
//!
//! A GEDCOM X session often spans several hosts: the API host, an identity
//! host serving the OAuth2 token endpoint, a media host. [`ClientPool`] maps an
//! origin (`scheme://host:port`) to the client that should talk to it. The pool
//! is an explicit value owned by the caller and handed to the state factory;
//! nothing is registered globally.

use crate::client::fetch::GedcomxClient;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Origin → client registry with a fallback client.
///
/// # Examples
///
/// ```
/// use gedcomx_client::client::{ClientPool, GedcomxClient};
/// use url::Url;
///
/// let pool = ClientPool::new(GedcomxClient::new());
/// let ident = Url::parse("https://ident.example.com/cis-web/oauth2/v3/token").unwrap();
/// pool.register(&ident, GedcomxClient::new());
/// assert!(pool.get(&ident).is_some());
/// assert!(pool.get(&Url::parse("https://api.example.com/").unwrap()).is_none());
/// pool.clear();
/// assert!(pool.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct ClientPool {
    default: GedcomxClient,
    clients: Arc<RwLock<HashMap<String, GedcomxClient>>>,
}

impl ClientPool {
    /// Pool whose fallback is `default`.
    pub fn new(default: GedcomxClient) -> Self {
        ClientPool {
            default,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn origin(url: &Url) -> String {
        url.origin().ascii_serialization()
    }

    /// Use `client` for every URL sharing the origin of `base`.
    pub fn register(&self, base: &Url, client: GedcomxClient) {
        self.clients.write().insert(Self::origin(base), client);
    }

    /// Forget the client registered for the origin of `base`.
    pub fn remove(&self, base: &Url) -> Option<GedcomxClient> {
        self.clients.write().remove(&Self::origin(base))
    }

    /// Client registered for the origin of `url`, if any.
    pub fn get(&self, url: &Url) -> Option<GedcomxClient> {
        self.clients.read().get(&Self::origin(url)).cloned()
    }

    /// Client for `url`, falling back to the pool default.
    pub fn client_for(&self, url: &Url) -> GedcomxClient {
        self.get(url).unwrap_or_else(|| self.default.clone())
    }

    /// The fallback client.
    pub fn default_client(&self) -> &GedcomxClient {
        &self.default
    }

    /// Drop all registrations.
    pub fn clear(&self) {
        self.clients.write().clear();
    }

    /// Whether no origin is registered.
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }
}

impl Default for ClientPool {
    fn default() -> Self {
        Self::new(GedcomxClient::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    #[test]
    fn test_origin_matching_ignores_path() {
        let pool = ClientPool::default();
        let custom = GedcomxClient::with_config(ClientConfig {
            request_timeout_ms: 1,
            ..Default::default()
        });
        pool.register(&Url::parse("https://a.example.com/one").unwrap(), custom);

        let hit = pool.client_for(&Url::parse("https://a.example.com/two/three").unwrap());
        assert_eq!(hit.config().request_timeout_ms, 1);

        let miss = pool.client_for(&Url::parse("https://a.example.com:8443/").unwrap());
        assert_eq!(miss.config().request_timeout_ms, 30000);
    }

    #[test]
    fn test_remove() {
        let pool = ClientPool::default();
        let url = Url::parse("https://a.example.com/").unwrap();
        pool.register(&url, GedcomxClient::new());
        assert!(pool.remove(&url).is_some());
        assert!(pool.get(&url).is_none());
    }
}
