//! Configuration for the GEDCOM X HTTP client.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `request_timeout_ms` | 30000 | Whole-request timeout |
//! | `connection_timeout_secs` | 30 | Connect timeout |
//! | `max_idle_connections` | 100 | Idle pool size per host |
//! | `proxy_url` | empty | Route requests through a proxy |
//! | `user_agent` | crate name/version | `User-Agent` header |
//! | `enable_logging` | false | Trace request/response pairs |
//!
//! Timeouts belong to the transport only; the state engine never retries.
//!
//! # Examples
//!
//! ```
//! use gedcomx_client::client::{ClientConfig, Environment};
//!
//! let config = ClientConfig {
//!     enable_logging: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.request_timeout_ms, 30000);
//!
//! let uri = Environment::Sandbox.family_tree_uri();
//! assert!(uri.starts_with("https://sandbox."));
//! ```

/// Configuration for the GEDCOM X HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Connection timeout in seconds.
    pub connection_timeout_secs: u64,

    /// Maximum idle connections kept per host.
    pub max_idle_connections: usize,

    /// Proxy URL (optional, empty means direct).
    pub proxy_url: String,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Enable request logging.
    ///
    /// When enabled, request/response pairs are traced at debug level.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30000,
            connection_timeout_secs: 30,
            max_idle_connections: 100,
            proxy_url: String::new(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            enable_logging: false,
        }
    }
}

/// Well-known deployments of a FamilySearch-compatible API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live data
    #[default]
    Production,
    /// Pre-release
    Beta,
    /// Integration sandbox
    Sandbox,
}

impl Environment {
    fn host(self) -> &'static str {
        match self {
            Environment::Production => "https://familysearch.org",
            Environment::Beta => "https://beta.familysearch.org",
            Environment::Sandbox => "https://sandbox.familysearch.org",
        }
    }

    /// Root collection of the shared family tree.
    pub fn family_tree_uri(self) -> String {
        format!("{}/platform/collections/tree", self.host())
    }

    /// Root collection of historical records.
    pub fn records_uri(self) -> String {
        format!("{}/platform/collections/records", self.host())
    }

    /// Root collection of place authority data.
    pub fn places_uri(self) -> String {
        format!("{}/platform/collections/places", self.host())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.connection_timeout_secs, 30);
        assert!(!config.enable_logging);
        assert!(config.proxy_url.is_empty());
        assert!(config.user_agent.starts_with("gedcomx_client/"));
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig {
            request_timeout_ms: 5,
            ..Default::default()
        };
        assert_eq!(config.request_timeout_ms, 5);
        assert_eq!(config.max_idle_connections, 100);
    }

    #[test]
    fn test_environment_uris() {
        assert_eq!(
            Environment::Production.family_tree_uri(),
            "https://familysearch.org/platform/collections/tree"
        );
        assert_eq!(
            Environment::Beta.records_uri(),
            "https://beta.familysearch.org/platform/collections/records"
        );
        assert!(Environment::Sandbox.places_uri().ends_with("/collections/places"));
        assert_eq!(Environment::default(), Environment::Production);
    }
}
