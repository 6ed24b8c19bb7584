//! Error types for GEDCOM X client operations.
//!
//! This module defines every failure the hypermedia client can surface. The
//! [`Result`] type alias provides a convenient shorthand for fallible operations.
//!
//! # Error Categories
//!
//! | Category | Variants | Carries response |
//! |----------|----------|------------------|
//! | Transport | `Http` | No |
//! | Encoding | `Json`, `Url`, `InvalidHeader` | No |
//! | HTTP status | `Application` | Yes |
//! | Capability | `UnsupportedOperation` | No |
//! | Protocol | `ProtocolViolation`, `IllegalTokenResponse` | Partly |
//! | Authentication | `MissingTokenEndpoint` | No |
//! | Embedding | `EmbeddedResource` | Yes |
//!
//! Non-2xx responses never fail a transition by themselves. They only become an
//! [`GedcomxError::Application`] when the caller asks for it through
//! `ApplicationState::if_successful`.
//!
//! # Examples
//!
//! ```
//! use gedcomx_client::GedcomxError;
//!
//! let err = GedcomxError::UnsupportedOperation {
//!     operation: "add person",
//!     uri: "https://example.com/collections/tree".into(),
//! };
//! assert!(err.to_string().contains("add person"));
//! assert!(err.response().is_none());
//! ```

use crate::client::ApiResponse;
use http::StatusCode;
use thiserror::Error;

/// Result type for GEDCOM X client operations.
pub type Result<T> = std::result::Result<T, GedcomxError>;

/// Errors that can occur while navigating a GEDCOM X API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GedcomxError {
    /// The underlying transport failed (connection refused, timeout, DNS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URI could not be parsed or resolved.
    #[error("Invalid URI: {0}")]
    Url(#[from] url::ParseError),

    /// A header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The server answered with a client (4xx) or server (5xx) error.
    ///
    /// The full response is attached for inspection.
    #[error("{message}")]
    Application {
        /// Human readable summary
        message: String,
        /// The offending response
        response: Box<ApiResponse>,
    },

    /// A mutation was requested but the resource does not advertise the link
    /// needed to perform it. Raised before any request is sent.
    #[error("Unsupported operation: {operation} is not available for resource at {uri}")]
    UnsupportedOperation {
        /// Name of the attempted operation
        operation: &'static str,
        /// URI of the resource the operation was attempted on
        uri: String,
    },

    /// The server answered successfully but violated the expected contract.
    #[error("Protocol violation at {uri}: {message}")]
    ProtocolViolation {
        /// What was expected
        message: String,
        /// URI of the offending resource
        uri: String,
    },

    /// No OAuth2 token endpoint link is available on the current state.
    #[error("No OAuth2 token URI supplied for resource at {uri}")]
    MissingTokenEndpoint {
        /// URI of the state that was asked to authenticate
        uri: String,
    },

    /// The token endpoint answered 2xx without a recognised token key.
    #[error("Illegal access token response: no access_token provided")]
    IllegalTokenResponse {
        /// The token endpoint response
        response: Box<ApiResponse>,
    },

    /// A server error occurred while loading an embedded resource.
    #[error("Unable to load embedded resources: server says \"{}\" at {uri} ({rel})", .response.status())]
    EmbeddedResource {
        /// Relation that was being embedded
        rel: String,
        /// URI of the embedded resource
        uri: String,
        /// The failing response
        response: Box<ApiResponse>,
    },
}

impl GedcomxError {
    /// Wrap an error response, classifying it as a client or server error.
    pub fn from_response(response: ApiResponse) -> Self {
        let status = response.status();
        let class = if status.is_client_error() {
            "Client error"
        } else if status.is_server_error() {
            "Server error"
        } else {
            "Unexpected status"
        };
        GedcomxError::Application {
            message: format!("{} {} at {}", class, status, response.url()),
            response: Box::new(response),
        }
    }

    /// The HTTP response attached to this error, if any.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            GedcomxError::Application { response, .. }
            | GedcomxError::IllegalTokenResponse { response }
            | GedcomxError::EmbeddedResource { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// Status code of the attached response.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(ApiResponse::status)
    }

    /// True when the attached response is a 4xx.
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// True when the attached response is a 5xx.
    #[inline]
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

impl From<reqwest::Error> for GedcomxError {
    fn from(err: reqwest::Error) -> Self {
        GedcomxError::Http(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for GedcomxError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        GedcomxError::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for GedcomxError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        GedcomxError::InvalidHeader(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn response(status: u16) -> ApiResponse {
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            Url::parse("https://example.com/persons/P1").unwrap(),
        )
    }

    #[test]
    fn test_client_error_classification() {
        let err = GedcomxError::from_response(response(412));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), Some(StatusCode::PRECONDITION_FAILED));
        assert!(err.to_string().starts_with("Client error 412"));
    }

    #[test]
    fn test_server_error_classification() {
        let err = GedcomxError::from_response(response(503));
        assert!(err.is_server_error());
        assert!(err.to_string().contains("https://example.com/persons/P1"));
    }

    #[test]
    fn test_unsupported_operation_has_no_response() {
        let err = GedcomxError::UnsupportedOperation {
            operation: "add spouse",
            uri: "https://example.com/persons/P1".into(),
        };
        assert!(err.response().is_none());
        assert!(err.to_string().contains("add spouse"));
    }

    #[test]
    fn test_embedded_resource_message() {
        let err = GedcomxError::EmbeddedResource {
            rel: "notes".into(),
            uri: "https://example.com/persons/P1/notes".into(),
            response: Box::new(response(500)),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("notes"));
        assert!(err.is_server_error());
    }
}
