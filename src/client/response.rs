//! HTTP response snapshot.

use crate::error::Result;
use crate::protocol::constants::headers::ENTITY_ID;
use crate::protocol::{normalize_etag, parse_warning_header, HeaderWarning};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_LOCATION, ETAG, LAST_MODIFIED, LOCATION, WARNING};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// A fully read HTTP response.
///
/// The body is buffered, so the response can be cloned, inspected and
/// attached to errors.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Response with no headers and an empty body.
    pub fn new(status: StatusCode, url: Url) -> Self {
        ApiResponse {
            status,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Response from already-read parts.
    pub fn from_parts(status: StatusCode, url: Url, headers: HeaderMap, body: Bytes) -> Self {
        ApiResponse {
            status,
            url,
            headers,
            body,
        }
    }

    /// Append a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Final URL of the response, after any followed redirects.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserialize the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// First value of a header as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn typed_header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.typed_header(&LOCATION)
    }

    /// `Content-Location` header.
    pub fn content_location(&self) -> Option<&str> {
        self.typed_header(&CONTENT_LOCATION)
    }

    /// `ETag` header with any `-gzip` suffix removed.
    pub fn etag(&self) -> Option<String> {
        self.typed_header(&ETAG).map(normalize_etag)
    }

    /// `Last-Modified` header, verbatim.
    pub fn last_modified(&self) -> Option<&str> {
        self.typed_header(&LAST_MODIFIED)
    }

    /// `X-ENTITY-ID` header, the id of a newly created resource.
    pub fn entity_id(&self) -> Option<&str> {
        self.typed_header(&ENTITY_ID)
    }

    /// All `Warning` headers, parsed.
    pub fn warnings(&self) -> Vec<HeaderWarning> {
        self.headers
            .get_all(WARNING)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(parse_warning_header)
            .collect()
    }

    /// 2xx status.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 4xx or 5xx status.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> ApiResponse {
        ApiResponse::new(
            StatusCode::OK,
            Url::parse("https://example.com/persons/P1").unwrap(),
        )
    }

    #[test]
    fn test_header_accessors() {
        let response = response()
            .with_header("ETag", r#""42-gzip""#)
            .with_header("Last-Modified", "Tue, 01 Jan 2030 00:00:00 GMT")
            .with_header("X-ENTITY-ID", "P1")
            .with_header("Content-Location", "/persons/P1");
        assert_eq!(response.etag().as_deref(), Some(r#""42""#));
        assert_eq!(
            response.last_modified(),
            Some("Tue, 01 Jan 2030 00:00:00 GMT")
        );
        assert_eq!(response.entity_id(), Some("P1"));
        assert_eq!(response.content_location(), Some("/persons/P1"));
        assert_eq!(response.location(), None);
    }

    #[test]
    fn test_warnings_from_multiple_headers() {
        let response = response()
            .with_header("Warning", r#"299 FamilySearch "one""#)
            .with_header("Warning", r#"299 FamilySearch "two""#);
        let warnings = response.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].message, "two");
    }

    #[test]
    fn test_json_body() {
        let response = response().with_body(r#"{"token": "abc"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["token"], "abc");
        assert_eq!(response.body_str(), Some(r#"{"token": "abc"}"#));
    }

    #[test]
    fn test_status_helpers() {
        assert!(response().is_success());
        let missing = ApiResponse::new(StatusCode::NOT_FOUND, response().url().clone());
        assert!(missing.is_error());
    }
}
