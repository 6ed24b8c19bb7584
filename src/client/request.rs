//! Outgoing request snapshot.
//!
//! [`ApiRequest`] is a plain value: building one never touches the network.
//! States keep the request that produced them, and verb operations copy its
//! `Accept` and `Content-Type` into the next request.

use crate::error::Result;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

/// Request body.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Raw bytes, e.g. a serialized entity
    Bytes(Bytes),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// `multipart/form-data` fields
    Multipart(Vec<MultipartField>),
}

/// One field of a multipart upload.
#[derive(Debug, Clone)]
pub struct MultipartField {
    /// Form field name
    pub name: String,
    /// File name reported to the server
    pub file_name: Option<String>,
    /// Media type of the data
    pub content_type: Option<String>,
    /// Field content
    pub data: Bytes,
}

impl MultipartField {
    /// Plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        MultipartField {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// File field.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        MultipartField {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }
}

/// An outgoing HTTP request.
///
/// # Examples
///
/// ```
/// use gedcomx_client::client::ApiRequest;
/// use http::Method;
/// use url::Url;
///
/// let request = ApiRequest::new(Method::GET, Url::parse("https://example.com/persons/P1").unwrap())
///     .accept("application/x-gedcomx-v1+json").unwrap()
///     .bearer("token").unwrap();
/// assert_eq!(request.accept_header(), Some("application/x-gedcomx-v1+json"));
/// assert_eq!(request.header("authorization"), Some("Bearer token"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: RequestBody,
    follow_redirects: bool,
}

impl ApiRequest {
    /// Request with no headers and no body that follows redirects.
    pub fn new(method: Method, url: Url) -> Self {
        ApiRequest {
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            follow_redirects: true,
        }
    }

    /// Set the `Accept` header.
    pub fn accept(self, media_type: &str) -> Result<Self> {
        self.with_header(ACCEPT, media_type)
    }

    /// Set the `Content-Type` header.
    pub fn content_type(self, media_type: &str) -> Result<Self> {
        self.with_header(CONTENT_TYPE, media_type)
    }

    /// Set `Authorization: Bearer <token>`.
    pub fn bearer(self, token: &str) -> Result<Self> {
        self.with_header(AUTHORIZATION, &format!("Bearer {}", token))
    }

    /// Set (replace) a header.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        self.set_header(name, value)?;
        Ok(self)
    }

    /// Set (replace) a header in place.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<()> {
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(())
    }

    /// Serialize `entity` as JSON into the body.
    pub fn json<T: Serialize + ?Sized>(mut self, entity: &T) -> Result<Self> {
        self.body = RequestBody::Bytes(Bytes::from(serde_json::to_vec(entity)?));
        Ok(self)
    }

    /// Use raw bytes as the body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = RequestBody::Bytes(body.into());
        self
    }

    /// Use form pairs as the body.
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    /// Use multipart fields as the body.
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Whether the transport should follow 3xx redirects for this request.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable target URL, for options that add query parameters.
    #[inline]
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Header map.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable header map.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// A header value as text; `None` when absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Accept` header.
    pub fn accept_header(&self) -> Option<&str> {
        self.header(ACCEPT.as_str())
    }

    /// `Content-Type` header.
    pub fn content_type_header(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Request body.
    #[inline]
    pub fn request_body(&self) -> &RequestBody {
        &self.body
    }

    /// Whether redirects are followed.
    #[inline]
    pub fn follows_redirects(&self) -> bool {
        self.follow_redirects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/persons/P1").unwrap()
    }

    #[test]
    fn test_builder_headers() {
        let request = ApiRequest::new(Method::POST, url())
            .accept("application/json")
            .unwrap()
            .content_type("application/x-gedcomx-v1+json")
            .unwrap();
        assert_eq!(request.accept_header(), Some("application/json"));
        assert_eq!(
            request.content_type_header(),
            Some("application/x-gedcomx-v1+json")
        );
        assert!(request.follows_redirects());
    }

    #[test]
    fn test_invalid_header_value() {
        let result = ApiRequest::new(Method::GET, url()).bearer("bad\ntoken");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::new(Method::POST, url())
            .json(&serde_json::json!({"persons": []}))
            .unwrap();
        match request.request_body() {
            RequestBody::Bytes(bytes) => assert_eq!(&bytes[..], br#"{"persons":[]}"#),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_no_redirects() {
        let request = ApiRequest::new(Method::GET, url()).follow_redirects(false);
        assert!(!request.follows_redirects());
    }
}
