//! State transition options.
//!
//! An option adjusts the outgoing request of one transition right before it
//! is dispatched: conditional headers, extra query parameters, anything a
//! caller needs for that single call. Cross-cutting adjustments that apply to
//! every request belong in a [`RequestFilter`](crate::client::RequestFilter)
//! instead.

use super::{ApplicationState, StateKind};
use crate::client::ApiRequest;
use crate::error::Result;
use http::header::{HeaderName, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE};

/// Adjusts the request of a single transition.
pub trait StateTransitionOption: Send + Sync {
    /// Apply the option to `request`.
    fn apply(&self, request: &mut ApiRequest) -> Result<()>;
}

impl<F> StateTransitionOption for F
where
    F: Fn(&mut ApiRequest) -> Result<()> + Send + Sync,
{
    fn apply(&self, request: &mut ApiRequest) -> Result<()> {
        self(request)
    }
}

/// Optimistic concurrency: `If-Match` / `If-Unmodified-Since`.
///
/// Built from a prior state, an update fails with 412 Precondition Failed
/// when the resource changed on the server in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preconditions {
    etag: Option<String>,
    last_modified: Option<String>,
}

impl Preconditions {
    /// Preconditions taken from the ETag and Last-Modified of `state`.
    pub fn from_state<K: StateKind>(state: &ApplicationState<K>) -> Self {
        Preconditions {
            etag: state.etag(),
            last_modified: state.last_modified().map(str::to_string),
        }
    }

    /// Require the entity tag to match.
    pub fn if_match(etag: impl Into<String>) -> Self {
        Preconditions {
            etag: Some(etag.into()),
            last_modified: None,
        }
    }

    /// Require the resource to be unmodified since `date` (an HTTP date).
    pub fn if_unmodified_since(date: impl Into<String>) -> Self {
        Preconditions {
            etag: None,
            last_modified: Some(date.into()),
        }
    }
}

impl StateTransitionOption for Preconditions {
    fn apply(&self, request: &mut ApiRequest) -> Result<()> {
        if let Some(etag) = &self.etag {
            request.set_header(IF_MATCH, etag)?;
        }
        if let Some(date) = &self.last_modified {
            request.set_header(IF_UNMODIFIED_SINCE, date)?;
        }
        Ok(())
    }
}

/// Conditional GET: `If-None-Match` / `If-Modified-Since`.
///
/// A resource that has not changed answers 304 Not Modified without a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheDirectives {
    etag: Option<String>,
    last_modified: Option<String>,
}

impl CacheDirectives {
    /// Cache validators taken from `state`.
    pub fn from_state<K: StateKind>(state: &ApplicationState<K>) -> Self {
        CacheDirectives {
            etag: state.etag(),
            last_modified: state.last_modified().map(str::to_string),
        }
    }

    /// Validate against an entity tag.
    pub fn if_none_match(etag: impl Into<String>) -> Self {
        CacheDirectives {
            etag: Some(etag.into()),
            last_modified: None,
        }
    }

    /// Validate against a modification date.
    pub fn if_modified_since(date: impl Into<String>) -> Self {
        CacheDirectives {
            etag: None,
            last_modified: Some(date.into()),
        }
    }
}

impl StateTransitionOption for CacheDirectives {
    fn apply(&self, request: &mut ApiRequest) -> Result<()> {
        if let Some(etag) = &self.etag {
            request.set_header(IF_NONE_MATCH, etag)?;
        }
        if let Some(date) = &self.last_modified {
            request.set_header(IF_MODIFIED_SINCE, date)?;
        }
        Ok(())
    }
}

/// Sets or appends an arbitrary header.
#[derive(Debug, Clone)]
pub struct HeaderParameter {
    name: HeaderName,
    value: String,
    replace: bool,
}

impl HeaderParameter {
    /// Replace any existing value of `name`.
    pub fn new(name: HeaderName, value: impl Into<String>) -> Self {
        HeaderParameter {
            name,
            value: value.into(),
            replace: true,
        }
    }

    /// Add a value, keeping existing ones.
    pub fn append(name: HeaderName, value: impl Into<String>) -> Self {
        HeaderParameter {
            name,
            value: value.into(),
            replace: false,
        }
    }

    /// `Accept-Language`
    pub fn lang(lang: impl Into<String>) -> Self {
        Self::new(http::header::ACCEPT_LANGUAGE, lang)
    }
}

impl StateTransitionOption for HeaderParameter {
    fn apply(&self, request: &mut ApiRequest) -> Result<()> {
        if self.replace {
            return request.set_header(self.name.clone(), &self.value);
        }
        let value = http::HeaderValue::from_str(&self.value)?;
        request.headers_mut().append(self.name.clone(), value);
        Ok(())
    }
}

/// Sets or appends a query parameter.
///
/// # Examples
///
/// ```
/// use gedcomx_client::client::ApiRequest;
/// use gedcomx_client::state::{QueryParameter, StateTransitionOption};
/// use http::Method;
/// use url::Url;
///
/// let mut request = ApiRequest::new(Method::GET, Url::parse("https://example.com/ancestry?person=P1").unwrap());
/// QueryParameter::generations(4).apply(&mut request).unwrap();
/// assert_eq!(request.url().as_str(), "https://example.com/ancestry?person=P1&generations=4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    name: String,
    values: Vec<String>,
    replace: bool,
}

impl QueryParameter {
    /// Replace any existing values of `name`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        QueryParameter {
            name: name.into(),
            values: vec![value.into()],
            replace: true,
        }
    }

    /// Add values, keeping existing ones.
    pub fn append<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryParameter {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            replace: false,
        }
    }

    /// Number of generations of an ancestry or descendancy.
    pub fn generations(count: u32) -> Self {
        Self::new("generations", count.to_string())
    }

    /// Page size.
    pub fn count(count: u32) -> Self {
        Self::new("count", count.to_string())
    }

    /// Offset of the first result.
    pub fn start(start: u32) -> Self {
        Self::new("start", start.to_string())
    }

    /// Include the spouse of the root person in an ancestry.
    pub fn spouse(person_id: impl Into<String>) -> Self {
        Self::new("spouse", person_id)
    }
}

impl StateTransitionOption for QueryParameter {
    fn apply(&self, request: &mut ApiRequest) -> Result<()> {
        let url = request.url_mut();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !self.replace || &**k != self.name.as_str())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        for value in &self.values {
            pairs.append_pair(&self.name, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GedcomxError;
    use http::Method;
    use url::Url;

    fn request(url: &str) -> ApiRequest {
        ApiRequest::new(Method::GET, Url::parse(url).unwrap())
    }

    #[test]
    fn test_preconditions_headers() {
        let mut req = request("https://example.com/persons/P1");
        Preconditions::if_unmodified_since("Tue, 15 Nov 1994 12:45:26 GMT")
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.header("if-unmodified-since"), Some("Tue, 15 Nov 1994 12:45:26 GMT"));
        assert!(req.header("if-match").is_none());

        Preconditions::if_match("\"abc\"").apply(&mut req).unwrap();
        assert_eq!(req.header("if-match"), Some("\"abc\""));
    }

    #[test]
    fn test_cache_directives_headers() {
        let mut req = request("https://example.com/persons/P1");
        CacheDirectives::if_none_match("\"v1\"").apply(&mut req).unwrap();
        assert_eq!(req.header("if-none-match"), Some("\"v1\""));
    }

    #[test]
    fn test_query_parameter_replace_and_append() {
        let mut req = request("https://example.com/search?count=10&q=a");
        QueryParameter::count(5).apply(&mut req).unwrap();
        assert_eq!(req.url().query(), Some("q=a&count=5"));

        QueryParameter::append("q", ["b"]).apply(&mut req).unwrap();
        assert_eq!(req.url().query(), Some("q=a&count=5&q=b"));
    }

    #[test]
    fn test_header_parameter_append() {
        let mut req = request("https://example.com/");
        HeaderParameter::new(HeaderName::from_static("x-test"), "one").apply(&mut req).unwrap();
        HeaderParameter::append(HeaderName::from_static("x-test"), "two").apply(&mut req).unwrap();
        assert_eq!(req.headers().get_all("x-test").iter().count(), 2);
    }

    #[test]
    fn test_closure_option() {
        let fail = |_: &mut ApiRequest| -> Result<()> { Err(GedcomxError::InvalidHeader("nope".into())) };
        let mut req = request("https://example.com/");
        assert!(fail.apply(&mut req).is_err());
    }
}
