//! Cross-cutting request filters.
//!
//! Filters run inside [`GedcomxClient::execute`](super::GedcomxClient::execute)
//! on every request just before it reaches the transport. Unlike state
//! transition options they are registered once on the client and apply to
//! every state derived from it.

use crate::client::request::ApiRequest;
use crate::error::Result;
use crate::protocol::constants::headers::FEATURE_TAG;

/// A request mutator applied by the client to every outgoing request.
pub trait RequestFilter: Send + Sync + 'static {
    /// Adjust the request in place.
    fn filter(&self, request: &mut ApiRequest) -> Result<()>;
}

/// Enables pending server features through the `X-FS-Feature-Tag` header.
///
/// # Examples
///
/// ```
/// use gedcomx_client::client::{ApiRequest, FeatureFlagFilter, RequestFilter};
/// use http::Method;
/// use url::Url;
///
/// let filter = FeatureFlagFilter::new(["consolidate-redundant-resources", "current-person-401"]);
/// let mut request = ApiRequest::new(Method::GET, Url::parse("https://example.com/").unwrap());
/// filter.filter(&mut request).unwrap();
/// assert_eq!(
///     request.header("x-fs-feature-tag"),
///     Some("consolidate-redundant-resources,current-person-401")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureFlagFilter {
    features: Vec<String>,
}

impl FeatureFlagFilter {
    /// Filter enabling the given feature names.
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FeatureFlagFilter {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Enabled feature names.
    pub fn features(&self) -> &[String] {
        &self.features
    }
}

impl RequestFilter for FeatureFlagFilter {
    fn filter(&self, request: &mut ApiRequest) -> Result<()> {
        if self.features.is_empty() {
            return Ok(());
        }
        let mut value = self.features.join(",");
        if let Some(existing) = request.header(FEATURE_TAG.as_str()) {
            value = format!("{},{}", existing, value);
        }
        request.set_header(FEATURE_TAG, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use url::Url;

    fn request() -> ApiRequest {
        ApiRequest::new(Method::GET, Url::parse("https://example.com/").unwrap())
    }

    #[test]
    fn test_empty_filter_is_noop() {
        let mut request = request();
        FeatureFlagFilter::default().filter(&mut request).unwrap();
        assert!(request.header("x-fs-feature-tag").is_none());
    }

    #[test]
    fn test_appends_to_existing_tags() {
        let mut request = request().with_header(FEATURE_TAG, "a").unwrap();
        FeatureFlagFilter::new(["b"]).filter(&mut request).unwrap();
        assert_eq!(request.header("x-fs-feature-tag"), Some("a,b"));
    }
}
