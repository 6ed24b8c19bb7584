//! Utility functions for the GEDCOM X client.
//!
//! This module provides helpers for:
//! - Deciding whether a response carries an entity worth parsing
//! - Building OAuth2 form bodies

use http::{Method, StatusCode};

/// Whether a response to `method` with `status` should have its body parsed.
///
/// HEAD and OPTIONS never carry an entity; neither do 204, 304 or any
/// non-2xx status.
///
/// # Examples
///
/// ```
/// use gedcomx_client::client::expects_entity;
/// use http::{Method, StatusCode};
///
/// assert!(expects_entity(&Method::GET, StatusCode::OK));
/// assert!(expects_entity(&Method::POST, StatusCode::CREATED));
/// assert!(!expects_entity(&Method::HEAD, StatusCode::OK));
/// assert!(!expects_entity(&Method::GET, StatusCode::NOT_MODIFIED));
/// ```
pub fn expects_entity(method: &Method, status: StatusCode) -> bool {
    if *method == Method::HEAD || *method == Method::OPTIONS {
        return false;
    }
    status.is_success() && status != StatusCode::NO_CONTENT
}

/// Turn borrowed pairs into owned form fields, skipping absent values.
pub fn form_pairs(pairs: &[(&str, Option<&str>)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expects_entity() {
        assert!(!expects_entity(&Method::OPTIONS, StatusCode::OK));
        assert!(!expects_entity(&Method::DELETE, StatusCode::NO_CONTENT));
        assert!(!expects_entity(&Method::GET, StatusCode::SEE_OTHER));
        assert!(!expects_entity(&Method::GET, StatusCode::GONE));
    }

    #[test]
    fn test_form_pairs() {
        let pairs = form_pairs(&[("grant_type", Some("password")), ("client_secret", None)]);
        assert_eq!(pairs, vec![("grant_type".to_string(), "password".to_string())]);
    }
}
