//! Media types and header names used on the wire.

/// Media types negotiated with a GEDCOM X server.
pub mod media_types {
    /// GEDCOM X JSON document
    pub const GEDCOMX_JSON: &str = "application/x-gedcomx-v1+json";
    /// GEDCOM X XML document
    pub const GEDCOMX_XML: &str = "application/x-gedcomx-v1+xml";
    /// Atom feed of GEDCOM X entries, JSON flavour
    pub const ATOM_GEDCOMX_JSON: &str = "application/x-gedcomx-atom+json";
    /// FamilySearch extension of the GEDCOM X JSON document
    pub const FAMILYSEARCH_JSON: &str = "application/x-fs-v1+json";
    /// Plain JSON, used by the OAuth2 token endpoint
    pub const JSON: &str = "application/json";
    /// Form encoding for OAuth2 grants
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    /// Artifact uploads
    pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
}

/// Header names that are not part of the `http` crate's standard set.
pub mod headers {
    use http::HeaderName;

    /// Identifier of a freshly created resource.
    pub const ENTITY_ID: HeaderName = HeaderName::from_static("x-entity-id");
    /// Feature flags understood by FamilySearch-compatible servers.
    pub const FEATURE_TAG: HeaderName = HeaderName::from_static("x-fs-feature-tag");
}

/// Suffix some servers append to entity tags of compressed representations.
pub const GZIP_ETAG_SUFFIX: &str = "-gzip";
