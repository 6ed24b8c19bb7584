//! Protocol constants, header parsing and URI templates.
//!
//! # Module Organization
//!
//! ```text
//! protocol/
//! ├── constants   - media types and header names
//! ├── headers     - Warning / ETag header handling
//! ├── link_header - RFC 5988 Link header parsing
//! └── template    - RFC 6570 URI template expansion (subset)
//! ```

pub mod constants;
mod headers;
mod link_header;
mod template;

pub use headers::{normalize_etag, parse_warning_header, HeaderWarning};
pub use link_header::parse_link_header;
pub use template::expand_template;
