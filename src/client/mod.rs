//! GEDCOM X HTTP client implementation.
//!
//! This module provides the request/response plumbing the state engine sits
//! on:
//!
//! - **Request snapshots** with content negotiation and bearer auth
//! - **Buffered responses** with typed header accessors
//! - **Pluggable transport**, reqwest in production
//! - **Request filters** shared by every state derived from a client
//! - **Client pool** for sessions that span several hosts
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── config    - Client configuration and well-known environments
//! ├── fetch     - GedcomxClient
//! ├── filter    - Cross-cutting request filters
//! ├── pool      - Origin → client registry
//! ├── request   - Outgoing request snapshot
//! ├── response  - Buffered response snapshot
//! ├── transport - Transport trait and reqwest implementation
//! └── utils     - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GedcomxClient`] | Shared HTTP client |
//! | [`ApiRequest`] | Outgoing request |
//! | [`ApiResponse`] | Received response |
//! | [`Transport`] | Network seam |
//! | [`ClientPool`] | Per-origin clients |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ```
//! use gedcomx_client::client::{ClientConfig, GedcomxClient};
//!
//! let client = GedcomxClient::with_config(ClientConfig {
//!     request_timeout_ms: 10_000,
//!     ..Default::default()
//! });
//! assert_eq!(client.config().request_timeout_ms, 10_000);
//! ```

mod config;
mod fetch;
mod filter;
mod pool;
mod request;
mod response;
mod transport;
mod utils;

pub use config::{ClientConfig, Environment};
pub use fetch::GedcomxClient;
pub use filter::{FeatureFlagFilter, RequestFilter};
pub use pool::ClientPool;
pub use request::{ApiRequest, MultipartField, RequestBody};
pub use response::ApiResponse;
pub use transport::{ReqwestTransport, Transport};
pub use utils::*;
