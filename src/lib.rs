#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # GEDCOM X client: hypermedia navigation for genealogical data
//!
//! A GEDCOM X API is a web of resources connected by named links. This crate
//! models every HTTP round trip as an immutable *application state* and every
//! operation as a transition along a link discovered in the previous answer.
//! URIs are never built by the caller; they are read from `Link` headers and
//! from the `links` of the returned documents.
//!
//! ## Overview
//!
//! 1. **States** - [`state::ApplicationState`] wraps one request and response
//!    together with the parsed entity and the discovered links.
//! 2. **Kinds** - the kind parameter of a state fixes its entity type and the
//!    operations it offers (`PersonState::read_ancestry`,
//!    `CollectionState::add_person`, ...).
//! 3. **Transitions** - reads return `Ok(None)` when the link they need is
//!    missing; writes fail with [`GedcomxError::UnsupportedOperation`]
//!    without sending anything.
//! 4. **Authentication** - OAuth2 grants against the token endpoint linked
//!    from a collection; the token is carried to every derived state.
//!
//! ## Usage
//!
//! ```ignore
//! use gedcomx_client::client::Environment;
//! use gedcomx_client::model::{types, Fact, Gender, Name, Person};
//! use gedcomx_client::StateFactory;
//!
//! #[tokio::main]
//! async fn main() -> gedcomx_client::Result<()> {
//!     let factory = StateFactory::default();
//!     let tree = factory
//!         .new_family_tree_state(Environment::Sandbox)
//!         .await?
//!         .authenticate_via_oauth2_password("user", "secret", "client-id", None)
//!         .await?;
//!
//!     let person = Person {
//!         gender: Some(Gender::new(types::MALE)),
//!         names: vec![Name::full_text("John Smith")],
//!         facts: vec![Fact::new(types::BIRTH, Some("1 January 1900"), Some("Boston"))],
//!         ..Default::default()
//!     };
//!     let created = tree.add_person(&person, &[]).await?.if_successful()?;
//!     let person = created.get(&[]).await?.if_successful()?;
//!
//!     if let Some(ancestry) = person.read_ancestry(&[]).await? {
//!         for node in ancestry.tree().root().into_iter() {
//!             println!("{:?}", node.person().and_then(|p| p.preferred_name()));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[state]** - application states, kinds, options and the factory
//! - **[model]** - GEDCOM X and Atom documents
//! - **[link]** - links, link sets and the relation vocabulary
//! - **[client]** - HTTP client, transport, filters and the client pool
//! - **[protocol]** - media types, header parsing and URI templates
//! - **[error]** - error types and result handling

pub mod client;
pub mod error;
pub mod link;
pub mod model;
pub mod protocol;
pub mod state;

pub use client::GedcomxClient;
pub use error::{GedcomxError, Result};
pub use state::{
    ApplicationState, CollectionState, PersonState, RelationshipState, SourceDescriptionState,
    StateFactory, StateTransitionOption,
};
