//! Blocking HTTP transport for the warbler API client.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`HttpTransport`] | [`warbler::Transport`] over `reqwest`, built from a [`warbler::ClientConfig`] |
//! | [`Authorizer`] | Adds credentials to each request |
//! | [`BearerToken`], [`BasicAuth`], [`Anonymous`] | Authorizer implementations |
//!
//! OAuth 1.0a request signing is not provided; plug it in as an
//! [`Authorizer`].

pub mod auth;
pub mod error;
pub mod transport;

pub use auth::{Anonymous, Authorizer, BasicAuth, BearerToken};
pub use error::HttpError;
pub use transport::HttpTransport;
