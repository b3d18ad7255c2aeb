//! The transport seam.
//!
//! The dispatcher never talks HTTP itself: it hands a method, a path and the
//! request parameters to a [`Transport`] and gets the response body back.
//! `warbler-http` provides the network implementation; tests substitute
//! recording stubs.

use thiserror::Error;
use warbler_routing::{Method, Params};

/// An authenticated, blocking request capability.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Issue one request and return the response body.
    fn invoke(&self, method: Method, path: &str, params: &Params) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn invoke(&self, method: Method, path: &str, params: &Params) -> Result<String, TransportError> {
        (**self).invoke(method, path, params)
    }
}

/// Failures reported by a transport. Passed to the caller unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}
