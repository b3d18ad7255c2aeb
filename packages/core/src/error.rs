//! Error taxonomy for the client library.
//!
//! Every failure reaches the immediate caller; nothing is retried. Variants
//! split into *pre-flight* failures (no request was sent) and *post-flight*
//! failures (the transport was invoked); see [`Error::is_preflight`].

use thiserror::Error;
use warbler_routing::{Action, Resource, RoutingError};

use crate::transport::TransportError;

/// Result type for client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A nested field could not be converted to its target entity or scalar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to hydrate {kind}: {message}")]
pub struct HydrationError {
    /// Entity kind being constructed, e.g. `"Status"`.
    pub kind: &'static str,
    pub message: String,
}

impl HydrationError {
    pub fn new(kind: &'static str, message: impl ToString) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Errors returned by marshalling, binding and request dispatch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Hydration(#[from] HydrationError),

    #[error("{kind} has no {attribute:?} accessor")]
    MissingCapability {
        kind: &'static str,
        attribute: &'static str,
    },

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("unsupported action {action:?} for {resource}")]
    UnsupportedAction { resource: Resource, action: String },

    #[error("{action} is not implemented for {resource}")]
    NotImplemented { resource: Resource, action: Action },

    #[error("{0} is not bound to a client")]
    Unbound(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// True when the failure was detected locally, before any transport call.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Error::InvalidReference(_)
                | Error::UnsupportedAction { .. }
                | Error::NotImplemented { .. }
                | Error::Unbound(_)
                | Error::MissingCapability { .. }
        )
    }

    /// True when the transport itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<RoutingError> for Error {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::InvalidReference(msg) => Error::InvalidReference(msg),
            RoutingError::UnsupportedAction { resource, action } => {
                Error::UnsupportedAction { resource, action }
            }
            RoutingError::NotImplemented { resource, action } => {
                Error::NotImplemented { resource, action }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_errors_are_preflight() {
        let e: Error = RoutingError::NotImplemented {
            resource: Resource::Message,
            action: Action::Get,
        }
        .into();
        assert!(e.is_preflight());
        assert!(!e.is_transport());
        assert_eq!(e.to_string(), "get is not implemented for message");
    }

    #[test]
    fn transport_errors_are_postflight() {
        let e: Error = TransportError::Connection("refused".into()).into();
        assert!(e.is_transport());
        assert!(!e.is_preflight());
    }

    #[test]
    fn hydration_message() {
        let e = Error::from(HydrationError::new("Status", "bad timestamp"));
        assert_eq!(e.to_string(), "failed to hydrate Status: bad timestamp");
    }
}
