//! Pre-flight errors raised while planning a request.
//!
//! Every variant is produced before any transport call is attempted, so a
//! caller receiving one of these knows no network cost was incurred.

use thiserror::Error;

use crate::action::{Action, Resource};

/// Errors returned by identifier resolution and endpoint routing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("unsupported action {action:?} for {resource}")]
    UnsupportedAction { resource: Resource, action: String },

    #[error("{action} is not implemented for {resource}")]
    NotImplemented { resource: Resource, action: Action },
}

impl RoutingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RoutingError::InvalidReference(reason.into())
    }

    pub(crate) fn unsupported(resource: Resource, action: impl ToString) -> Self {
        RoutingError::UnsupportedAction {
            resource,
            action: action.to_string(),
        }
    }
}
