use thiserror::Error;
use warbler::TransportError;

/// Failures building an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Map a request failure to the transport taxonomy.
pub(crate) fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
