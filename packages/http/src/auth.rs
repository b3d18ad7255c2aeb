//! Request authorizers.
//!
//! An [`Authorizer`] decorates each outgoing request with credentials. The
//! transport calls it last, after the URL, parameters and identity headers
//! are in place.

use reqwest::blocking::RequestBuilder;

pub trait Authorizer: Send + Sync + std::fmt::Debug {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Sends requests without credentials. Only public endpoints will answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Authorizer for Anonymous {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

/// `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl Authorizer for BearerToken {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// HTTP basic authentication with the account's screen name and password.
#[derive(Clone)]
pub struct BasicAuth {
    user: String,
    password: String,
}

impl BasicAuth {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Authorizer for BasicAuth {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.user, Some(&self.password))
    }
}
