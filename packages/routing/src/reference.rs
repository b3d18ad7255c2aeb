//! Identifier resolution: turning loosely-typed caller input into a
//! request parameter.
//!
//! A [`Reference`] names a user or a status either by numeric id or by
//! screen name. Callers rarely build one directly; dispatcher methods accept
//! anything implementing [`IntoReference`]:
//!
//! | Input | Resolves to | User parameter |
//! |-------|-------------|----------------|
//! | `u64` / non-negative integer | [`Reference::Id`] | `user_id=<id>` |
//! | `&str` / `String` | [`Reference::Name`] | `screen_name=<name>` |
//! | hydrated entity (in `warbler`) | [`Reference::Id`] from its `id` | `user_id=<id>` |
//! | `serde_json::Value` number / string | as above | as above |
//!
//! Every other shape fails with [`RoutingError::InvalidReference`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::RoutingError;

/// Parameter key for numeric user references.
pub const USER_ID_PARAM: &str = "user_id";
/// Parameter key for screen-name user references.
pub const SCREEN_NAME_PARAM: &str = "screen_name";
/// Parameter key for status and message references.
pub const ID_PARAM: &str = "id";

/// A resolved reference to a user, status or message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Id(u64),
    Name(String),
}

impl Reference {
    /// Build a name reference, validating the screen name.
    ///
    /// A leading `@` is stripped. Empty names and names containing anything
    /// other than ASCII letters, digits and `_` are rejected.
    pub fn name(name: &str) -> Result<Self, RoutingError> {
        let caps = SCREEN_NAME_RE.captures(name.trim()).ok_or_else(|| {
            RoutingError::invalid(format!("{:?} is not a valid screen name", name))
        })?;
        Ok(Reference::Name(caps[1].to_string()))
    }

    /// The single request parameter identifying a user.
    pub fn user_param(&self) -> (&'static str, String) {
        match self {
            Reference::Id(id) => (USER_ID_PARAM, id.to_string()),
            Reference::Name(name) => (SCREEN_NAME_PARAM, name.clone()),
        }
    }

    /// The request parameter identifying a status or message.
    ///
    /// Statuses and messages have no names, so only numeric references are
    /// accepted.
    pub fn id_param(&self) -> Result<(&'static str, String), RoutingError> {
        match self {
            Reference::Id(id) => Ok((ID_PARAM, id.to_string())),
            Reference::Name(name) => Err(RoutingError::invalid(format!(
                "{:?} is a name; a numeric id is required",
                name
            ))),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Id(id) => write!(f, "{}", id),
            Reference::Name(name) => write!(f, "@{}", name),
        }
    }
}

/// Loose parse used by command-line input: all-digit strings become ids,
/// everything else is treated as a screen name.
///
/// This differs from `IntoReference for &str`, which always produces a name.
impl std::str::FromStr for Reference {
    type Err = RoutingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<u64>()
                .map(Reference::Id)
                .map_err(|e| RoutingError::invalid(format!("{:?}: {}", s, e)));
        }
        Reference::name(trimmed)
    }
}

/// Conversion of caller input into a [`Reference`].
///
/// Implemented for the three accepted input shapes (integer id, name,
/// entity) and for loosely-typed JSON. Resolution is pure and never
/// performs I/O.
pub trait IntoReference {
    fn into_reference(self) -> Result<Reference, RoutingError>;
}

impl IntoReference for Reference {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Ok(self)
    }
}

impl IntoReference for &Reference {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Ok(self.clone())
    }
}

/// A resolution that already happened (or already failed) elsewhere. The
/// error, if any, surfaces at the point the plan resolves its reference.
impl IntoReference for Result<Reference, RoutingError> {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        self
    }
}

impl IntoReference for u64 {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Ok(Reference::Id(self))
    }
}

impl IntoReference for u32 {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Ok(Reference::Id(u64::from(self)))
    }
}

impl IntoReference for i64 {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        u64::try_from(self)
            .map(Reference::Id)
            .map_err(|_| RoutingError::invalid(format!("id must be non-negative, got {}", self)))
    }
}

impl IntoReference for i32 {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        i64::from(self).into_reference()
    }
}

impl IntoReference for &str {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Reference::name(self)
    }
}

impl IntoReference for String {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Reference::name(&self)
    }
}

impl IntoReference for &String {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        Reference::name(self)
    }
}

impl IntoReference for &Value {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        match self {
            Value::Number(n) => n.as_u64().map(Reference::Id).ok_or_else(|| {
                RoutingError::invalid(format!("{} is not a non-negative integer id", n))
            }),
            Value::String(s) => Reference::name(s),
            other => Err(RoutingError::invalid(format!(
                "expected an integer id or a screen name, got {}",
                json_shape(other)
            ))),
        }
    }
}

impl IntoReference for Value {
    fn into_reference(self) -> Result<Reference, RoutingError> {
        (&self).into_reference()
    }
}

fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `^@?([A-Za-z0-9_]+)$`
static SCREEN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?([A-Za-z0-9_]+)$").expect("invalid screen name regex"));
