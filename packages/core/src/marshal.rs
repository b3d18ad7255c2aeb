//! The marshalling pipeline: raw JSON in, hydrated entities out.
//!
//! | Input | Result |
//! |-------|--------|
//! | object | [`Payload::One`], or the object's [`HydrationError`] |
//! | array | [`Payload::Many`]; non-object elements skipped, failures isolated |
//! | anything else, or unparsable text | [`Error::MalformedPayload`] |

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::{Error, HydrationError, Result};
use crate::schema::Entity;

/// A response body, either still text or already decoded.
#[derive(Debug, Clone)]
pub enum Raw<'a> {
    Text(&'a str),
    Json(Value),
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(text: &'a str) -> Self {
        Raw::Text(text)
    }
}

impl From<Value> for Raw<'_> {
    fn from(value: Value) -> Self {
        Raw::Json(value)
    }
}

/// An array element that failed to hydrate.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position in the original array, counting skipped non-objects.
    pub index: usize,
    pub error: HydrationError,
}

/// The entities hydrated from an array, plus the elements that failed.
#[derive(Debug, Clone)]
pub struct Batch<E> {
    pub entities: Vec<E>,
    pub rejected: Vec<Rejected>,
}

impl<E> Default for Batch<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<E> Batch<E> {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl<E> IntoIterator for Batch<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Batch<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// What one response unmarshalled into.
#[derive(Debug, Clone)]
pub enum Payload<E> {
    One(E),
    Many(Batch<E>),
}

impl<E: Entity> Payload<E> {
    /// The single entity of an object response.
    pub fn into_one(self) -> Result<E> {
        match self {
            Payload::One(entity) => Ok(entity),
            Payload::Many(_) => Err(Error::MalformedPayload(format!(
                "expected a single {} object, got an array",
                E::SCHEMA.kind
            ))),
        }
    }

    /// The entities of an array response; an object response becomes a
    /// batch of one.
    pub fn into_many(self) -> Batch<E> {
        match self {
            Payload::One(entity) => Batch {
                entities: vec![entity],
                rejected: Vec::new(),
            },
            Payload::Many(batch) => batch,
        }
    }

    /// Bind every entity to `client`.
    pub fn bind(&mut self, client: &Client) {
        match self {
            Payload::One(entity) => entity.bless(client),
            Payload::Many(batch) => {
                let entities = std::mem::take(&mut batch.entities);
                batch.entities = crate::bind::bind_all(entities, client);
            }
        }
    }
}

/// Unmarshal `raw` into entities of type `E`.
pub fn unmarshal<'a, E: Entity>(raw: impl Into<Raw<'a>>) -> Result<Payload<E>> {
    let value = match raw.into() {
        Raw::Text(text) => serde_json::from_str(text)
            .map_err(|e| Error::MalformedPayload(format!("not JSON: {}", e)))?,
        Raw::Json(value) => value,
    };

    match E::unwrap_envelope(value) {
        Value::Object(fields) => E::from_fields(fields).map(Payload::One),
        Value::Array(items) => Ok(Payload::Many(hydrate_all::<E>(items))),
        other => Err(Error::MalformedPayload(format!(
            "expected an object or an array for {}, got {}",
            E::SCHEMA.kind,
            other
        ))),
    }
}

fn hydrate_all<E: Entity>(items: Vec<Value>) -> Batch<E> {
    let mut batch = Batch::default();
    for (index, item) in items.into_iter().enumerate() {
        let fields = match item {
            Value::Object(fields) => fields,
            other => {
                debug!(index, kind = E::SCHEMA.kind, "skipping non-object element {}", other);
                continue;
            }
        };
        match E::from_fields(fields) {
            Ok(entity) => batch.entities.push(entity),
            Err(Error::Hydration(error)) => {
                warn!(index, kind = E::SCHEMA.kind, %error, "rejected array element");
                batch.rejected.push(Rejected { index, error });
            }
            Err(other) => {
                let error = HydrationError::new(E::SCHEMA.kind, other);
                warn!(index, kind = E::SCHEMA.kind, %error, "rejected array element");
                batch.rejected.push(Rejected { index, error });
            }
        }
    }
    batch
}

// --- tests ------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Status, User};
    use serde_json::json;

    #[test]
    fn object_text_yields_one() {
        let payload = unmarshal::<User>(r#"{"id": 42, "screen_name": "jdoe"}"#).unwrap();
        let user = payload.into_one().unwrap();
        assert_eq!(user.id, Some(42));
    }

    #[test]
    fn array_yields_many_and_skips_non_objects() {
        let raw = json!([{"id": 1}, 7, "noise", null, {"id": 2}]);
        let batch = unmarshal::<User>(raw).unwrap().into_many();
        let ids: Vec<_> = batch.iter().filter_map(|u| u.id).collect();
        assert_eq!(ids, [1, 2]);
        assert!(batch.is_complete());
    }

    #[test]
    fn scalars_and_garbage_are_malformed() {
        assert!(matches!(unmarshal::<User>(json!(42)), Err(Error::MalformedPayload(_))));
        assert!(matches!(unmarshal::<User>("\"text\""), Err(Error::MalformedPayload(_))));
        assert!(matches!(unmarshal::<User>("{not json"), Err(Error::MalformedPayload(_))));
    }

    #[test]
    fn single_bad_element_is_isolated() {
        let raw = json!([
            {"id": 1, "text": "one"},
            {"id": 2, "text": "two", "created_at": "not a time"},
            {"id": 3, "text": "three"}
        ]);
        let batch = unmarshal::<Status>(raw).unwrap().into_many();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].index, 1);
        assert_eq!(batch.rejected[0].error.kind, "Status");
    }

    #[test]
    fn single_bad_object_fails() {
        let raw = json!({"id": "forty-two"});
        assert!(matches!(unmarshal::<User>(raw), Err(Error::Hydration(_))));
    }

    #[test]
    fn array_payload_is_not_one() {
        let payload = unmarshal::<Location>(json!([])).unwrap();
        assert!(matches!(payload.into_one(), Err(Error::MalformedPayload(_))));
    }

    #[test]
    fn empty_array_is_empty_batch() {
        let batch = unmarshal::<Location>(json!([])).unwrap().into_many();
        assert!(batch.is_empty());
    }
}
