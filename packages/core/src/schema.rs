//! Attribute schemas and the shared entity behaviour built on them.
//!
//! Every entity type declares a static [`Schema`]: its kind name and the
//! ordered list of wire attributes it exposes. Structural equality, field-map
//! projection, identifiers and display strings are all driven by that list,
//! never by the concrete Rust fields, so two entities compare equal exactly
//! when their declared attributes do.
//!
//! Two traits split the behaviour:
//!
//! | Trait | Object-safe | Purpose |
//! |-------|-------------|---------|
//! | [`Entity`] | no | construction, hydration hook, client slot, binding |
//! | [`Attributes`] | yes | read-only view used by [`equals`] across types |
//!
//! `Attributes` is implemented for every `Entity` by a blanket impl.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use warbler_routing::{IntoReference, Reference, RoutingError};

use crate::client::Client;
use crate::error::{Error, HydrationError};

/// Attribute name → wire value. Keys keep insertion (schema) order.
pub type FieldMap = serde_json::Map<String, Value>;

/// The ordered attribute list of one entity type.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub kind: &'static str,
    pub attributes: &'static [&'static str],
}

impl Schema {
    pub fn declares(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute)
    }
}

/// A schema-described value holder.
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + 'static {
    const SCHEMA: &'static Schema;

    /// Reshape a decoded response before it is split into entities. Types
    /// whose endpoints wrap several records in one envelope unwrap them into
    /// an array here.
    fn unwrap_envelope(raw: Value) -> Value {
        raw
    }

    /// Post-construction hook, run once after the fields are populated.
    fn hydrated(&mut self) -> Result<(), HydrationError> {
        Ok(())
    }

    /// The client this entity was bound to, if any.
    fn client(&self) -> Option<&Client>;

    fn client_slot(&mut self) -> &mut Option<Client>;

    /// Attach `client`. Types that bind nested entities or extend their
    /// capabilities override this.
    fn bless(&mut self, client: &Client) {
        *self.client_slot() = Some(client.clone());
    }

    /// Build an entity from a field map. Unknown keys are ignored and absent
    /// keys stay unset; a value of the wrong shape is a [`HydrationError`].
    fn from_fields(fields: FieldMap) -> Result<Self, Error> {
        let mut entity: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| HydrationError::new(Self::SCHEMA.kind, e))?;
        entity.hydrated()?;
        Ok(entity)
    }
}

/// Read-only, type-erased view of an entity's declared attributes.
pub trait Attributes: Debug {
    fn schema(&self) -> &'static Schema;

    /// Every present schema attribute, nested entities projected recursively.
    fn to_field_map(&self) -> FieldMap;

    /// `None` when this type has no accessor for `name`; `Some(Value::Null)`
    /// when it does but the value is unset.
    fn attribute(&self, name: &str) -> Option<Value> {
        if !self.schema().declares(name) {
            return None;
        }
        Some(self.to_field_map().remove(name).unwrap_or(Value::Null))
    }

    /// The numeric `id` attribute, when declared and present.
    fn identifier(&self) -> Option<u64> {
        self.attribute("id").and_then(|v| v.as_u64())
    }

    /// The `text` attribute when the type declares one, otherwise
    /// `<Kind id>` or `<Kind>`.
    fn to_display_string(&self) -> String {
        if let Some(Value::String(text)) = self.attribute("text") {
            return text;
        }
        match self.identifier() {
            Some(id) => format!("<{} {}>", self.schema().kind, id),
            None => format!("<{}>", self.schema().kind),
        }
    }
}

impl<E: Entity> Attributes for E {
    fn schema(&self) -> &'static Schema {
        E::SCHEMA
    }

    fn to_field_map(&self) -> FieldMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Entities always serialize as objects.
            _ => FieldMap::new(),
        }
    }
}

/// Any entity resolves to its identifier.
impl IntoReference for &dyn Attributes {
    fn into_reference(self) -> std::result::Result<Reference, RoutingError> {
        self.identifier().map(Reference::Id).ok_or_else(|| {
            RoutingError::InvalidReference(format!("{} has no identifier", self.schema().kind))
        })
    }
}

/// Structural equality driven by `receiver`'s schema.
///
/// Each attribute the receiver declares is read from both sides and compared
/// in schema order; the first mismatch returns `Ok(false)`. If `other` has no
/// accessor for an attribute reached before a mismatch, the comparison fails
/// with [`Error::MissingCapability`]. `equals(a, b)` and `equals(b, a)` can
/// therefore disagree when the operands are of different types.
pub fn equals(receiver: &dyn Attributes, other: &dyn Attributes) -> Result<bool, Error> {
    let schema = receiver.schema();
    let mine = receiver.to_field_map();
    let theirs = other.to_field_map();
    for &attribute in schema.attributes {
        if !other.schema().declares(attribute) {
            return Err(Error::MissingCapability {
                kind: other.schema().kind,
                attribute,
            });
        }
        if mine.get(attribute) != theirs.get(attribute) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `PartialEq` through [`equals`] and `Display` through
/// [`Attributes::to_display_string`].
macro_rules! structural_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                matches!($crate::schema::equals(self, other), Ok(true))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::schema::Attributes;
                f.write_str(&self.to_display_string())
            }
        }
    )+};
}

pub(crate) use structural_value;
