//! JSON mapping layer.
//!
//! Backlog payloads are loosely typed: optional keys may be absent or
//! explicitly `null`, timestamps travel as fixed-format strings, and
//! enumerations are keyed by integer. This module holds the primitive
//! codecs and field accessors that every entity mapper is built from,
//! plus the [`Mappable`] trait tying the forward (`from_json`) and
//! reverse (`to_dict`) directions together.
//!
//! Mapping is all-or-nothing: a failure anywhere aborts the outer
//! construction and no partially built entity escapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{BacklogError, Result};

/// Wire format for every Backlog timestamp. Always UTC, literal `Z`
/// suffix, no sub-second precision.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a Backlog timestamp string into an instant.
///
/// # Errors
///
/// Returns [`BacklogError::InvalidTimestamp`] when the string does not
/// match [`DATETIME_FORMAT`].
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| BacklogError::InvalidTimestamp(s.to_string()))
}

/// Render an instant in the Backlog wire format.
///
/// Exact inverse of [`parse_timestamp`] for any instant with a zero
/// sub-second component.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(DATETIME_FORMAT).to_string()
}

/// Conversion between one JSON object and one typed entity.
///
/// Each entity implements the forward direction explicitly, field by
/// field, instead of deriving it: required keys fail loudly when absent,
/// optional keys distinguish absent/`null` from present-but-empty, and
/// nested entities are built bottom-up through their own `from_json`.
pub trait Mappable: Sized {
    /// Entity name used in mapping error messages.
    const ENTITY: &'static str;

    /// Build one entity from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails when `value` is not an object, a required key is missing,
    /// a field holds an untypable value, or a nested mapper fails.
    /// Nested failures propagate unchanged.
    fn from_json(value: &Value) -> Result<Self>;

    /// Convert this entity back into a JSON object map.
    ///
    /// Keys are the wire (camelCase) names in field declaration order.
    /// Unset optional fields are omitted entirely, never emitted as
    /// `null`.
    fn to_dict(&self) -> Map<String, Value>;

    /// Serialize this entity to a JSON string.
    ///
    /// Non-ASCII characters are preserved literally. A value the
    /// serializer cannot render maps to
    /// [`BacklogError::UnsupportedValue`]; no field in the documented
    /// data model can trigger it.
    fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&Value::Object(self.to_dict()))
            .map_err(|e| BacklogError::UnsupportedValue(e.to_string()))
    }
}

/// Map a JSON array element-wise, preserving server order.
pub fn from_json_array<T: Mappable>(value: &Value) -> Result<Vec<T>> {
    let items = value
        .as_array()
        .ok_or(BacklogError::UnexpectedType {
            entity: T::ENTITY,
            field: "(root)",
            expected: "an array",
        })?;
    items.iter().map(T::from_json).collect()
}

/// Unwrap a `{"count": N}` response to the bare integer.
pub fn count_from_json(value: &Value) -> Result<u64> {
    let obj = as_object("Count", value)?;
    req_u64("Count", obj, "count")
}

pub(crate) fn as_object<'a>(
    entity: &'static str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or(BacklogError::UnexpectedType {
        entity,
        field: "(root)",
        expected: "an object",
    })
}

fn require<'a>(
    entity: &'static str,
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value> {
    obj.get(field)
        .ok_or(BacklogError::MissingField { entity, field })
}

pub(crate) fn req_str(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String> {
    require(entity, obj, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "a string",
        })
}

pub(crate) fn req_i64(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<i64> {
    require(entity, obj, field)?
        .as_i64()
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "an integer",
        })
}

pub(crate) fn req_u64(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<u64> {
    require(entity, obj, field)?
        .as_u64()
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "an unsigned integer",
        })
}

pub(crate) fn req_bool(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<bool> {
    require(entity, obj, field)?
        .as_bool()
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "a boolean",
        })
}

pub(crate) fn req_timestamp(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>> {
    parse_timestamp(&req_str(entity, obj, field)?)
}

/// Required key whose value may be `null`; the raw value passes through
/// untyped.
pub(crate) fn req_nullable(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Value>> {
    match require(entity, obj, field)? {
        Value::Null => Ok(None),
        value => Ok(Some(value.clone())),
    }
}

pub(crate) fn req_entity<T: Mappable>(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<T> {
    T::from_json(require(entity, obj, field)?)
}

pub(crate) fn req_entities<T: Mappable>(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<T>> {
    let items = require(entity, obj, field)?
        .as_array()
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "an array",
        })?;
    items.iter().map(T::from_json).collect()
}

/// Required key holding an array of untyped values, passed through as-is.
pub(crate) fn req_raw_array(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<Value>> {
    require(entity, obj, field)?
        .as_array()
        .cloned()
        .ok_or(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "an array",
        })
}

// Optional accessors: an absent key and an explicit `null` both map to
// `None`. Presence is checked, never truthiness; an empty string is a
// present value.

pub(crate) fn opt_str(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(BacklogError::UnexpectedType {
            entity,
            field,
            expected: "a string",
        }),
    }
}

pub(crate) fn opt_timestamp(
    entity: &'static str,
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>> {
    opt_str(entity, obj, field)?
        .map(|s| parse_timestamp(&s))
        .transpose()
}

pub(crate) fn opt_entity<T: Mappable>(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(T::from_json(value)?)),
    }
}

// Reverse-direction helpers.

pub(crate) fn entity_to_value<T: Mappable>(entity: &T) -> Value {
    Value::Object(entity.to_dict())
}

pub(crate) fn entities_to_value<T: Mappable>(entities: &[T]) -> Value {
    Value::Array(entities.iter().map(entity_to_value).collect())
}
