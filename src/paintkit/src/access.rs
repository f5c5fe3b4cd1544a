//! Typed access into loosely-typed item data
//!
//! Item data arrives as nested JSON-like maps where any key may hold any
//! kind of value. Everything that reads from that tree goes through
//! [`get_typed`] so the "is it there, and is it the right shape" checks
//! live in one place.

use serde_json::{Map, Value};

/// Failure to read a key as a specific type
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("key `{key}` not found")]
    Missing { key: String },

    #[error("key `{key}` has unexpected type: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Borrowing conversion out of a [`Value`].
///
/// Returns `None` when the value is of a different kind.
pub trait FromValue<'a>: Sized {
    /// Human-readable kind name used in [`AccessError::TypeMismatch`]
    const EXPECTED: &'static str;

    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a str {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromValue<'a> for &'a Map<String, Value> {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object()
    }
}

/// Name of a value's JSON kind
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read `key` from `map` as `T`.
///
/// Fails with [`AccessError::Missing`] when the key is absent and
/// [`AccessError::TypeMismatch`] when it holds another kind of value.
pub fn get_typed<'a, T: FromValue<'a>>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<T, AccessError> {
    let value = map.get(key).ok_or_else(|| AccessError::Missing {
        key: key.to_string(),
    })?;

    T::from_value(value).ok_or_else(|| AccessError::TypeMismatch {
        key: key.to_string(),
        expected: T::EXPECTED,
        found: kind_name(value),
    })
}
