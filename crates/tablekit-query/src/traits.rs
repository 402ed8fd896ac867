//! Row access.
//!
//! This module provides the [`Row`] trait through which the filter engine
//! reads field values. It is implemented for JSON objects and for maps of
//! [`CellValue`]s, and can be implemented by hand for any struct.

use std::collections::{BTreeMap, HashMap};

use crate::value::{CellValue, Value};

/// A record whose fields can be read by name.
///
/// The engine never assumes homogeneity across rows: each row decides what
/// it returns for a given field, and [`Value::None`] stands for "missing".
/// An explicit null is [`Value::Null`].
///
/// # Manual Implementation
///
/// ```
/// use tablekit_query::{Row, Value, Number};
///
/// struct Invoice {
///     customer: String,
///     total: f64,
/// }
///
/// impl Row for Invoice {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "customer" => Value::String(&self.customer),
///             "total" => Value::Number(Number::F64(self.total)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value of a field, or [`Value::None`] if it is absent.
    fn field(&self, name: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for the `*_with` filter
    /// functions.
    fn accessor<'a>(row: &'a Self, name: &str) -> Value<'a>
    where
        Self: Sized,
    {
        row.field(name)
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map(Value::from).unwrap_or(Value::None)
    }
}

/// Objects expose their members; any other JSON shape has no fields.
impl Row for serde_json::Value {
    fn field(&self, name: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => Value::None,
        }
    }
}

impl<S: std::hash::BuildHasher> Row for HashMap<String, CellValue, S> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map(CellValue::as_value).unwrap_or(Value::None)
    }
}

impl Row for BTreeMap<String, CellValue> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map(CellValue::as_value).unwrap_or(Value::None)
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}
