// Typed values held by records
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A raw, decoded scalar as produced by the format readers.
///
/// CSV yields only strings; JSON and YAML yield typed values.
pub type RawValue = JsonValue;

/// Canonical typed value of a single field
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Absent,
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

/// Tag identifying the variant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Integer,
    Float,
    Boolean,
    Text,
    Absent,
    List,
    Map,
}

impl TypeTag {
    /// Human readable name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Boolean => "boolean",
            TypeTag::Text => "text",
            TypeTag::Absent => "absent",
            TypeTag::List => "list",
            TypeTag::Map => "map",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Convert a raw value structurally, without coercing any text.
    ///
    /// Nested lists and maps keep their content as decoded; only
    /// top-level scalars go through [`crate::data::coerce`].
    pub fn from_raw(raw: &RawValue) -> Self {
        match raw {
            JsonValue::Null => Value::Absent,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Absent, Value::Float),
            },
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from_raw).collect()),
            JsonValue::Object(obj) => Value::Map(
                obj.iter()
                    .map(|(key, value)| (key.clone(), Value::from_raw(value)))
                    .collect(),
            ),
        }
    }

    /// Convert back to the raw representation used by the writers
    pub fn to_raw(&self) -> RawValue {
        match self {
            Value::Integer(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Absent => JsonValue::Null,
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_raw).collect()),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_raw()))
                    .collect(),
            ),
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Text(_) => TypeTag::Text,
            Value::Absent => TypeTag::Absent,
            Value::List(_) => TypeTag::List,
            Value::Map(_) => TypeTag::Map,
        }
    }

    /// True for integers and floats
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Numeric content as a float, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Integer equivalent of a float when it holds an exact integral value
/// inside the `i64` range.
pub(crate) fn float_as_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

// Integers and floats compare by numeric value; every other pairing of
// different tags is unequal. NaN equals NaN so that values can key maps.
// Maps are equal only with the same entries in the same order, which is
// also the order `Hash` feeds them in.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
                float_as_integer(*f) == Some(*i)
            }
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Absent, Value::Absent) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Integer(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => match float_as_integer(*f) {
                Some(i) => {
                    0u8.hash(state);
                    i.hash(state);
                }
                None if f.is_nan() => 1u8.hash(state),
                None => {
                    1u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            Value::Boolean(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            Value::Text(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Value::Absent => 4u8.hash(state),
            Value::List(items) => {
                5u8.hash(state);
                items.hash(state);
            }
            Value::Map(map) => {
                6u8.hash(state);
                map.len().hash(state);
                for (key, value) in map {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fractional part of whole floats ("450.0")
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::Absent => Ok(()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) | Value::Absent => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
