//! Typed values stored against keys
//!
//! Every value in a store is exactly one of six kinds. There is no implicit
//! multi-typing: a value decoded as an Integer stays an Integer until a
//! caller replaces it. Structured values carry an arbitrary JSON-shaped tree
//! (arrays, objects, nested scalars) as a `serde_json::Value`.

use serde_json::Value as Json;

/// A value held in the store.
///
/// Integers and floats are kept distinct: `5` and `5.0` are different
/// values with different kinds, and the file format preserves the split.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    String(String),
    /// A JSON-shaped tree, persisted inline as base64-encoded JSON.
    Structured(Json),
}

/// Discriminant for [`Value`], used for kind comparison without looking at
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    Null,
    String,
    Structured,
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
            Value::String(_) => ValueKind::String,
            Value::Structured(_) => ValueKind::Structured,
        }
    }

    /// Convert into the equivalent JSON value.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Integer(n) => Json::from(*n),
            Value::Float(f) => {
                // f64 -> Number can fail for NaN/inf; those degrade to null
                serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number)
            }
            Value::Boolean(b) => Json::Bool(*b),
            Value::Null => Json::Null,
            Value::String(s) => Json::String(s.clone()),
            Value::Structured(tree) => tree.clone(),
        }
    }

    /// Build a value from a JSON value.
    ///
    /// Scalars map to the matching scalar kind (whole numbers become
    /// Integer, everything else numeric becomes Float); arrays and objects
    /// become Structured.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            Json::String(s) => Value::String(s),
            tree @ (Json::Array(_) | Json::Object(_)) => Value::Structured(tree),
        }
    }

    /// The string payload, if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
