use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Type a schema declares for a logical key.
///
/// Each variant maps to exactly one runtime [`Value`] variant:
///
/// | Declared | Runtime |
/// |----------|---------|
/// | `Boolean` | `Value::Boolean` |
/// | `Integer` | `Value::Integer` (32-bit) |
/// | `Float` | `Value::Float` (single precision) |
/// | `Double` | `Value::Double` |
/// | `String` | `Value::String` |
/// | `StringArray` | `Value::StringArray` |
/// | `StringMap` | `Value::StringMap` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclaredType {
    Boolean,
    Integer,
    Float,
    Double,
    String,
    StringArray,
    StringMap,
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Boolean => write!(f, "boolean"),
            DeclaredType::Integer => write!(f, "integer"),
            DeclaredType::Float => write!(f, "float"),
            DeclaredType::Double => write!(f, "double"),
            DeclaredType::String => write!(f, "string"),
            DeclaredType::StringArray => write!(f, "string-array"),
            DeclaredType::StringMap => write!(f, "string-map"),
        }
    }
}

/// A typed value stored in a property table or declared as a schema default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Key is present but carries no value.
    Null,
    Boolean(bool),
    Integer(i32),
    Float(f32),
    Double(f64),
    String(String),
    StringArray(Vec<String>),
    StringMap(BTreeMap<String, String>),
}

/// Runtime kind of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Absent,
    Null,
    Boolean,
    Integer,
    Float,
    Double,
    String,
    StringArray,
    StringMap,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Absent => write!(f, "absent"),
            ValueKind::Null => write!(f, "null"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Double => write!(f, "double"),
            ValueKind::String => write!(f, "string"),
            ValueKind::StringArray => write!(f, "string-array"),
            ValueKind::StringMap => write!(f, "string-map"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::StringArray(_) => ValueKind::StringArray,
            Value::StringMap(_) => ValueKind::StringMap,
        }
    }

    /// Kind of an optional value, mapping `None` to [`ValueKind::Absent`].
    pub fn kind_of(value: Option<&Value>) -> ValueKind {
        value.map_or(ValueKind::Absent, Value::kind)
    }

    /// Whether this value has the runtime type `declared` maps to.
    pub fn matches(&self, declared: DeclaredType) -> bool {
        matches!(
            (self, declared),
            (Value::Boolean(_), DeclaredType::Boolean)
                | (Value::Integer(_), DeclaredType::Integer)
                | (Value::Float(_), DeclaredType::Float)
                | (Value::Double(_), DeclaredType::Double)
                | (Value::String(_), DeclaredType::String)
                | (Value::StringArray(_), DeclaredType::StringArray)
                | (Value::StringMap(_), DeclaredType::StringMap)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a map value from a flat `[key, value, key, value, ...]` list.
    ///
    /// A trailing unpaired element is ignored.
    pub fn map_from_pairs(flat: &[&str]) -> Value {
        let map = flat
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();
        Value::StringMap(map)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::StringArray(value)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(value: [&str; N]) -> Self {
        Value::StringArray(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(value: BTreeMap<String, String>) -> Self {
        Value::StringMap(value)
    }
}
