//! Schema: declared type and optional default per logical key.
//!
//! The core only ever asks two questions of a schema, both pure functions of
//! the key: "what type is declared?" and "what is the default?". Anything able
//! to answer them implements [`SchemaProvider`]; [`Schema`] is the in-memory
//! implementation, buildable in code or from JSON:
//!
//! ```json
//! {
//!   "greeting": { "type": "string", "default": "Hello, {0}!" },
//!   "retries":  { "type": "integer", "default": 3 },
//!   "colors":   { "type": "string-map", "default": { "red": "Red" } },
//!   "title":    { "type": "string" }
//! }
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde::Deserialize;

use super::error::SchemaError;
use super::value::{DeclaredType, Value};

/// Read-only source of per-key type declarations and defaults.
pub trait SchemaProvider: Send + Sync {
    /// Declared type for `key`, or `None` if the key is not schematized.
    fn declared_type(&self, key: &str) -> Option<DeclaredType>;

    /// Declared default for `key`, in its native type.
    fn default_value(&self, key: &str) -> Option<Value>;
}

/// Shared handle to an immutable schema.
pub type SharedSchema = Arc<dyn SchemaProvider>;

/// One schema declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub declared: DeclaredType,
    pub default: Option<Value>,
}

/// In-memory schema keyed by logical key.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: HashMap<String, SchemaEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchemaEntry {
    #[serde(rename = "type")]
    declared: DeclaredType,
    #[serde(default)]
    default: Option<serde_json::Value>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` without a default.
    pub fn declare(mut self, key: impl Into<String>, declared: DeclaredType) -> Self {
        self.entries.insert(
            key.into(),
            SchemaEntry {
                declared,
                default: None,
            },
        );
        self
    }

    /// Declare `key` with a default value.
    ///
    /// Fails if the default's runtime type does not match `declared`.
    pub fn declare_with_default(
        mut self,
        key: impl Into<String>,
        declared: DeclaredType,
        default: impl Into<Value>,
    ) -> Result<Self, SchemaError> {
        let key = key.into();
        let default = default.into();
        if !default.matches(declared) {
            return Err(SchemaError::DefaultTypeMismatch {
                key,
                declared,
                found: default.kind(),
            });
        }
        self.entries.insert(
            key,
            SchemaEntry {
                declared,
                default: Some(default),
            },
        );
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key)
    }

    /// All declared keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a schema from its JSON form.
    pub fn from_json(content: &str) -> Result<Self, SchemaError> {
        let raw: BTreeMap<String, RawSchemaEntry> = serde_json::from_str(content)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (key, entry) in raw {
            let default = entry
                .default
                .map(|json| json_to_value(&key, entry.declared, json))
                .transpose()?;
            entries.insert(
                key,
                SchemaEntry {
                    declared: entry.declared,
                    default,
                },
            );
        }
        Ok(Self { entries })
    }
}

impl SchemaProvider for Schema {
    fn declared_type(&self, key: &str) -> Option<DeclaredType> {
        self.entries.get(key).map(|e| e.declared)
    }

    fn default_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).and_then(|e| e.default.clone())
    }
}

fn json_to_value(
    key: &str,
    declared: DeclaredType,
    json: serde_json::Value,
) -> Result<Value, SchemaError> {
    use serde_json::Value as Json;

    let invalid = || SchemaError::InvalidDefault {
        key: key.to_string(),
        declared,
    };

    let value = match (declared, json) {
        (DeclaredType::Boolean, Json::Bool(b)) => Value::Boolean(b),
        (DeclaredType::Integer, Json::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::Integer)
            .ok_or_else(invalid)?,
        (DeclaredType::Float, Json::Number(n)) => {
            Value::Float(n.as_f64().ok_or_else(invalid)? as f32)
        }
        (DeclaredType::Double, Json::Number(n)) => Value::Double(n.as_f64().ok_or_else(invalid)?),
        (DeclaredType::String, Json::String(s)) => Value::String(s),
        (DeclaredType::StringArray, Json::Array(items)) => Value::StringArray(
            items
                .into_iter()
                .map(|item| match item {
                    Json::String(s) => Ok(s),
                    _ => Err(invalid()),
                })
                .collect::<Result<_, _>>()?,
        ),
        (DeclaredType::StringMap, Json::Object(map)) => Value::StringMap(
            map.into_iter()
                .map(|(k, v)| match v {
                    Json::String(s) => Ok((k, s)),
                    _ => Err(invalid()),
                })
                .collect::<Result<_, _>>()?,
        ),
        // Flat [key, value, ...] list, as map defaults are often written.
        (DeclaredType::StringMap, Json::Array(items)) => {
            let flat = items
                .iter()
                .map(|item| item.as_str().ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Value::map_from_pairs(&flat)
        }
        _ => return Err(invalid()),
    };
    Ok(value)
}
