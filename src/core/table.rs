//! Typed property table.
//!
//! Turns an ordered stream of raw `(key, value)` pairs into typed values, as
//! declared by a [`SchemaProvider`].
//!
//! # Continuation grammar
//!
//! A key declared `string-map` lists its sub-keys as its value. The lines
//! that immediately follow and whose keys are in that list are folded into
//! the map instead of becoming top-level entries:
//!
//! ```text
//! colors=red,blue      -> colors = { red: "Red", blue: "Blue" }
//! red=Red
//! blue=Blue
//! title=Palette        -> closes the map; top-level entry
//! ```
//!
//! # Invariants
//!
//! 1. **Typed entries**: after a successful load, every loaded entry for a
//!    schematized key has that key's declared runtime type. Unschematized keys
//!    hold raw strings.
//!
//! 2. **All or nothing**: a load that fails leaves the table exactly as it was
//!    before the call.
//!
//! 3. **No state between loads**: the pending map entry lives inside one
//!    `load` call, so consecutive loads never share continuation state.

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use super::error::LoadError;
use super::parsers::properties::parse_properties;
use super::schema::{SchemaProvider, SharedSchema};
use super::split::split_unescaped_commas;
use super::value::{DeclaredType, Value};

/// One raw `key=value` pair from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: String,
    /// 1-based source line, when the source knows it.
    pub line: Option<usize>,
}

impl RawEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for RawEntry {
    fn from((key, value): (K, V)) -> Self {
        RawEntry::new(key, value)
    }
}

/// Typed key/value mapping loaded against a schema.
pub struct TypedPropertyTable {
    schema: SharedSchema,
    entries: HashMap<String, Value>,
    defaults: Option<Arc<TypedPropertyTable>>,
}

impl std::fmt::Debug for TypedPropertyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedPropertyTable")
            .field("entries", &self.entries)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl TypedPropertyTable {
    pub fn new(schema: SharedSchema) -> Self {
        Self {
            schema,
            entries: HashMap::new(),
            defaults: None,
        }
    }

    /// Attach a parent table consulted by [`get_property`](Self::get_property).
    pub fn with_defaults(mut self, defaults: Arc<TypedPropertyTable>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }

    /// Load raw entries in order, casting each to its declared type.
    ///
    /// Entries from earlier loads stay unless overwritten. Returns the number
    /// of raw entries consumed.
    ///
    /// # Errors
    ///
    /// [`LoadError::MalformedValue`] if a numeric value does not parse. The
    /// table is left unchanged.
    pub fn load<I, E>(&mut self, entries: I) -> Result<usize, LoadError>
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        let mut state = LoadState::new(self.schema.as_ref(), self.entries.clone());
        let mut consumed = 0;
        for entry in entries {
            state.put(entry.into())?;
            consumed += 1;
        }
        self.entries = state.finish();
        debug!(
            consumed,
            entries = self.entries.len(),
            "property table loaded"
        );
        Ok(consumed)
    }

    /// Parse `.properties` text and load it.
    pub fn load_str(&mut self, content: &str) -> Result<usize, LoadError> {
        let entries = parse_properties(content)?;
        self.load(entries)
    }

    /// Typed value stored under `key`. Does not consult the defaults table.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw-string lookup: this table's value if it is a string, otherwise
    /// the defaults chain.
    pub fn get_property(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => self.defaults.as_ref().and_then(|d| d.get_property(key)),
        }
    }

    /// Store a value directly, bypassing casting and the continuation grammar.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map entry whose sub-key lines are still being collected.
#[derive(Debug)]
struct PendingMapEntry {
    key: String,
    sub_keys: Vec<String>,
}

impl PendingMapEntry {
    fn expects(&self, key: &str) -> bool {
        self.sub_keys.iter().any(|k| k == key)
    }
}

/// State scoped to a single load call.
struct LoadState<'a> {
    schema: &'a dyn SchemaProvider,
    staged: HashMap<String, Value>,
    pending: Option<PendingMapEntry>,
}

impl<'a> LoadState<'a> {
    fn new(schema: &'a dyn SchemaProvider, staged: HashMap<String, Value>) -> Self {
        Self {
            schema,
            staged,
            pending: None,
        }
    }

    fn put(&mut self, entry: RawEntry) -> Result<(), LoadError> {
        if let Some(pending) = &self.pending {
            if pending.expects(&entry.key) {
                if let Some(Value::StringMap(map)) = self.staged.get_mut(&pending.key) {
                    map.insert(entry.key, entry.value);
                }
                return Ok(());
            }
            self.pending = None;
        }

        match self.schema.declared_type(&entry.key) {
            Some(DeclaredType::StringMap) => {
                let sub_keys = split_unescaped_commas(&entry.value);
                self.staged
                    .insert(entry.key.clone(), Value::StringMap(Default::default()));
                self.pending = Some(PendingMapEntry {
                    key: entry.key,
                    sub_keys,
                });
            }
            declared => {
                let value = cast(declared, &entry)?;
                self.staged.insert(entry.key, value);
            }
        }
        Ok(())
    }

    fn finish(self) -> HashMap<String, Value> {
        self.staged
    }
}

/// Cast a raw value to `declared`; unschematized keys stay strings.
fn cast(declared: Option<DeclaredType>, entry: &RawEntry) -> Result<Value, LoadError> {
    let raw = entry.value.as_str();
    let malformed = |expected| LoadError::MalformedValue {
        key: entry.key.clone(),
        value: entry.value.clone(),
        expected,
        line: entry.line,
    };

    let value = match declared {
        Some(DeclaredType::Boolean) => Value::Boolean(raw.eq_ignore_ascii_case("true")),
        Some(DeclaredType::Integer) => Value::Integer(
            raw.trim()
                .parse()
                .map_err(|_| malformed(DeclaredType::Integer))?,
        ),
        Some(DeclaredType::Float) => Value::Float(
            raw.trim()
                .parse()
                .map_err(|_| malformed(DeclaredType::Float))?,
        ),
        Some(DeclaredType::Double) => Value::Double(
            raw.trim()
                .parse()
                .map_err(|_| malformed(DeclaredType::Double))?,
        ),
        Some(DeclaredType::StringArray) => Value::StringArray(split_unescaped_commas(raw)),
        Some(DeclaredType::String) | Some(DeclaredType::StringMap) | None => {
            Value::String(raw.to_string())
        }
    };
    Ok(value)
}
