//! Resolution of logical keys against a loaded table.
//!
//! Resolution order for `resolve(key, args)`:
//!
//! 1. The table holds `key` with a value: that value.
//! 2. The table holds `key` as [`Value::Null`]: the table's raw-string
//!    lookup, which walks its defaults chain.
//! 3. The table lacks `key`: the schema default. With no default, an
//!    [`UnresolvedKey`] diagnostic is emitted and the result is `None`.
//!
//! Non-empty `args` format a string result as a message pattern and are an
//! error for any other result.

use std::{fmt::Display, sync::Arc};

use dashmap::DashMap;

use super::diagnostics::{DiagnosticSink, TracingSink, UnresolvedKey};
use super::error::ResolveError;
use super::format::MessagePattern;
use super::schema::SharedSchema;
use super::table::TypedPropertyTable;
use super::value::{DeclaredType, Value};

/// Schema metadata for one key, computed once per proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionDescriptor {
    /// Default in its native type, if the schema declares one.
    pub default: Option<Value>,
    /// Whether the key is expected to hold a message pattern.
    pub formattable: bool,
}

impl ResolutionDescriptor {
    fn build(schema: &SharedSchema, key: &str) -> Self {
        let declared = schema.declared_type(key);
        Self {
            default: schema.default_value(key),
            formattable: matches!(declared, None | Some(DeclaredType::String)),
        }
    }
}

/// Answers lookups for one locale's table.
pub struct ResolutionProxy {
    schema: SharedSchema,
    table: Arc<TypedPropertyTable>,
    locale: String,
    sink: Arc<dyn DiagnosticSink>,
    descriptors: DashMap<String, Arc<ResolutionDescriptor>>,
}

impl ResolutionProxy {
    /// Create a proxy reporting unresolved keys through `tracing`.
    pub fn new(
        schema: SharedSchema,
        table: Arc<TypedPropertyTable>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            table,
            locale: locale.into(),
            sink: Arc::new(TracingSink),
            descriptors: DashMap::new(),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn table(&self) -> &TypedPropertyTable {
        &self.table
    }

    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }

    /// Cached descriptor for `key`, built on first use.
    pub fn descriptor(&self, key: &str) -> Arc<ResolutionDescriptor> {
        if let Some(found) = self.descriptors.get(key) {
            return Arc::clone(found.value());
        }
        // Built under the shard lock; a stored descriptor is never replaced.
        self.descriptors
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(ResolutionDescriptor::build(&self.schema, key)))
            .value()
            .clone()
    }

    /// Resolve `key`, formatting a string result with `args` when given.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NonFormattable`] if `args` is non-empty and the
    ///   result is not a string.
    /// - [`ResolveError::InvalidPattern`] if the string is not a valid
    ///   message pattern.
    pub fn resolve(&self, key: &str, args: &[&dyn Display]) -> Result<Option<Value>, ResolveError> {
        let descriptor = self.descriptor(key);

        let resolved = match self.table.get(key) {
            Some(Value::Null) => self
                .table
                .get_property(key)
                .map(|s| Value::String(s.to_string())),
            Some(value) => Some(value.clone()),
            None => {
                if descriptor.default.is_none() {
                    self.sink
                        .unresolved_key(UnresolvedKey::new(key, self.locale.as_str()));
                }
                descriptor.default.clone()
            }
        };

        if args.is_empty() {
            return Ok(resolved);
        }

        match resolved {
            Some(Value::String(pattern)) => {
                let pattern =
                    MessagePattern::parse(&pattern).map_err(|source| ResolveError::InvalidPattern {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Some(Value::String(pattern.format(args))))
            }
            other => Err(ResolveError::NonFormattable {
                key: key.to_string(),
                found: Value::kind_of(other.as_ref()),
            }),
        }
    }
}
