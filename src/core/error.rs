//! Error types for loading, resolution and schema construction.

use thiserror::Error;

use super::format::PatternError;
use super::value::{DeclaredType, ValueKind};

/// A load failed; the table keeps the entries it had before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("malformed {expected} value for key '{key}': \"{value}\"{}", line_suffix(.line))]
    MalformedValue {
        key: String,
        value: String,
        expected: DeclaredType,
        line: Option<usize>,
    },

    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl LoadError {
    /// Source line the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::MalformedValue { line, .. } => *line,
            LoadError::Syntax { line, .. } => Some(*line),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {})", l)).unwrap_or_default()
}

/// A resolution call was used incorrectly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("format arguments supplied for key '{key}', which resolved to a {found} value")]
    NonFormattable { key: String, found: ValueKind },

    #[error("invalid message pattern for key '{key}': {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: PatternError,
    },

    #[error("key '{key}' resolved to a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: DeclaredType,
        found: ValueKind,
    },
}

/// A schema declaration is inconsistent.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("default for key '{key}' is a {found} value, but the key is declared {declared}")]
    DefaultTypeMismatch {
        key: String,
        declared: DeclaredType,
        found: ValueKind,
    },

    #[error("default for key '{key}' is not a valid {declared} value")]
    InvalidDefault { key: String, declared: DeclaredType },

    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}
