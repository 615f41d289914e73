//! Issue types reported by `proptable check`.
//!
//! Each issue is self-contained: the reporter needs nothing beyond the issue
//! itself to print it.

use enum_dispatch::enum_dispatch;

use crate::core::{DeclaredType, LoadError};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    Syntax,
    MalformedValue,
    UnresolvedKey,
    InvalidPattern,
    ReadError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Syntax => write!(f, "syntax"),
            Rule::MalformedValue => write!(f, "malformed-value"),
            Rule::UnresolvedKey => write!(f, "unresolved-key"),
            Rule::InvalidPattern => write!(f, "invalid-pattern"),
            Rule::ReadError => write!(f, "read-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Properties text could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub file_path: String,
    pub line: usize,
    pub message: String,
}

impl SyntaxIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::Syntax
    }
}

/// A value does not parse as its declared type; the whole file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedValueIssue {
    pub file_path: String,
    pub line: Option<usize>,
    pub key: String,
    pub value: String,
    pub expected: DeclaredType,
}

impl MalformedValueIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MalformedValue
    }
}

/// Schema key with neither a value in the file nor a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedKeyIssue {
    pub file_path: String,
    pub key: String,
    pub locale: String,
}

impl UnresolvedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedKey
    }
}

/// A formattable string is not a valid message pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPatternIssue {
    pub file_path: String,
    pub line: Option<usize>,
    pub key: String,
    pub error: String,
}

impl InvalidPatternIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidPattern
    }
}

/// File could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ReadErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReadError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while checking property files.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Syntax(SyntaxIssue),
    MalformedValue(MalformedValueIssue),
    UnresolvedKey(UnresolvedKeyIssue),
    InvalidPattern(InvalidPatternIssue),
    ReadError(ReadErrorIssue),
}

impl Issue {
    /// Convert a failed load of `file_path` into an issue.
    pub fn from_load_error(file_path: &str, error: LoadError) -> Self {
        match error {
            LoadError::Syntax { line, message } => Issue::Syntax(SyntaxIssue {
                file_path: file_path.to_string(),
                line,
                message,
            }),
            LoadError::MalformedValue {
                key,
                value,
                expected,
                line,
            } => Issue::MalformedValue(MalformedValueIssue {
                file_path: file_path.to_string(),
                line,
                key,
                value,
                expected,
            }),
        }
    }

    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLocation<'a> {
    pub file_path: &'a str,
    pub line: Option<usize>,
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for SyntaxIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            line: Some(self.line),
        }
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MalformedValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "\"{}\" is not a valid {} value",
            self.value, self.expected
        ))
    }

    fn hint(&self) -> Option<&str> {
        Some("the file is not loaded until this value is fixed")
    }
}

impl Report for UnresolvedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            line: None,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no value for locale '{}' and no default in the schema",
            self.locale
        ))
    }
}

impl Report for InvalidPatternIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }

    fn hint(&self) -> Option<&str> {
        Some("quote literal braces with single quotes, e.g. '{'")
    }
}

impl Report for ReadErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            line: None,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line (file-level first), rule, message
        let a = self.location();
        let b = other.location();
        a.file_path
            .cmp(b.file_path)
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
