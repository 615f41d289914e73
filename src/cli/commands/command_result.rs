use crate::core::{UnresolvedKey, Value};
use crate::issues::Issue;

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Get(GetSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GetSummary {
    pub key: String,
    pub locale: String,
    /// `None` when the key has neither a value nor a default.
    pub value: Option<Value>,
    /// Diagnostics collected while resolving.
    pub unresolved: Vec<UnresolvedKey>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running proptable commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found during the check.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files that failed to read or parse.
    pub parse_error_count: usize,
    /// Number of property files that were loaded.
    pub files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
