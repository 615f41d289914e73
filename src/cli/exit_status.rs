use std::process::ExitCode;

/// Exit status of the `proptable` binary.
///
/// - `Success` (0): nothing to report, or warnings only
/// - `Failure` (1): errors found (malformed values, unresolved `get` key, ...)
/// - `Error` (2): the command could not run (config, schema or usage error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
