//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the commands
//! so they can be driven without a terminal.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, GetSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::Value;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} property {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files that could not be read or parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be loaded (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.files_checked);
            }
            print_parse_warning(result.parse_error_count, verbose);
        }
        CommandSummary::Get(summary) => print_get(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Render a resolved value: strings raw, everything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let loc = issue.location();

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path[:line]
    let location = match loc.line {
        Some(line) => format!("{}:{}", loc.file_path, line),
        None => loc.file_path.to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            "hint:".bold().cyan(),
            hint
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_get(summary: &GetSummary) {
    print_get_to(summary, &mut io::stdout().lock(), &mut io::stderr().lock());
}

fn print_get_to<O: Write, E: Write>(summary: &GetSummary, out: &mut O, err: &mut E) {
    if let Some(value) = &summary.value {
        let _ = writeln!(out, "{}", render_value(value));
    }

    for unresolved in &summary.unresolved {
        let _ = writeln!(
            err,
            "{} unresolved key '{}' for locale '{}'",
            "warning:".bold().yellow(),
            unresolved.key,
            unresolved.locale
        );
    }

    // A null entry with no raw string anywhere resolves to nothing silently.
    if summary.value.is_none() && summary.unresolved.is_empty() {
        let _ = writeln!(
            err,
            "{} key '{}' has no value",
            "warning:".bold().yellow(),
            summary.key
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================
