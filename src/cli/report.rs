//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style; each command summary gets a short,
//! colored footer. Everything writes to a caller-supplied writer so that
//! the output can be tested.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, ScaffoldSummary, ShowSummary, TranslateSummary,
    UpdateSummary, ValidateSummary,
};
use crate::core::resolver::format_count;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues cargo-style to a custom writer, sorted, followed by a problem count.
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

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result. Warnings are listed one by one only in verbose
/// mode; otherwise they are counted on a single line.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    let shown: Vec<Issue> = if verbose {
        result.issues.clone()
    } else {
        result
            .issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .cloned()
            .collect()
    };
    report_to(&shown, writer);

    let hidden = result.issues.len() - shown.len();
    if hidden > 0 {
        let _ = writeln!(
            writer,
            "{} {} warning(s) hidden (use {} for details)",
            "warning:".bold().yellow(),
            hidden,
            "-v".cyan()
        );
    }

    match &result.summary {
        CommandSummary::Update(summary) => print_update(summary, writer),
        CommandSummary::Show(summary) => print_show(summary, writer),
        CommandSummary::Validate(summary) => print_validate(summary, writer),
        CommandSummary::Translate(summary) => print_translate(summary, writer),
        CommandSummary::Scaffold(summary) => print_scaffold(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(loc) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                loc.file_path,
                loc.line,
                loc.column
            );
        }
        ReportLocation::Entry { file_path, key } => {
            let _ = writeln!(writer, "  {} {} \"{}\"", "-->".blue(), file_path, key);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
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

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn print_update<W: Write>(summary: &UpdateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} Scanned {}, found {}",
        SUCCESS_MARK.green(),
        plural(summary.files_scanned, "source file", "source files"),
        plural(summary.records, "call", "calls")
    );
    let mut changes = format!(
        "  added: {}, updated: {}, removed: {}",
        summary.added, summary.refreshed, summary.removed
    );
    if summary.unused > 0 {
        changes.push_str(&format!(", unused: {}", summary.unused));
    }
    let _ = writeln!(writer, "{}", changes);

    let entries = plural(summary.total, "entry", "entries");
    if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} {} to {}",
            "Would write".yellow().bold(),
            entries,
            summary.path
        );
    } else {
        let _ = writeln!(writer, "{} {} to {}", "Wrote".green().bold(), entries, summary.path);
    }
}

fn print_show<W: Write>(summary: &ShowSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} ({}/{} translated)",
        summary.path.bold(),
        summary.translated,
        summary.total
    );
    let _ = writeln!(writer);

    for entry in &summary.entries {
        let domain = entry
            .domain
            .as_ref()
            .map(|d| format!(" [{}]", d).dimmed().to_string())
            .unwrap_or_default();
        let translation = match &entry.translation {
            Some(text) if entry.is_draft => format!("{} {}", text, "(draft)".yellow()),
            Some(text) => text.clone(),
            None => "(missing)".red().to_string(),
        };
        let _ = writeln!(writer, "  {}{} => {}", entry.key, domain, translation);
    }
}

fn print_validate<W: Write>(summary: &ValidateSummary, writer: &mut W) {
    if summary.interactive && summary.filled > 0 {
        let _ = writeln!(
            writer,
            "{} {} to {}",
            "Saved".green().bold(),
            plural(summary.filled, "translation", "translations"),
            summary.path
        );
    }

    if summary.missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "All {} of {} are translated",
                plural(summary.total, "entry", "entries"),
                summary.path
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} of {} missing a translation",
            FAILURE_MARK.red(),
            plural(summary.missing, "entry", "entries"),
            summary.total
        );
    }
}

fn print_translate<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    for result in &summary.results {
        let translation = match summary.count {
            Some(n) => format_count(&result.translation, n),
            None => result.translation.display(),
        };
        let _ = writeln!(writer, "{} => {}", result.source.display(), translation);
    }
}

fn print_scaffold<W: Write>(summary: &ScaffoldSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path).green()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path).green()
    );
}

// ============================================================
// Tests
// ============================================================
