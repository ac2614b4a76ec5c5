//! Diagnostics produced while scanning sources and merging translations.
//!
//! None of these stop a run. Each issue carries what the reporter needs to
//! print it: a location, a message and an optional note.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::scanner::{ExtractionRecord, OpenConstruct, Unterminated};

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    ExtractionError,
    NonLiteralSource,
    NonLiteralDomain,
    Unterminated,
    MissingTranslation,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ExtractionError => write!(f, "extraction-error"),
            Rule::NonLiteralSource => write!(f, "non-literal-source"),
            Rule::NonLiteralDomain => write!(f, "non-literal-domain"),
            Rule::Unterminated => write!(f, "unterminated"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
        }
    }
}

/// A position in a scanned source file (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
        }
    }

    pub fn of_record(record: &ExtractionRecord) -> Self {
        Self::new(&record.file, record.line, record.column)
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A call with fewer arguments than its pattern needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionErrorIssue {
    pub location: SourceLocation,
    pub function_name: String,
    pub error: String,
    pub snippet: String,
}

impl ExtractionErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExtractionError
    }
}

/// Which argument of a call was not a quoted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralArgument {
    Source,
    Domain,
}

/// A source or domain argument that is an expression, so its runtime text
/// is unknown and the call cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralIssue {
    pub location: SourceLocation,
    pub function_name: String,
    pub argument: LiteralArgument,
    /// The raw argument text.
    pub expression: String,
}

impl NonLiteralIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }
}

/// A string, comment, bracket or argument list left open at end of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedIssue {
    pub location: SourceLocation,
    pub construct: OpenConstruct,
}

impl UnterminatedIssue {
    pub fn new(file_path: impl Into<String>, unterminated: &Unterminated) -> Self {
        Self {
            location: SourceLocation::new(file_path, unterminated.line, unterminated.column),
            construct: unterminated.construct,
        }
    }

    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unterminated
    }
}

/// An entry of the translations file that has no translation yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub file_path: String,
    pub key: String,
    pub reference: String,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ExtractionError(ExtractionErrorIssue),
    NonLiteral(NonLiteralIssue),
    Unterminated(UnterminatedIssue),
    MissingTranslation(MissingTranslationIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    Source(&'a SourceLocation),
    /// An entry of a translations file, identified by key.
    Entry { file_path: &'a str, key: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Source(loc) => &loc.file_path,
            ReportLocation::Entry { file_path, .. } => file_path,
        }
    }

    /// Line and column, when the location points into a source file.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ReportLocation::Source(loc) => Some((loc.line, loc.column)),
            ReportLocation::Entry { .. } => None,
        }
    }
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Text for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for ExtractionErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
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

    fn details(&self) -> Option<String> {
        Some(self.snippet.clone())
    }
}

impl Report for NonLiteralIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
    }

    fn message(&self) -> String {
        let argument = match self.argument {
            LiteralArgument::Source => "source text",
            LiteralArgument::Domain => "domain",
        };
        format!(
            "{}() {} is not a string literal",
            self.function_name, argument
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        match self.argument {
            LiteralArgument::Source => Rule::NonLiteralSource,
            LiteralArgument::Domain => Rule::NonLiteralDomain,
        }
    }

    fn details(&self) -> Option<String> {
        Some(format!("found `{}`", self.expression))
    }
}

impl Report for UnterminatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
    }

    fn message(&self) -> String {
        format!("unterminated {}", self.construct)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry {
            file_path: &self.file_path,
            key: &self.key,
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
        (!self.reference.is_empty()).then(|| format!("used at {}", self.reference))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.position().cmp(&b.position()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
