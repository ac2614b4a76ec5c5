use crate::cli::exit_status::ExitStatus;
use crate::core::resolver::LocaleText;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Update(UpdateSummary),
    Show(ShowSummary),
    Validate(ValidateSummary),
    Translate(TranslateSummary),
    Scaffold(ScaffoldSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct UpdateSummary {
    pub path: String,
    pub files_scanned: usize,
    pub records: usize,
    pub added: usize,
    pub refreshed: usize,
    pub removed: usize,
    /// Entries kept although unused (`--keep-unused`).
    pub unused: usize,
    pub total: usize,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ShowEntry {
    pub key: String,
    pub domain: Option<String>,
    /// Rendered translation, `None` when missing.
    pub translation: Option<String>,
    pub is_draft: bool,
}

#[derive(Debug)]
pub struct ShowSummary {
    pub path: String,
    pub entries: Vec<ShowEntry>,
    pub total: usize,
    pub translated: usize,
}

#[derive(Debug)]
pub struct ValidateSummary {
    pub path: String,
    pub total: usize,
    pub missing: usize,
    /// Translations entered interactively and saved.
    pub filled: usize,
    pub interactive: bool,
}

#[derive(Debug)]
pub struct TranslatedText {
    pub source: LocaleText,
    pub translation: LocaleText,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub results: Vec<TranslatedText>,
    /// Count to render each translation with, if given.
    pub count: Option<i64>,
}

#[derive(Debug)]
pub struct ScaffoldSummary {
    pub path: String,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
}

/// Result of running an rf-locale command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, errors make the command exit with status 1.
    pub exit_on_errors: bool,
    /// Diagnostics, sorted by file and position.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut issues: Vec<Issue>, exit_on_errors: bool) -> Self {
        issues.sort();
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;

        Self {
            summary,
            error_count,
            warning_count,
            exit_on_errors,
            issues,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
