//! Reconcile extraction records with a translations file.
//!
//! Keys found in the sources are added or refreshed, human-entered
//! translations are never touched, and keys no longer referenced are pruned
//! unless the caller asks to keep them.

mod file;
mod literal;

use std::collections::HashSet;

use tracing::debug;

pub use file::{TranslationEntry, TranslationMap, TranslationsFile, to_pretty_json};
pub use literal::parse_literal;

use crate::core::resolver::LocaleText;
use crate::core::scanner::ExtractionRecord;
use crate::issues::{
    ExtractionErrorIssue, Issue, LiteralArgument, NonLiteralIssue, SourceLocation,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Retain entries that no record references.
    pub keep_unused: bool,
    /// Write extraction metadata (`used`, `functionName`, ...) on each entry.
    pub detailed: bool,
}

#[derive(Debug, Default)]
pub struct MergeSummary {
    /// Keys created by this merge, in insertion order.
    pub added: Vec<String>,
    /// Existing keys referenced again.
    pub refreshed: usize,
    pub removed: Vec<String>,
    /// Keys kept although nothing references them (`keep_unused`).
    pub unused: usize,
    pub issues: Vec<Issue>,
}

impl MergeSummary {
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }
}

/// A record reduced to what the translations file stores.
struct LiteralCall {
    text: LocaleText,
    domain: Option<String>,
}

/// Merge `records` into `entries`.
///
/// Records are applied in order, so for a key referenced several times the
/// first call site supplies `ref` and `domain`.
pub fn update_translations(
    entries: &mut TranslationMap,
    records: &[ExtractionRecord],
    options: &MergeOptions,
) -> MergeSummary {
    let mut summary = MergeSummary::default();
    let mut used: HashSet<String> = HashSet::new();

    for record in records {
        let call = match literal_call(record) {
            Ok(call) => call,
            Err(issue) => {
                summary.issues.push(issue);
                continue;
            }
        };

        let key = call.text.key();
        if !used.insert(key.clone()) {
            continue;
        }

        match entries.get_mut(&key) {
            Some(entry) => {
                entry.domain = call.domain;
                entry.reference = record.reference.clone();
                entry.is_json = call.text.is_json();
                summary.refreshed += 1;
            }
            None => {
                entries.insert(
                    key.clone(),
                    TranslationEntry {
                        domain: call.domain,
                        reference: record.reference.clone(),
                        translation: None,
                        is_json: call.text.is_json(),
                        ..Default::default()
                    },
                );
                summary.added.push(key.clone());
            }
        }

        if options.detailed
            && let Some(entry) = entries.get_mut(&key)
        {
            entry.function_name = Some(record.function_name.clone());
            entry.n = record.n.clone();
            entry.file = Some(record.file.clone());
            entry.line = Some(record.line);
            entry.column = Some(record.column);
        }
    }

    if !options.keep_unused {
        entries.retain(|key, _| {
            let keep = used.contains(key);
            if !keep {
                summary.removed.push(key.clone());
            }
            keep
        });
    }

    for (key, entry) in entries.iter_mut() {
        let is_used = used.contains(key);
        if !is_used {
            summary.unused += 1;
        }
        if options.detailed {
            entry.used = Some(is_used);
        } else {
            entry.clear_details();
        }
    }

    debug!(
        added = summary.added.len(),
        refreshed = summary.refreshed,
        removed = summary.removed.len(),
        issues = summary.issues.len(),
        "merged extraction records"
    );
    summary
}

/// Turn the raw slots of `record` into literal text, or explain why not.
fn literal_call(record: &ExtractionRecord) -> Result<LiteralCall, Issue> {
    let location = SourceLocation::of_record(record);

    if let Some(error) = &record.error {
        return Err(Issue::ExtractionError(ExtractionErrorIssue {
            location,
            function_name: record.function_name.clone(),
            error: error.clone(),
            snippet: record.snippet.clone(),
        }));
    }

    let non_literal = |argument, expression: &str| {
        Issue::NonLiteral(NonLiteralIssue {
            location: location.clone(),
            function_name: record.function_name.clone(),
            argument,
            expression: expression.to_string(),
        })
    };

    let mut forms = Vec::with_capacity(record.source.len());
    for slot in &record.source {
        match slot {
            None => forms.push(None),
            Some(raw) => match parse_literal(raw) {
                Some(text) => forms.push(Some(text)),
                None => return Err(non_literal(LiteralArgument::Source, raw)),
            },
        }
    }
    let text = LocaleText::from_forms(forms)
        .ok_or_else(|| non_literal(LiteralArgument::Source, &record.params_snippet))?;

    let domain = match &record.domain {
        None => None,
        Some(raw) => match parse_literal(raw) {
            Some(domain) => Some(domain),
            None => return Err(non_literal(LiteralArgument::Domain, raw)),
        },
    };

    Ok(LiteralCall { text, domain })
}
