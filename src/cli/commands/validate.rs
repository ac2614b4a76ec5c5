use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde_json::Value;

use super::helper::{display_path, load_project};
use super::{CommandResult, CommandSummary, ValidateSummary};
use crate::cli::args::ValidateCommand;
use crate::core::merge::TranslationMap;
use crate::issues::{Issue, MissingTranslationIssue};

pub fn validate(cmd: ValidateCommand) -> Result<CommandResult> {
    let ctx = load_project(&cmd.common)?;
    let mut file = ctx.load_translations()?;
    let path = display_path(&ctx);

    let filled = if cmd.interactive {
        let stdin = io::stdin();
        let filled = fill_missing(&mut file.entries, stdin.lock(), io::stderr().lock())?;
        if filled > 0 {
            file.save()?;
        }
        filled
    } else {
        0
    };

    let issues: Vec<Issue> = file
        .entries
        .iter()
        .filter(|(_, entry)| !entry.is_translated())
        .map(|(key, entry)| {
            Issue::MissingTranslation(MissingTranslationIssue {
                file_path: path.clone(),
                key: key.clone(),
                reference: entry.reference.clone(),
            })
        })
        .collect();

    Ok(CommandResult::new(
        CommandSummary::Validate(ValidateSummary {
            path,
            total: file.len(),
            missing: issues.len(),
            filled,
            interactive: cmd.interactive,
        }),
        issues,
        !cmd.interactive,
    ))
}

/// Prompt for every missing translation and store the answers.
///
/// An empty answer skips the entry. Plural entries take a JSON array of
/// forms; anything else is re-asked once and then skipped. Returns the number
/// of entries filled.
pub fn fill_missing<R: BufRead, W: Write>(
    entries: &mut TranslationMap,
    mut input: R,
    mut prompt: W,
) -> Result<usize> {
    let mut filled = 0;
    for (key, entry) in entries.iter_mut() {
        if entry.is_translated() {
            continue;
        }

        let mut attempts = 0;
        while attempts < 2 {
            attempts += 1;
            write!(prompt, "{} ({}): ", key, entry.reference).context("Failed to write prompt")?;
            prompt.flush().context("Failed to write prompt")?;

            let mut answer = String::new();
            if input.read_line(&mut answer).context("Failed to read answer")? == 0 {
                return Ok(filled);
            }
            let answer = answer.trim_end_matches(['\r', '\n']);
            if answer.is_empty() {
                break;
            }

            if entry.is_json {
                match serde_json::from_str::<Value>(answer) {
                    Ok(value @ Value::Array(_)) => {
                        entry.translation = Some(value);
                        filled += 1;
                        break;
                    }
                    _ => {
                        writeln!(prompt, "Expected a JSON array of plural forms")
                            .context("Failed to write prompt")?;
                    }
                }
            } else {
                entry.translation = Some(Value::String(answer.to_string()));
                filled += 1;
                break;
            }
        }
    }
    Ok(filled)
}
