use anyhow::Result;
use serde_json::Value;

use super::helper::{display_path, load_project};
use super::{CommandResult, CommandSummary, ShowEntry, ShowSummary};
use crate::cli::args::ShowCommand;
use crate::core::merge::TranslationEntry;

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let ctx = load_project(&cmd.common)?;
    let file = ctx.load_translations()?;

    let translated = file.entries.values().filter(|e| e.is_translated()).count();
    let entries = file
        .entries
        .iter()
        .filter(|(_, entry)| !cmd.missing || !entry.is_translated())
        .map(|(key, entry)| ShowEntry {
            key: key.clone(),
            domain: entry.domain.clone(),
            translation: render_translation(entry),
            is_draft: entry.is_draft,
        })
        .collect();

    Ok(CommandResult::new(
        CommandSummary::Show(ShowSummary {
            path: display_path(&ctx),
            entries,
            total: file.len(),
            translated,
        }),
        Vec::new(),
        false,
    ))
}

fn render_translation(entry: &TranslationEntry) -> Option<String> {
    if !entry.is_translated() {
        return None;
    }
    match &entry.translation {
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}
