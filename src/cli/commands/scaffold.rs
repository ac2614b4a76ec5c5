use std::fs;

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, ScaffoldSummary};
use crate::cli::args::ScaffoldCommand;

/// Location of a module's translations file inside its directory.
pub const MODULE_TRANSLATIONS_FILE: &str = "locale/translations.json";

pub fn scaffold(cmd: ScaffoldCommand) -> Result<CommandResult> {
    let path = cmd.dir.join(MODULE_TRANSLATIONS_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, "{}\n")
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(CommandResult::new(
        CommandSummary::Scaffold(ScaffoldSummary {
            path: path.display().to_string(),
        }),
        Vec::new(),
        false,
    ))
}
