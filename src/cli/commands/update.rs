use anyhow::Result;

use super::helper::{display_path, load_project};
use super::{CommandResult, CommandSummary, UpdateSummary};
use crate::cli::args::UpdateCommand;
use crate::core::merge::MergeOptions;

pub fn update(cmd: UpdateCommand) -> Result<CommandResult> {
    let ctx = load_project(&cmd.common)?;
    let defaults = ctx.merge_options();
    let options = MergeOptions {
        keep_unused: cmd.keep_unused || defaults.keep_unused,
        detailed: cmd.detailed || defaults.detailed,
    };

    let outcome = ctx.update(options, cmd.dry_run)?;
    let summary = &outcome.summary;

    Ok(CommandResult::new(
        CommandSummary::Update(UpdateSummary {
            path: display_path(&ctx),
            files_scanned: outcome.files_scanned,
            records: outcome.records,
            added: summary.added.len(),
            refreshed: summary.refreshed,
            removed: summary.removed.len(),
            unused: summary.unused,
            total: outcome.total_entries,
            dry_run: cmd.dry_run,
        }),
        outcome.summary.issues,
        true,
    ))
}
