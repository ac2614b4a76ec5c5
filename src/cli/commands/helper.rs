use anyhow::Result;

use crate::cli::args::CommonArgs;
use crate::core::ProjectContext;

/// Load the project at `--root`, applying command-line overrides.
pub fn load_project(common: &CommonArgs) -> Result<ProjectContext> {
    let mut ctx = ProjectContext::load(&common.root)?;
    if let Some(file) = &common.file {
        ctx.set_translations_file(file);
    }
    Ok(ctx)
}

/// The translations file as written in the config, without a leading `./`.
pub fn display_path(ctx: &ProjectContext) -> String {
    ctx.config
        .translations_file
        .trim_start_matches("./")
        .to_string()
}
