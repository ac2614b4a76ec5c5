use anyhow::Result;

use super::helper::load_project;
use super::{CommandResult, CommandSummary, TranslateSummary, TranslatedText};
use crate::cli::args::TranslateCommand;
use crate::core::resolver::{BatchItem, LocaleText, TranslateOptions};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = load_project(&cmd.common)?;
    let mut resolver = ctx.resolver()?;

    let options = TranslateOptions {
        domains: cmd.domain.clone(),
        contexts: cmd.context.clone(),
    };
    let sources: Vec<LocaleText> = cmd.texts.iter().map(|t| LocaleText::parse_argument(t)).collect();
    let items = sources.iter().cloned().map(BatchItem::from).collect();
    let translated = resolver.translate_all(&cmd.language, items, &options);

    let results = sources
        .into_iter()
        .map(|source| {
            let translation = translated
                .get(&source.key())
                .cloned()
                .unwrap_or_else(|| source.clone());
            TranslatedText {
                source,
                translation,
            }
        })
        .collect();

    Ok(CommandResult::new(
        CommandSummary::Translate(TranslateSummary {
            results,
            count: cmd.count,
        }),
        Vec::new(),
        false,
    ))
}
