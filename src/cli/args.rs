//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `update`: Scan sources and merge found texts into the translations file
//! - `show`: Print the translations file
//! - `validate`: List (or interactively fill in) missing translations
//! - `translate`: Resolve texts through the configured locales
//! - `scaffold`: Create an empty translations file for a module
//! - `init`: Write a default configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Update(cmd)) => cmd.common.verbose,
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Validate(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Scaffold(_)) | Some(Command::Init) | Some(Command::Serve) | None => {
                false
            }
        }
    }
}

/// Common arguments shared by project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Translations file, relative to the root (overrides config file)
    #[arg(long)]
    pub file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep entries that are no longer used in the sources
    #[arg(long)]
    pub keep_unused: bool,

    /// Write extraction details (usage, function, position) for each entry
    #[arg(long)]
    pub detailed: bool,

    /// Report what would change without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list entries without a translation
    #[arg(long)]
    pub missing: bool,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Prompt for each missing translation and save the answers
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Language tag to translate into (e.g. es-MX)
    #[arg(short, long)]
    pub language: String,

    /// Preferred domains, most specific first
    #[arg(long)]
    pub domain: Vec<String>,

    /// Preferred contexts, most specific first
    #[arg(long)]
    pub context: Vec<String>,

    /// Render each translation for this count, picking the plural form
    /// and substituting the count for `%s`
    #[arg(long, allow_hyphen_values = true)]
    pub count: Option<i64>,

    /// Texts to translate; a JSON array is read as plural forms
    #[arg(required = true)]
    pub texts: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ScaffoldCommand {
    /// Module directory to create the translations file in
    pub dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan sources and update the translations file
    Update(UpdateCommand),
    /// Show the entries of the translations file
    Show(ShowCommand),
    /// Check the translations file for missing translations
    Validate(ValidateCommand),
    /// Translate texts using the configured locales
    Translate(TranslateCommand),
    /// Create locale/translations.json in a module directory
    Scaffold(ScaffoldCommand),
    /// Initialize a new .rflocalerc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
