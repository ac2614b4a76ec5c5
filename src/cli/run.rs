use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, init::init, scaffold::scaffold, show::show, translate::translate,
        update::update, validate::validate,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Update(cmd)) => update(cmd),
        Some(Command::Show(cmd)) => show(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Scaffold(cmd)) => scaffold(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            bail!("Serve command should be handled before run()")
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
