use std::process::ExitCode;

use clap::Parser;
use rf_locale::cli::{Arguments, Command, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `RF_LOCALE_LOG=debug`.
const LOG_ENV: &str = "RF_LOCALE_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = rf_locale::mcp::run_server() {
            eprintln!("Error: {:#}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match rf_locale::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
