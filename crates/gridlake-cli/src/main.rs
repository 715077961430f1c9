mod cli;
mod commands;
mod error;
mod logging;
mod pipeline;

use clap::Parser;
use std::process::ExitCode;

use gridlake_core::AppConfig;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    // A missing .env file is normal; credentials may come from the shell.
    dotenvy::dotenv().ok();

    let config = AppConfig::load(&cli.config)?;
    logging::init(cli.log_level.as_deref(), &config.logging.level)?;

    let output = commands::run(&cli, &config)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(ExitCode::SUCCESS)
}
