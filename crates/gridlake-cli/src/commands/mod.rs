mod plan;
mod run;
mod transform;

use std::sync::Arc;

use gridlake_core::{AppConfig, QueryWindow, ReqwestHttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command, WindowArgs};
use crate::error::CliError;
use crate::pipeline::Orchestrator;

/// Dispatches the parsed command and returns its JSON summary.
pub fn run(cli: &Cli, config: &AppConfig) -> Result<Value, CliError> {
    let orchestrator = Orchestrator::new(config, Arc::new(ReqwestHttpClient::new()?));

    match &cli.command {
        Command::Run(args) => run::run(args, &orchestrator),
        Command::Extract(args) => run::extract(args, &orchestrator),
        Command::Plan(args) => plan::run(args, &orchestrator),
        Command::Transform(args) => transform::run(args, &orchestrator),
    }
}

fn window(args: &WindowArgs) -> Result<QueryWindow, CliError> {
    Ok(QueryWindow::parse(&args.start, &args.end)?)
}
