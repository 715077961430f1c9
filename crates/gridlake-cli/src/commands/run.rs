use serde_json::Value;

use crate::cli::WindowArgs;
use crate::error::CliError;
use crate::pipeline::Orchestrator;

use super::window;

pub fn run(args: &WindowArgs, orchestrator: &Orchestrator<'_>) -> Result<Value, CliError> {
    let window = window(args)?;
    let summary = orchestrator.run(&args.source, &window, args.query.as_deref())?;
    Ok(serde_json::to_value(summary)?)
}

pub fn extract(args: &WindowArgs, orchestrator: &Orchestrator<'_>) -> Result<Value, CliError> {
    let window = window(args)?;
    let summary = orchestrator.extract(&args.source, &window, args.query.as_deref())?;
    Ok(serde_json::to_value(summary)?)
}
