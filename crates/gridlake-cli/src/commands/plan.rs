use serde::Serialize;
use serde_json::Value;

use gridlake_core::PlannedRequest;

use crate::cli::WindowArgs;
use crate::error::CliError;
use crate::pipeline::Orchestrator;

use super::window;

#[derive(Debug, Serialize)]
struct PlanResponseData {
    source: String,
    days: usize,
    requests: Vec<PlannedRequest>,
}

pub fn run(args: &WindowArgs, orchestrator: &Orchestrator<'_>) -> Result<Value, CliError> {
    let window = window(args)?;
    let requests = orchestrator.plan(&args.source, &window, args.query.as_deref())?;
    Ok(serde_json::to_value(PlanResponseData {
        source: args.source.clone(),
        days: window.day_count(),
        requests,
    })?)
}
