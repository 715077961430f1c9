use serde::Serialize;
use serde_json::Value;

use gridlake_store::SilverTableReport;

use crate::cli::TransformArgs;
use crate::error::CliError;
use crate::pipeline::Orchestrator;

#[derive(Debug, Serialize)]
struct TransformResponseData {
    source: String,
    tables: Vec<SilverTableReport>,
}

pub fn run(args: &TransformArgs, orchestrator: &Orchestrator<'_>) -> Result<Value, CliError> {
    let tables = orchestrator.transform(&args.source, args.query.as_deref())?;
    Ok(serde_json::to_value(TransformResponseData {
        source: args.source.clone(),
        tables,
    })?)
}
