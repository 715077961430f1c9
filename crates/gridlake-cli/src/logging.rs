use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Installs the stderr `fmt` subscriber.
///
/// Filter precedence: `RUST_LOG`, then `--log-level`, then the config's
/// `logging.level`.
pub fn init(cli_level: Option<&str>, config_level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(cli_level, config_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::Command(format!("failed to install logger: {error}")))
}

fn build_filter(cli_level: Option<&str>, config_level: &str) -> Result<EnvFilter, CliError> {
    let directive = cli_level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(config_level);
    EnvFilter::try_new(directive)
        .map_err(|error| CliError::Command(format!("invalid log level '{directive}': {error}")))
}
