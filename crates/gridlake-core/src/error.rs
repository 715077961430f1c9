use thiserror::Error;

/// Value-level validation errors exposed by `gridlake-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid source '{value}', expected one of entsoe, elexon")]
    InvalidSource { value: String },

    #[error("invalid resolution token '{value}', expected an ISO-8601 duration such as PT15M or PT1H")]
    InvalidResolution { value: String },
    #[error("resolution token '{value}' must reduce to a positive number of minutes")]
    EmptyResolution { value: String },

    #[error("timestamp is not a recognised UTC timestamp: '{value}'")]
    InvalidTimestamp { value: String },
    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("point position must be 1 or greater, got {value}")]
    InvalidPosition { value: u32 },

    #[error("settlement period {value} is outside 1..=48")]
    InvalidSettlementPeriod { value: u32 },
    #[error("settlement period range {from}..={to} is empty")]
    EmptySettlementRange { from: u32, to: u32 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Configuration-time failures. These abort the run for the affected source.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source '{source_name}' requires an api_key for its endpoint dialect")]
    MissingCredential { source_name: String },

    #[error("source '{source_name}' has no base_url")]
    MissingBaseUrl { source_name: String },

    #[error("source '{0}' is not present in the configuration")]
    MissingSource(String),

    #[error("no connector is registered for source '{0}'")]
    UnknownSource(String),

    #[error("report '{report}' is not configured for source '{source_name}'")]
    UnknownReport { source_name: String, report: String },

    #[error("configuration must declare at least one source")]
    NoSources,

    #[error("query window start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
