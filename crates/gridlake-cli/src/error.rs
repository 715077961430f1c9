use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] gridlake_core::ConfigError),

    #[error(transparent)]
    Validation(#[from] gridlake_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Store(#[from] gridlake_store::StoreError),

    #[error("transport setup failed: {0}")]
    Transport(#[from] gridlake_core::HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Serialization(_) => 4,
            Self::Transport(_) => 6,
            Self::Store(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
