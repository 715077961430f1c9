use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the bronze and silver layers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A logical path tried to leave its layer root.
    #[error("logical path '{0}' must be relative and stay inside the layer root")]
    UnsafePath(String),

    /// A bronze file is not valid UTF-8.
    #[error("payload at {path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },
}
