use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a widget configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The attribute used to read a label off a candidate is empty.
    #[error("suggestion attribute must not be empty")]
    MissingAttribute,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: {0}")]
    UnsupportedFormat(String),
}

/// Reasons a pending lookup settles without candidates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup rejected: {0}")]
    Rejected(String),

    #[error("lookup dropped before settling")]
    Disconnected,

    #[error("lookup worker panicked")]
    Panicked,
}
