use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole sync run before (or instead of) any remote call
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error in {}: {source}", path.display())]
    YamlError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Syntax error in {}: {message}", path.display())]
    SyntaxError { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// A single remote create-or-update attempt that did not succeed
///
/// These never abort a batch: the updaters collect one per failed object.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not build payload: {0}")]
    Payload(String),
}

impl RequestError {
    /// HTTP status code, when the platform answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
