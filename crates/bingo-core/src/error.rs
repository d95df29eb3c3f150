//! Error types for command registration.

use thiserror::Error;

/// A catalog invariant violation, located by a `/`-joined path
/// such as `bingo/create_game/max_teams`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid command schema at '{path}': {reason}")]
pub struct SchemaError {
    pub path: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to register commands: {status}")]
    Registry { status: u16, body: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RegistrarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistrarError::Transport(format!("request timed out: {}", err))
        } else {
            RegistrarError::Transport(err.to_string())
        }
    }
}
