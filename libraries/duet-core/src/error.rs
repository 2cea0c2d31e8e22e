/// Core error types for Duet
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Duet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A command name that is not one of `track1`, `track2`, `combine`, `stop`
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl CoreError {
    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand(name.into())
    }
}
