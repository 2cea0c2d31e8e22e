//! Error types for the assistant.

use duet_core::PlaybackAction;
use thiserror::Error;

/// Remediation shown when the model credential is missing
pub const MISSING_API_KEY_MESSAGE: &str = "GEMINI_API_KEY is not set. Add it to the environment \
     (e.g. GEMINI_API_KEY=...) or set assistant.api_key in config.toml, then restart the server.";

/// Errors that can occur while arbitrating a chat turn.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Chat is misconfigured (missing credential, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model API returned a non-success status
    #[error("Model API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Model API is offline or unreachable
    #[error("Model API unreachable: {0}")]
    Unreachable(String),

    /// Model API did not answer in time
    #[error("Model API request timed out: {0}")]
    Timeout(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse the model response
    #[error("Failed to parse model response: {0}")]
    ParseError(String),

    /// The confirmation round failed after a tool call was already resolved.
    ///
    /// `action` is the decided action tag, so a caller may still apply it.
    #[error("Confirmation request failed: {source}")]
    Confirmation {
        action: Option<PlaybackAction>,
        #[source]
        source: Box<AssistantError>,
    },
}

impl AssistantError {
    /// HTTP-style status code for surfacing the error to an end user
    pub fn status(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::Upstream { status, .. } => *status,
            Self::Unreachable(_) | Self::ParseError(_) => 502,
            Self::Timeout(_) => 504,
            Self::Request(e) => e.status().map_or(502, |s| s.as_u16()),
            Self::Confirmation { source, .. } => source.status(),
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::Unreachable(msg)
            | Self::Timeout(msg)
            | Self::ParseError(msg) => msg.clone(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Request(e) => e.to_string(),
            Self::Confirmation { source, .. } => source.message(),
        }
    }

    /// Action already decided before the failure, if the error carries one
    pub fn decided_action(&self) -> Option<PlaybackAction> {
        match self {
            Self::Confirmation { action, .. } => *action,
            _ => None,
        }
    }

    /// Whether the error happened after a tool call was resolved
    pub fn is_confirmation_failure(&self) -> bool {
        matches!(self, Self::Confirmation { .. })
    }
}

/// Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
