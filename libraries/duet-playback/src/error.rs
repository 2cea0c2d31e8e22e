//! Error types for playback management

use crate::types::ChannelId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio engine could not create a channel
    #[error("Failed to create {channel} channel: {message}")]
    ChannelCreation {
        /// Channel that failed
        channel: ChannelId,
        /// Engine-provided reason
        message: String,
    },
}

impl PlaybackError {
    /// Create a channel creation error
    pub fn channel_creation(channel: ChannelId, message: impl Into<String>) -> Self {
        Self::ChannelCreation {
            channel,
            message: message.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
