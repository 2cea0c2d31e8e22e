//! Core types for playback management

use duet_core::{AudioCommand, TRACK_1_URL, TRACK_2_URL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What is audible right now
///
/// Mutually exclusive; not a history of what was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing playing
    #[default]
    Idle,

    /// Track 1 alone
    Track1,

    /// Track 2 alone
    Track2,

    /// Both tracks together
    Combine,
}

impl PlaybackState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Track1 => "track1",
            Self::Track2 => "track2",
            Self::Combine => "combine",
        }
    }

    /// Human-readable description of what is playing, `None` when idle
    #[must_use]
    pub fn now_playing(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Track1 => Some("Track 1"),
            Self::Track2 => Some("Track 2"),
            Self::Combine => Some("Track 1 + Track 2"),
        }
    }
}

impl From<AudioCommand> for PlaybackState {
    /// Target state of a command; the same from every starting state
    fn from(command: AudioCommand) -> Self {
        match command {
            AudioCommand::Track1 => Self::Track1,
            AudioCommand::Track2 => Self::Track2,
            AudioCommand::Combine => Self::Combine,
            AudioCommand::Stop => Self::Idle,
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the two fixed audio channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    /// Channel bound to track 1
    Track1,

    /// Channel bound to track 2
    Track2,
}

impl ChannelId {
    /// Both channels, track 1 first
    pub const ALL: [ChannelId; 2] = [Self::Track1, Self::Track2];

    /// Resource the channel is bound to
    #[must_use]
    pub fn url(&self) -> &'static str {
        match self {
            Self::Track1 => TRACK_1_URL,
            Self::Track2 => TRACK_2_URL,
        }
    }

    /// Channels a command plays, in start order
    #[must_use]
    pub fn targets(command: AudioCommand) -> &'static [ChannelId] {
        match command {
            AudioCommand::Track1 => &[Self::Track1],
            AudioCommand::Track2 => &[Self::Track2],
            AudioCommand::Combine => &Self::ALL,
            AudioCommand::Stop => &[],
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Track1 => 0,
            Self::Track2 => 1,
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track1 => write!(f, "track 1"),
            Self::Track2 => write!(f, "track 2"),
        }
    }
}
