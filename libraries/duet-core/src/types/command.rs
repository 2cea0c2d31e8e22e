/// Audio command and action tag types
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playback intent, independent of where the audio lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCommand {
    /// Play track 1 alone
    Track1,
    /// Play track 2 alone
    Track2,
    /// Play both tracks together
    Combine,
    /// Silence everything
    Stop,
}

impl AudioCommand {
    /// Every command, in declaration order
    pub const ALL: [AudioCommand; 4] = [Self::Track1, Self::Track2, Self::Combine, Self::Stop];

    /// Wire name of the command
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track1 => "track1",
            Self::Track2 => "track2",
            Self::Combine => "combine",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for AudioCommand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track1" => Ok(Self::Track1),
            "track2" => Ok(Self::Track2),
            "combine" => Ok(Self::Combine),
            "stop" => Ok(Self::Stop),
            other => Err(CoreError::unknown_command(other)),
        }
    }
}

impl fmt::Display for AudioCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-visible summary of the audio side effect a conversation turn produced.
///
/// Only play commands have an action tag. `stop` resolves to no action at all,
/// so the type has no variant for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackAction {
    /// Track 1 started
    Track1,
    /// Track 2 started
    Track2,
    /// Both tracks started
    Combine,
}

impl PlaybackAction {
    /// Map a command to its action tag (`None` for `stop`)
    #[must_use]
    pub fn from_command(command: AudioCommand) -> Option<Self> {
        match command {
            AudioCommand::Track1 => Some(Self::Track1),
            AudioCommand::Track2 => Some(Self::Track2),
            AudioCommand::Combine => Some(Self::Combine),
            AudioCommand::Stop => None,
        }
    }

    /// The command that performs this action
    #[must_use]
    pub fn command(self) -> AudioCommand {
        match self {
            Self::Track1 => AudioCommand::Track1,
            Self::Track2 => AudioCommand::Track2,
            Self::Combine => AudioCommand::Combine,
        }
    }

    /// Wire name of the action
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.command().as_str()
    }
}

impl From<PlaybackAction> for AudioCommand {
    fn from(action: PlaybackAction) -> Self {
        action.command()
    }
}

impl fmt::Display for PlaybackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
