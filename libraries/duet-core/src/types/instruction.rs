/// Resolved audio instruction
use super::AudioCommand;
use serde::Serialize;

/// A command together with the ordered resource URLs it plays.
///
/// Built only by [`crate::resolve`], which upholds the URL-count contract:
/// one URL for `track1`/`track2`, two for `combine` (track 1 first), none for
/// `stop`. There is no way to mutate an instruction after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioInstruction {
    command: AudioCommand,
    urls: Vec<String>,
}

impl AudioInstruction {
    pub(crate) fn new(command: AudioCommand, urls: &[&str]) -> Self {
        Self {
            command,
            urls: urls.iter().map(|url| (*url).to_string()).collect(),
        }
    }

    /// The command this instruction carries out
    pub fn command(&self) -> AudioCommand {
        self.command
    }

    /// Resource URLs, in playback order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}
