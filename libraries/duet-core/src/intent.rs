//! Local intent matching
//!
//! Exact-phrase recognition for messages that drive playback without a model
//! round trip. Matching is deliberately lexical: the message is trimmed and
//! lower-cased, then compared against a fixed phrase list.

use crate::types::AudioCommand;

/// Phrases recognized without a model, and the command each one triggers
pub const LOCAL_PHRASES: [(&str, AudioCommand); 3] = [
    ("track 1", AudioCommand::Track1),
    ("track 2", AudioCommand::Track2),
    ("combine", AudioCommand::Combine),
];

/// Match a message against the local phrase list
pub fn match_phrase(message: &str) -> Option<AudioCommand> {
    let normalized = message.trim().to_lowercase();
    LOCAL_PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .map(|(_, command)| *command)
}
