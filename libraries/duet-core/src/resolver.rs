//! Instruction resolution
//!
//! Maps commands, and tool calls issued by a model, to [`AudioInstruction`]s.
//! Resource locations are fixed at compile time; nothing here touches the
//! network or the file system.

use crate::types::{AudioCommand, AudioInstruction, ToolCall};
use tracing::debug;

/// Resource URL of track 1
pub const TRACK_1_URL: &str = "/tracks/track1.mp3";

/// Resource URL of track 2
pub const TRACK_2_URL: &str = "/tracks/track2.mp3";

/// Tool that plays a single track; takes `track: "1" | "2"`
pub const PLAY_TRACK_TOOL: &str = "play_track";

/// Tool that plays both tracks together; no arguments
pub const COMBINE_TRACKS_TOOL: &str = "combine_tracks";

/// Tool that stops playback; no arguments
pub const STOP_AUDIO_TOOL: &str = "stop_audio";

/// Resolve a command to its instruction. Total: every command has one.
pub fn resolve(command: AudioCommand) -> AudioInstruction {
    match command {
        AudioCommand::Track1 => AudioInstruction::new(command, &[TRACK_1_URL]),
        AudioCommand::Track2 => AudioInstruction::new(command, &[TRACK_2_URL]),
        AudioCommand::Combine => AudioInstruction::new(command, &[TRACK_1_URL, TRACK_2_URL]),
        AudioCommand::Stop => AudioInstruction::new(command, &[]),
    }
}

/// Resolve a model-issued tool call.
///
/// Returns `None` for an unknown tool name or a `play_track` call whose
/// `track` argument is not `"1"` or `"2"`. A `None` here means the response had
/// no actionable tool call; it is never an error.
pub fn resolve_tool_call(call: &ToolCall) -> Option<AudioInstruction> {
    let command = match call.name.as_str() {
        PLAY_TRACK_TOOL => match call.arg_str("track").as_str() {
            "1" => AudioCommand::Track1,
            "2" => AudioCommand::Track2,
            other => {
                debug!(track = %other, "play_track called with unrecognized track");
                return None;
            }
        },
        COMBINE_TRACKS_TOOL => AudioCommand::Combine,
        STOP_AUDIO_TOOL => AudioCommand::Stop,
        other => {
            debug!(tool = %other, "Ignoring unrecognized tool call");
            return None;
        }
    };

    Some(resolve(command))
}
