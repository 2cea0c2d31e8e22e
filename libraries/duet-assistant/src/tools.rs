//! Tool catalogue offered to the model.
//!
//! The catalogue is part of the wire contract with the model transport. Adding,
//! removing, or reshaping an entry requires bumping [`TOOL_CATALOGUE_VERSION`].

use duet_core::{COMBINE_TRACKS_TOOL, PLAY_TRACK_TOOL, STOP_AUDIO_TOOL};
use serde::Serialize;
use serde_json::{json, Value};

/// Version of the tool catalogue returned by [`audio_tools`]
pub const TOOL_CATALOGUE_VERSION: u32 = 1;

/// A tool the model may call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// The tool name (e.g. `"play_track"`).
    pub name: String,
    /// Human-readable description of the tool's purpose.
    pub description: String,
    /// JSON Schema describing the tool's parameters; `None` for no arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// The three audio tools: `play_track`, `combine_tracks`, `stop_audio`.
pub fn audio_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            PLAY_TRACK_TOOL,
            "Play a single audio track by itself. Use when the user asks for track 1 or track 2.",
            Some(json!({
                "type": "object",
                "properties": {
                    "track": {
                        "type": "string",
                        "enum": ["1", "2"],
                        "description": "Which track to play: \"1\" or \"2\"."
                    }
                },
                "required": ["track"]
            })),
        ),
        ToolDefinition::new(
            COMBINE_TRACKS_TOOL,
            "Play track 1 and track 2 at the same time. Use when the user wants both tracks.",
            None,
        ),
        ToolDefinition::new(
            STOP_AUDIO_TOOL,
            "Stop all audio playback.",
            None,
        ),
    ]
}
