//! Duet Core
//!
//! Platform-agnostic command types and instruction resolution for Duet.
//!
//! This crate is the leaf of the workspace: it performs no I/O and holds no
//! state. Everything else (the playback state machine, the model arbitrator,
//! the HTTP server) is built on the types defined here.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioCommand`, `AudioInstruction`, `PlaybackAction`,
//!   `ToolCall`, `ConversationTurn`
//! - **Resolution**: `resolve` and `resolve_tool_call`, mapping commands and
//!   model-issued tool calls to instructions
//! - **Local intent**: `match_phrase`, the exact-phrase matcher used when a
//!   message bypasses the model
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use duet_core::{resolve, resolve_tool_call, AudioCommand, ToolCall};
//!
//! let combine = resolve(AudioCommand::Combine);
//! assert_eq!(combine.urls(), ["/tracks/track1.mp3", "/tracks/track2.mp3"]);
//!
//! let call = ToolCall::new("play_track", serde_json::json!({ "track": "2" }));
//! assert_eq!(resolve_tool_call(&call), Some(resolve(AudioCommand::Track2)));
//!
//! let unknown = ToolCall::new("open_window", serde_json::json!({}));
//! assert_eq!(resolve_tool_call(&unknown), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod intent;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use intent::match_phrase;
pub use resolver::{
    resolve, resolve_tool_call, COMBINE_TRACKS_TOOL, PLAY_TRACK_TOOL, STOP_AUDIO_TOOL,
    TRACK_1_URL, TRACK_2_URL,
};
pub use types::{
    AudioCommand, AudioInstruction, ConversationTurn, PlaybackAction, Role, ToolCall,
};
