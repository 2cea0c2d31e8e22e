//! Duet Assistant
//!
//! Bridges one user utterance to (possibly) one playback action plus a
//! natural-language reply.
//!
//! # Features
//!
//! - **Tool-call arbitration**: at most two model round trips per turn; the
//!   second exists only to phrase a confirmation of the executed tool
//! - **Local intent**: exact-phrase matching that never calls a model
//! - **Gemini transport**: `generateContent` over HTTPS with function calling
//!
//! Both arbitration strategies implement [`ChatArbitrator`] and return the same
//! [`ChatReply`], so a caller can swap one for the other without touching the
//! playback state machine.
//!
//! # Example
//!
//! ```ignore
//! use duet_assistant::{ChatArbitrator, GeminiConfig, GeminiTransport, ToolCallingArbitrator};
//! use duet_core::ConversationTurn;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = GeminiTransport::new(GeminiConfig::new(std::env::var("GEMINI_API_KEY")?))?;
//!     let arbitrator = ToolCallingArbitrator::new(transport);
//!
//!     let reply = arbitrator
//!         .respond(&[ConversationTurn::user("play track 1")])
//!         .await?;
//!     println!("{} (action: {:?})", reply.reply, reply.action);
//!
//!     Ok(())
//! }
//! ```

mod arbitrator;
mod error;
mod gemini;
mod prompt;
mod tools;
mod transport;

// Re-export main types
pub use arbitrator::{
    ChatArbitrator, ChatReply, LocalIntentArbitrator, ToolCallingArbitrator,
    CONFIRMATION_FALLBACK,
};
pub use error::{AssistantError, Result, MISSING_API_KEY_MESSAGE};
pub use gemini::{GeminiConfig, GeminiTransport, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use prompt::CHAT_SYSTEM_PROMPT;
pub use tools::{audio_tools, ToolDefinition, TOOL_CATALOGUE_VERSION};
pub use transport::{ModelPart, ModelRequest, ModelResponse, ModelTransport, ModelTurn, TurnRole};
