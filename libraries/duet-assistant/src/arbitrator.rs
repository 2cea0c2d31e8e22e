//! Chat arbitration: one user turn in, a reply and at most one action out.

use crate::error::{AssistantError, Result};
use crate::prompt::CHAT_SYSTEM_PROMPT;
use crate::tools::audio_tools;
use crate::transport::{ModelRequest, ModelTransport, ModelTurn};
use async_trait::async_trait;
use duet_core::{match_phrase, resolve_tool_call, ConversationTurn, PlaybackAction, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Reply used when the confirmation round yields no text
pub const CONFIRMATION_FALLBACK: &str = "Done.";

const LOCAL_HINT: &str = "Try \"track 1\", \"track 2\" or \"combine\".";

/// Outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Playback action the caller should apply, if any
    pub action: Option<PlaybackAction>,
}

impl ChatReply {
    /// A reply with no playback action
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            action: None,
        }
    }
}

/// Decides the reply and action for a conversation.
///
/// Implementations are stateless across turns; the whole history is passed in
/// on every call.
#[async_trait]
pub trait ChatArbitrator: Send + Sync {
    async fn respond(&self, conversation: &[ConversationTurn]) -> Result<ChatReply>;
}

/// Model-backed arbitration with a two-round tool-call exchange.
///
/// 1. Send the conversation with the audio tool catalogue attached.
/// 2. No recognized tool call: reply with the response text, no second round.
/// 3. Recognized tool call: echo the call and its resolved instruction back to
///    the model without tools, and use that text as the confirmation.
pub struct ToolCallingArbitrator<T> {
    transport: T,
    system_prompt: String,
}

impl<T: ModelTransport> ToolCallingArbitrator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            system_prompt: CHAT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replace the default system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

#[async_trait]
impl<T: ModelTransport> ChatArbitrator for ToolCallingArbitrator<T> {
    async fn respond(&self, conversation: &[ConversationTurn]) -> Result<ChatReply> {
        let turns: Vec<ModelTurn> = conversation.iter().map(ModelTurn::from).collect();

        let initial = ModelRequest {
            system_prompt: self.system_prompt.clone(),
            turns: turns.clone(),
            tools: audio_tools(),
        };

        debug!(
            transport = self.transport.name(),
            turns = initial.turns.len(),
            "Requesting initial model response"
        );
        let first = self.transport.invoke(&initial).await?;

        let Some(call) = first.tool_call.clone() else {
            return Ok(ChatReply::text(first.text()));
        };

        let Some(instruction) = resolve_tool_call(&call) else {
            warn!(tool = %call.name, args = ?call.args, "Ignoring unrecognized tool call");
            return Ok(ChatReply::text(first.text()));
        };

        let action = PlaybackAction::from_command(instruction.command());
        info!(
            tool = %call.name,
            command = %instruction.command(),
            action = ?action,
            "Resolved tool call"
        );

        let tool_result = serde_json::to_value(&instruction)
            .map_err(|e| AssistantError::ParseError(format!("Failed to serialize instruction: {e}")))?;

        let mut confirmation_turns = turns;
        confirmation_turns.push(ModelTurn::tool_call(call.clone()));
        confirmation_turns.push(ModelTurn::tool_result(call.name, tool_result));

        let confirmation = ModelRequest {
            system_prompt: self.system_prompt.clone(),
            turns: confirmation_turns,
            tools: Vec::new(),
        };

        debug!(
            transport = self.transport.name(),
            turns = confirmation.turns.len(),
            "Requesting confirmation"
        );
        let second = self
            .transport
            .invoke(&confirmation)
            .await
            .map_err(|source| AssistantError::Confirmation {
                action,
                source: Box::new(source),
            })?;

        let reply = second.text();
        let reply = if reply.is_empty() {
            CONFIRMATION_FALLBACK.to_string()
        } else {
            reply
        };

        Ok(ChatReply { reply, action })
    }
}

/// Exact-phrase arbitration on the last user turn. Never performs I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIntentArbitrator;

impl LocalIntentArbitrator {
    pub fn new() -> Self {
        Self
    }

    fn confirmation(action: PlaybackAction) -> &'static str {
        match action {
            PlaybackAction::Track1 => "Playing track 1.",
            PlaybackAction::Track2 => "Playing track 2.",
            PlaybackAction::Combine => "Playing both tracks.",
        }
    }
}

#[async_trait]
impl ChatArbitrator for LocalIntentArbitrator {
    async fn respond(&self, conversation: &[ConversationTurn]) -> Result<ChatReply> {
        let last_user = conversation
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map_or("", |turn| turn.content.as_str());

        let action = match_phrase(last_user).and_then(PlaybackAction::from_command);

        Ok(match action {
            Some(action) => {
                info!(action = %action, "Matched local phrase");
                ChatReply {
                    reply: Self::confirmation(action).to_string(),
                    action: Some(action),
                }
            }
            None => ChatReply::text(LOCAL_HINT),
        })
    }
}
