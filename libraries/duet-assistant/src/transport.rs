//! Provider-neutral model transport contract.

use crate::error::Result;
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use duet_core::{ConversationTurn, Role, ToolCall};
use serde_json::Value;
use std::sync::Arc;

/// Author of a turn as the model sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// The user, including synthetic tool-result turns
    User,
    /// The model, including synthetic tool-call turns
    Model,
}

/// One part of a model turn
#[derive(Debug, Clone, PartialEq)]
pub enum ModelPart {
    /// Plain text
    Text(String),
    /// A tool invocation asserted by the model
    ToolCall(ToolCall),
    /// The outcome of executing a tool
    ToolResult {
        /// Name of the tool that ran
        name: String,
        /// Result payload (a JSON object)
        response: Value,
    },
}

/// A turn in the model-facing conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTurn {
    pub role: TurnRole,
    pub parts: Vec<ModelPart>,
}

impl ModelTurn {
    /// A user turn with a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![ModelPart::Text(text.into())],
        }
    }

    /// A model turn with a single text part
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![ModelPart::Text(text.into())],
        }
    }

    /// A synthetic model turn asserting a tool call
    pub fn tool_call(call: ToolCall) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![ModelPart::ToolCall(call)],
        }
    }

    /// A synthetic user turn carrying a tool's result
    pub fn tool_result(name: impl Into<String>, response: Value) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![ModelPart::ToolResult {
                name: name.into(),
                response,
            }],
        }
    }
}

impl From<&ConversationTurn> for ModelTurn {
    fn from(turn: &ConversationTurn) -> Self {
        match turn.role {
            Role::User => Self::user_text(turn.content.clone()),
            Role::Assistant => Self::model_text(turn.content.clone()),
        }
    }
}

/// Everything sent in one round trip
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelRequest {
    pub system_prompt: String,
    pub turns: Vec<ModelTurn>,
    /// Tools attached to this round; empty means the model cannot call any
    pub tools: Vec<ToolDefinition>,
}

/// What came back from one round trip
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelResponse {
    /// Text-bearing parts, in order
    pub text_parts: Vec<String>,
    /// First tool call in the response, if any
    pub tool_call: Option<ToolCall>,
}

impl ModelResponse {
    /// A text-only response
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text_parts: vec![text.into()],
            tool_call: None,
        }
    }

    /// A response carrying a tool call and no text
    pub fn with_tool_call(call: ToolCall) -> Self {
        Self {
            text_parts: Vec::new(),
            tool_call: Some(call),
        }
    }

    /// All text parts concatenated and trimmed; empty when there are none
    pub fn text(&self) -> String {
        self.text_parts.concat().trim().to_string()
    }
}

/// A language model reachable over some transport.
///
/// Implementations perform exactly one request per call and never retry.
/// Timeouts and non-success statuses come back as errors.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Returns the provider name (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Perform one round trip.
    async fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse>;
}

#[async_trait]
impl<T: ModelTransport + ?Sized> ModelTransport for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse> {
        (**self).invoke(request).await
    }
}
