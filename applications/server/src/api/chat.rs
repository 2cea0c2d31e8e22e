/// Chat API routes
use crate::error::{Result, ServerError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use duet_assistant::{AssistantError, ChatReply, CONFIRMATION_FALLBACK, MISSING_API_KEY_MESSAGE};
use duet_core::ConversationTurn;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ConversationTurn>,
}

/// POST /api/chat - Arbitrate one chat turn
///
/// Returns `{reply, action}`; the client applies `action` to its playback machine.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let arbitrator = state
        .arbitrator
        .as_ref()
        .ok_or_else(|| AssistantError::Config(MISSING_API_KEY_MESSAGE.to_string()))?;

    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    if request.messages.is_empty() {
        return Err(ServerError::BadRequest(
            "messages must contain at least one turn".to_string(),
        ));
    }

    tracing::debug!(turns = request.messages.len(), "Chat request");

    match arbitrator.respond(&request.messages).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) if e.is_confirmation_failure() && state.fallback_on_confirmation_failure => {
            tracing::warn!(
                action = ?e.decided_action(),
                "Confirmation failed, replying with fallback: {}",
                e
            );
            Ok(Json(ChatReply {
                reply: CONFIRMATION_FALLBACK.to_string(),
                action: e.decided_action(),
            }))
        }
        Err(e) => Err(e.into()),
    }
}
