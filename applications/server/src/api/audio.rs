/// Direct audio command API routes
use crate::error::{Result, ServerError};
use axum::{extract::rejection::JsonRejection, Json};
use duet_core::{resolve, AudioCommand, AudioInstruction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AudioRequest {
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub audio: AudioInstruction,
}

/// POST /api/audio - Resolve a command to the instruction the client plays
pub async fn resolve_command(
    payload: std::result::Result<Json<AudioRequest>, JsonRejection>,
) -> Result<Json<AudioResponse>> {
    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let command = request
        .command
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Missing required field: command".to_string()))?;

    let command: AudioCommand = command.parse()?;

    Ok(Json(AudioResponse {
        audio: resolve(command),
    }))
}
