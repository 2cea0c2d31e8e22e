/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use duet_assistant::AssistantError;
use duet_core::CoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid command: {0}")]
    Command(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Command(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Assistant(AssistantError::Config(msg)) => {
                tracing::error!("Chat is not configured: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServerError::Assistant(ref e) => {
                tracing::error!(status = e.status(), "Chat request failed: {}", e);
                let status =
                    StatusCode::from_u16(e.status()).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, e.message())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
