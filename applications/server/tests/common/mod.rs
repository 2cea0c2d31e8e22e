/// Common test utilities and fixtures
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
};
use duet_assistant::{AssistantError, ChatArbitrator, ChatReply};
use duet_core::ConversationTurn;
use serde_json::Value;
use std::sync::Mutex;

/// Arbitrator returning one canned outcome and recording what it saw
pub struct StubArbitrator {
    outcome: Mutex<Option<duet_assistant::Result<ChatReply>>>,
    pub seen: Mutex<Vec<Vec<ConversationTurn>>>,
}

impl StubArbitrator {
    pub fn replying(reply: ChatReply) -> Self {
        Self::with(Ok(reply))
    }

    pub fn failing(error: AssistantError) -> Self {
        Self::with(Err(error))
    }

    fn with(outcome: duet_assistant::Result<ChatReply>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatArbitrator for StubArbitrator {
    async fn respond(&self, conversation: &[ConversationTurn]) -> duet_assistant::Result<ChatReply> {
        self.seen.lock().unwrap().push(conversation.to_vec());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("stub arbitrator called more than once")
    }
}

/// Build a JSON POST request
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
