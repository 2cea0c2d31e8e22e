//! Tool-call arbitration against a scripted transport.

use async_trait::async_trait;
use duet_assistant::{
    AssistantError, ChatArbitrator, ModelPart, ModelRequest, ModelResponse, ModelTransport,
    ToolCallingArbitrator, TurnRole, CONFIRMATION_FALLBACK,
};
use duet_core::{ConversationTurn, PlaybackAction, ToolCall};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<duet_assistant::Result<ModelResponse>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedTransport {
    fn new(script: Vec<duet_assistant::Result<ModelResponse>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, request: &ModelRequest) -> duet_assistant::Result<ModelResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

fn play_track(track: &str) -> ModelResponse {
    ModelResponse::with_tool_call(ToolCall::new("play_track", json!({ "track": track })))
}

fn upstream(status: u16, message: &str) -> AssistantError {
    AssistantError::Upstream {
        status,
        message: message.into(),
    }
}

fn conversation(text: &str) -> Vec<ConversationTurn> {
    vec![ConversationTurn::user(text)]
}

#[tokio::test]
async fn tool_call_gets_confirmed_by_second_round() {
    let transport = ScriptedTransport::new(vec![
        Ok(play_track("1")),
        Ok(ModelResponse::text_only("Sure, playing track 1!")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let reply = arbitrator.respond(&conversation("play track 1")).await.unwrap();

    assert_eq!(reply.reply, "Sure, playing track 1!");
    assert_eq!(reply.action, Some(PlaybackAction::Track1));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn second_round_carries_call_and_result_without_tools() {
    let transport = ScriptedTransport::new(vec![
        Ok(ModelResponse::with_tool_call(ToolCall::without_args("combine_tracks"))),
        Ok(ModelResponse::text_only("Both tracks are on.")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    arbitrator.respond(&conversation("both please")).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].tools.len(), 3);
    assert!(requests[1].tools.is_empty());

    let turns = &requests[1].turns;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0], requests[0].turns[0]);

    assert_eq!(turns[1].role, TurnRole::Model);
    assert_eq!(
        turns[1].parts,
        vec![ModelPart::ToolCall(ToolCall::without_args("combine_tracks"))]
    );

    assert_eq!(turns[2].role, TurnRole::User);
    assert_eq!(
        turns[2].parts,
        vec![ModelPart::ToolResult {
            name: "combine_tracks".into(),
            response: json!({
                "command": "combine",
                "urls": ["/tracks/track1.mp3", "/tracks/track2.mp3"]
            }),
        }]
    );
}

#[tokio::test]
async fn plain_text_makes_exactly_one_call() {
    let transport = ScriptedTransport::new(vec![Ok(ModelResponse::text_only(
        "  The capital of France is Paris.  ",
    ))]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let reply = arbitrator
        .respond(&conversation("What is the capital of France?"))
        .await
        .unwrap();

    assert_eq!(reply.reply, "The capital of France is Paris.");
    assert_eq!(reply.action, None);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn first_round_failure_skips_second_round() {
    let transport = ScriptedTransport::new(vec![Err(upstream(500, "internal"))]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let err = arbitrator.respond(&conversation("play track 1")).await.unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "internal");
    assert!(!err.is_confirmation_failure());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn unrecognized_tool_call_falls_back_to_text() {
    let transport = ScriptedTransport::new(vec![Ok(ModelResponse {
        text_parts: vec!["I can't do that.".into()],
        tool_call: Some(ToolCall::new("set_volume", json!({ "level": 11 }))),
    })]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let reply = arbitrator.respond(&conversation("louder")).await.unwrap();

    assert_eq!(reply.reply, "I can't do that.");
    assert_eq!(reply.action, None);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn unknown_track_is_ignored() {
    let transport = ScriptedTransport::new(vec![Ok(play_track("3"))]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let reply = arbitrator.respond(&conversation("play track 3")).await.unwrap();

    assert_eq!(reply.reply, "");
    assert_eq!(reply.action, None);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn numeric_track_argument_is_accepted() {
    let transport = ScriptedTransport::new(vec![
        Ok(ModelResponse::with_tool_call(ToolCall::new(
            "play_track",
            json!({ "track": 2 }),
        ))),
        Ok(ModelResponse::text_only("Track 2 it is.")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport);

    let reply = arbitrator.respond(&conversation("track two")).await.unwrap();
    assert_eq!(reply.action, Some(PlaybackAction::Track2));
}

#[tokio::test]
async fn stop_is_confirmed_without_action() {
    let transport = ScriptedTransport::new(vec![
        Ok(ModelResponse::with_tool_call(ToolCall::without_args("stop_audio"))),
        Ok(ModelResponse::text_only("Stopped.")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let reply = arbitrator.respond(&conversation("stop")).await.unwrap();

    assert_eq!(reply.reply, "Stopped.");
    assert_eq!(reply.action, None);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn empty_confirmation_uses_fallback() {
    let transport = ScriptedTransport::new(vec![
        Ok(play_track("2")),
        Ok(ModelResponse::text_only("   ")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport);

    let reply = arbitrator.respond(&conversation("track 2")).await.unwrap();

    assert_eq!(reply.reply, CONFIRMATION_FALLBACK);
    assert_eq!(reply.action, Some(PlaybackAction::Track2));
}

#[tokio::test]
async fn confirmation_failure_keeps_decided_action() {
    let transport = ScriptedTransport::new(vec![
        Ok(play_track("1")),
        Err(AssistantError::Timeout("deadline elapsed".into())),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport);

    let err = arbitrator.respond(&conversation("play track 1")).await.unwrap_err();

    assert!(err.is_confirmation_failure());
    assert_eq!(err.decided_action(), Some(PlaybackAction::Track1));
    assert_eq!(err.status(), 504);
}

#[tokio::test]
async fn custom_system_prompt_is_sent_on_both_rounds() {
    let transport = ScriptedTransport::new(vec![
        Ok(play_track("1")),
        Ok(ModelResponse::text_only("ok")),
    ]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone()).with_system_prompt("terse");

    arbitrator.respond(&conversation("track 1")).await.unwrap();

    for request in transport.requests() {
        assert_eq!(request.system_prompt, "terse");
    }
}

#[tokio::test]
async fn history_is_forwarded_in_order() {
    let transport = ScriptedTransport::new(vec![Ok(ModelResponse::text_only("Hello again."))]);
    let arbitrator = ToolCallingArbitrator::new(transport.clone());

    let history = vec![
        ConversationTurn::user("hi"),
        ConversationTurn::assistant("Hello!"),
        ConversationTurn::user("hi again"),
    ];
    arbitrator.respond(&history).await.unwrap();

    let roles: Vec<TurnRole> = transport.requests()[0].turns.iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![TurnRole::User, TurnRole::Model, TurnRole::User]);
}
