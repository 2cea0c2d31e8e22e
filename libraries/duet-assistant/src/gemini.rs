//! Gemini `generateContent` transport.

use crate::error::{AssistantError, Result, MISSING_API_KEY_MESSAGE};
use crate::tools::ToolDefinition;
use crate::transport::{ModelPart, ModelRequest, ModelResponse, ModelTransport, ModelTurn, TurnRole};
use async_trait::async_trait;
use duet_core::ToolCall;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`GeminiTransport`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL without trailing slash (e.g. `https://generativelanguage.googleapis.com/v1beta`)
    pub api_base: String,
    pub model: String,
    pub max_output_tokens: u32,
    /// Upper bound for one round trip
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create a config with default endpoint, model and limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

/// [`ModelTransport`] backed by the Gemini REST API.
pub struct GeminiTransport {
    http: Client,
    config: GeminiConfig,
}

impl GeminiTransport {
    /// Create a transport, validating the config.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::Config(MISSING_API_KEY_MESSAGE.to_string()));
        }

        let api_base = config.api_base.trim_end_matches('/').to_string();
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(AssistantError::Config(
                "API base must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Duet/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: GeminiConfig { api_base, ..config },
        })
    }

    /// Model identifier this transport talks to.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ModelTransport for GeminiTransport {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse> {
        let url = self.config.endpoint();
        let body = GenerateContentRequest::build(request, self.config.max_output_tokens);

        debug!(
            model = %self.config.model,
            turns = request.turns.len(),
            tools = request.tools.len(),
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout(e.to_string())
                } else if e.is_connect() {
                    AssistantError::Unreachable(e.to_string())
                } else {
                    AssistantError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let payload: GenerateContentResponse = response.json().await.map_err(|e| {
                AssistantError::ParseError(format!("Failed to parse generateContent response: {e}"))
            })?;
            Ok(payload.into_model_response())
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(&body);
            warn!(status = %status, error = %message, "Model API returned an error");
            Err(AssistantError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pick the most specific message out of an error body.
///
/// Order: `error.message`, then `error.details[0].message`, then the raw body.
fn upstream_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let from_message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let from_details = error
        .and_then(|e| e.get("details"))
        .and_then(|d| d.get(0))
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    from_message
        .or(from_details)
        .map_or_else(|| body.trim().to_string(), str::to_string)
}

// Wire format

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    system_instruction: WireContent,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTools>,
    generation_config: WireGenerationConfig,
}

impl GenerateContentRequest {
    fn build(request: &ModelRequest, max_output_tokens: u32) -> Self {
        let tools = if request.tools.is_empty() {
            Vec::new()
        } else {
            vec![WireTools {
                function_declarations: request.tools.iter().map(WireFunctionDeclaration::from).collect(),
            }]
        };

        Self {
            contents: request.turns.iter().map(WireContent::from).collect(),
            system_instruction: WireContent {
                role: None,
                parts: vec![WirePart::text(request.system_prompt.clone())],
            },
            tools,
            generation_config: WireGenerationConfig { max_output_tokens },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

impl From<&ModelTurn> for WireContent {
    fn from(turn: &ModelTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        };
        Self {
            role: Some(role.to_string()),
            parts: turn.parts.iter().map(WirePart::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
    /// Reasoning summary; never shown to the user
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

impl WirePart {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }
}

impl From<&ModelPart> for WirePart {
    fn from(part: &ModelPart) -> Self {
        match part {
            ModelPart::Text(text) => Self::text(text.clone()),
            ModelPart::ToolCall(call) => Self {
                function_call: Some(WireFunctionCall {
                    name: call.name.clone(),
                    args: Value::Object(call.args.clone()),
                }),
                ..Self::default()
            },
            ModelPart::ToolResult { name, response } => Self {
                function_response: Some(WireFunctionResponse {
                    name: name.clone(),
                    response: response.clone(),
                }),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTools {
    function_declarations: Vec<WireFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct WireFunctionDeclaration {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Value>,
}

impl From<&ToolDefinition> for WireFunctionDeclaration {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
}

impl GenerateContentResponse {
    /// Text from non-thought parts of the first candidate plus its first function call.
    fn into_model_response(self) -> ModelResponse {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        let mut response = ModelResponse::default();
        for part in parts {
            if part.thought == Some(true) {
                continue;
            }
            if let Some(text) = part.text {
                response.text_parts.push(text);
            }
            if response.tool_call.is_none() {
                if let Some(call) = part.function_call {
                    response.tool_call = Some(ToolCall::new(call.name, call.args));
                }
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::audio_tools;
    use serde_json::json;

    #[test]
    fn error_message_prefers_top_level_message() {
        let body = r#"{"error":{"message":"API key not valid","details":[{"message":"inner"}]}}"#;
        assert_eq!(upstream_error_message(body), "API key not valid");
    }

    #[test]
    fn error_message_falls_back_to_details_then_body() {
        let body = r#"{"error":{"details":[{"message":"quota exceeded"}]}}"#;
        assert_eq!(upstream_error_message(body), "quota exceeded");
        assert_eq!(upstream_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn request_omits_tools_when_none_attached() {
        let request = ModelRequest {
            system_prompt: "be brief".into(),
            turns: vec![ModelTurn::user_text("hi")],
            tools: Vec::new(),
        };
        let json = serde_json::to_value(GenerateContentRequest::build(&request, 1024)).unwrap();

        assert!(json.get("tools").is_none());
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn request_declares_tools_and_tool_turns() {
        let request = ModelRequest {
            system_prompt: String::new(),
            turns: vec![
                ModelTurn::tool_call(ToolCall::new("play_track", json!({ "track": "1" }))),
                ModelTurn::tool_result("play_track", json!({ "command": "track1" })),
            ],
            tools: audio_tools(),
        };
        let json = serde_json::to_value(GenerateContentRequest::build(&request, 256)).unwrap();

        let decls = &json["tools"][0]["functionDeclarations"];
        assert_eq!(decls.as_array().map(Vec::len), Some(3));
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][0]["parts"][0]["functionCall"]["args"]["track"], "1");
        assert_eq!(json["contents"][1]["parts"][0]["functionResponse"]["name"], "play_track");
    }

    #[test]
    fn response_skips_thoughts_and_keeps_first_call() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "Here you go." },
                        { "functionCall": { "name": "combine_tracks" } },
                        { "functionCall": { "name": "stop_audio" } }
                    ]
                }
            }]
        }))
        .unwrap();

        let response = payload.into_model_response();
        assert_eq!(response.text(), "Here you go.");
        assert_eq!(response.tool_call.map(|c| c.name), Some("combine_tracks".into()));
    }

    #[test]
    fn empty_candidates_yield_empty_response() {
        let response = GenerateContentResponse::default().into_model_response();
        assert_eq!(response, ModelResponse::default());
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GeminiTransport::new(GeminiConfig::new("   ")).err().unwrap();
        assert_eq!(err.status(), 500);
        assert_eq!(err.message(), MISSING_API_KEY_MESSAGE);
    }
}
