/// Shared application state
use crate::config::{AssistantMode, AssistantSettings};
use crate::error::Result;
use duet_assistant::{ChatArbitrator, GeminiTransport, LocalIntentArbitrator, ToolCallingArbitrator};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when chat has no credential; `/api/chat` then answers 500
    pub arbitrator: Option<Arc<dyn ChatArbitrator>>,
    pub fallback_on_confirmation_failure: bool,
}

impl AppState {
    pub fn new(arbitrator: Arc<dyn ChatArbitrator>) -> Self {
        Self {
            arbitrator: Some(arbitrator),
            fallback_on_confirmation_failure: false,
        }
    }

    /// State for a server whose chat endpoint is not configured
    pub fn unconfigured() -> Self {
        Self {
            arbitrator: None,
            fallback_on_confirmation_failure: false,
        }
    }

    #[must_use]
    pub fn with_confirmation_fallback(mut self, enabled: bool) -> Self {
        self.fallback_on_confirmation_failure = enabled;
        self
    }

    /// Build the state described by the assistant settings
    ///
    /// A missing credential is not an error: the server still starts and
    /// `/api/audio` keeps working.
    pub fn from_settings(settings: &AssistantSettings) -> Result<Self> {
        let state = match settings.mode {
            AssistantMode::Local => {
                tracing::info!("Chat uses local phrase matching");
                Self::new(Arc::new(LocalIntentArbitrator::new()))
            }
            AssistantMode::Model => match settings.gemini_config() {
                Some(gemini) => {
                    let transport = GeminiTransport::new(gemini)?;
                    tracing::info!(model = %transport.model(), "Chat uses model arbitration");
                    Self::new(Arc::new(ToolCallingArbitrator::new(transport)))
                }
                None => {
                    tracing::warn!(
                        "GEMINI_API_KEY is not set; /api/chat will answer 500 until it is configured"
                    );
                    Self::unconfigured()
                }
            },
        };

        Ok(state.with_confirmation_fallback(settings.fallback_on_confirmation_failure))
    }
}
