//! One interactive chat session: history, arbitrator and playback machine

use duet_assistant::{AssistantError, ChatArbitrator};
use duet_core::ConversationTurn;
use duet_playback::{ChannelFactory, PlaybackMachine, PlaybackState};
use std::sync::Arc;

const BILLING_HINT: &str =
    "Chat is temporarily unavailable (no API credits). You can still use the audio: try \"track 1\", \"track 2\", or \"combine\".";

/// What a single line of input produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text to show as the assistant's reply
    pub reply: String,
    /// Playback state after the turn
    pub state: PlaybackState,
    /// Load advisory, if a channel is failing
    pub advisory: Option<String>,
}

pub struct ChatSession<F: ChannelFactory> {
    arbitrator: Arc<dyn ChatArbitrator>,
    machine: PlaybackMachine<F>,
    history: Vec<ConversationTurn>,
}

impl<F: ChannelFactory> ChatSession<F> {
    pub fn new(arbitrator: Arc<dyn ChatArbitrator>, factory: F) -> Self {
        Self {
            arbitrator,
            machine: PlaybackMachine::new(factory),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn machine(&self) -> &PlaybackMachine<F> {
        &self.machine
    }

    /// Stop playback without involving the assistant
    pub fn stop(&mut self) -> PlaybackState {
        self.machine.stop_all()
    }

    /// Handle one user message
    ///
    /// A local phrase starts playback before the assistant is asked; the
    /// assistant's action is then applied only if the phrase did not match, so
    /// a track is not restarted twice for one message. Errors become the reply
    /// and are not added to the history.
    pub async fn send(&mut self, text: &str) -> Option<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.history.push(ConversationTurn::user(text));
        let matched_locally = self.machine.trigger_by_message(text);

        let reply = match self.arbitrator.respond(&self.history).await {
            Ok(reply) => {
                if let Some(action) = reply.action.filter(|_| !matched_locally) {
                    self.machine.apply_action(action);
                }
                self.history.push(ConversationTurn::assistant(reply.reply.clone()));
                reply.reply
            }
            Err(e) => {
                tracing::warn!(status = e.status(), "Chat turn failed: {}", e);
                error_reply(&e)
            }
        };

        Some(TurnOutcome {
            reply,
            state: self.machine.state(),
            advisory: self.machine.last_error(),
        })
    }

    /// Release both channels
    pub fn close(&mut self) {
        self.machine.teardown();
    }
}

fn error_reply(error: &AssistantError) -> String {
    let message = error.message();
    let billing = error.status() == 400
        && ["credit", "balance", "billing"]
            .iter()
            .any(|word| message.contains(word));

    if billing {
        BILLING_HINT.to_string()
    } else {
        format!("Error: {message}")
    }
}
