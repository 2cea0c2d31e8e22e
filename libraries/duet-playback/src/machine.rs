//! Playback machine - core orchestration
//!
//! Owns the two channels and the playback state, and applies commands to them.

use crate::{
    channel::{with_board, Channel, ChannelFactory, LoadErrorReporter, SharedBoard},
    types::{ChannelId, PlaybackState},
};
use duet_core::{match_phrase, AudioCommand, AudioInstruction, PlaybackAction};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of one channel handle
enum ChannelSlot {
    /// Not created yet
    Unloaded,

    /// Created and usable
    Ready(Box<dyn Channel>),

    /// Creation failed; stays silent until teardown
    Failed,
}

/// Two-channel playback state machine
///
/// One machine per session. Every `(state, command)` pair has a defined next
/// state; there is no invalid transition. Applying a command stops every
/// channel outside the command's set, then stops and restarts every channel in
/// it, so a repeated command restarts its tracks from the beginning.
///
/// Load failures never block a transition: the state always reflects the
/// requested command, even when a failed channel makes the request inaudible.
/// Callers see the discrepancy through [`last_error`](Self::last_error).
pub struct PlaybackMachine<F: ChannelFactory> {
    factory: F,
    track1: ChannelSlot,
    track2: ChannelSlot,
    state: PlaybackState,
    board: SharedBoard,
}

impl<F: ChannelFactory> PlaybackMachine<F> {
    /// Create an idle machine; no channel is created until the first play
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            track1: ChannelSlot::Unloaded,
            track2: ChannelSlot::Unloaded,
            state: PlaybackState::Idle,
            board: SharedBoard::default(),
        }
    }

    // ===== Queries =====

    /// What is audible right now
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Most recent channel advisory, if any
    pub fn last_error(&self) -> Option<String> {
        with_board(&self.board, |board| board.last_error.clone())
    }

    /// Whether a channel failed to create or load
    pub fn channel_failed(&self, channel: ChannelId) -> bool {
        with_board(&self.board, |board| board.failures[channel.index()].is_some())
    }

    /// Whether a channel has been created (successfully or not)
    pub fn channel_loaded(&self, channel: ChannelId) -> bool {
        !matches!(self.slot(channel), ChannelSlot::Unloaded)
    }

    // ===== Transitions =====

    /// Apply a command and return the resulting state
    pub fn apply(&mut self, command: AudioCommand) -> PlaybackState {
        let targets = ChannelId::targets(command);

        if !targets.is_empty() {
            self.ensure_loaded();
        }

        for channel in ChannelId::ALL {
            if !targets.contains(&channel) {
                self.stop_channel(channel);
            }
        }
        for &channel in targets {
            self.stop_channel(channel);
        }
        for &channel in targets {
            self.play_channel(channel);
        }

        if !targets.is_empty() {
            self.refresh_error(targets);
        }

        let previous = self.state;
        self.state = PlaybackState::from(command);
        debug!(from = %previous, to = %self.state, command = %command, "Applied playback command");

        self.state
    }

    /// Apply a resolved instruction
    pub fn apply_instruction(&mut self, instruction: &AudioInstruction) -> PlaybackState {
        self.apply(instruction.command())
    }

    /// Apply the action tag produced by a conversation turn
    pub fn apply_action(&mut self, action: PlaybackAction) -> PlaybackState {
        self.apply(action.command())
    }

    /// Play track 1 alone
    pub fn play_track1(&mut self) -> PlaybackState {
        self.apply(AudioCommand::Track1)
    }

    /// Play track 2 alone
    pub fn play_track2(&mut self) -> PlaybackState {
        self.apply(AudioCommand::Track2)
    }

    /// Play both tracks together
    ///
    /// The two starts are issued back to back; sample-level alignment is up
    /// to the engine.
    pub fn play_combine(&mut self) -> PlaybackState {
        self.apply(AudioCommand::Combine)
    }

    /// Stop both channels and go idle
    pub fn stop_all(&mut self) -> PlaybackState {
        self.apply(AudioCommand::Stop)
    }

    /// Apply a message's local phrase, if it has one
    ///
    /// Returns whether the message matched.
    pub fn trigger_by_message(&mut self, message: &str) -> bool {
        match match_phrase(message) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    /// Release both channels and return to a fresh idle machine
    ///
    /// Load errors reported by the released channels after this point are
    /// discarded.
    pub fn teardown(&mut self) {
        for channel in ChannelId::ALL {
            if let ChannelSlot::Ready(mut handle) =
                std::mem::replace(self.slot_mut(channel), ChannelSlot::Unloaded)
            {
                handle.unload();
            }
        }

        self.board = SharedBoard::default();
        self.state = PlaybackState::Idle;
        debug!("Playback session torn down");
    }

    // ===== Internals =====

    fn slot(&self, channel: ChannelId) -> &ChannelSlot {
        match channel {
            ChannelId::Track1 => &self.track1,
            ChannelId::Track2 => &self.track2,
        }
    }

    fn slot_mut(&mut self, channel: ChannelId) -> &mut ChannelSlot {
        match channel {
            ChannelId::Track1 => &mut self.track1,
            ChannelId::Track2 => &mut self.track2,
        }
    }

    /// Create any channel not created yet
    fn ensure_loaded(&mut self) {
        for channel in ChannelId::ALL {
            if !matches!(self.slot(channel), ChannelSlot::Unloaded) {
                continue;
            }

            let reporter = LoadErrorReporter::new(channel, Arc::clone(&self.board));
            let slot = match self.factory.create(channel, channel.url(), reporter) {
                Ok(handle) => ChannelSlot::Ready(handle),
                Err(e) => {
                    warn!(channel = %channel, error = %e, "Audio channel creation failed");
                    let message = e.to_string();
                    with_board(&self.board, |board| {
                        board.failures[channel.index()] = Some(message.clone());
                        board.last_error = Some(message);
                    });
                    ChannelSlot::Failed
                }
            };
            *self.slot_mut(channel) = slot;
        }
    }

    fn stop_channel(&mut self, channel: ChannelId) {
        if let ChannelSlot::Ready(handle) = self.slot_mut(channel) {
            handle.stop();
        }
    }

    fn play_channel(&mut self, channel: ChannelId) {
        if self.channel_failed(channel) {
            debug!(channel = %channel, "Skipping play on failed channel");
            return;
        }
        if let ChannelSlot::Ready(handle) = self.slot_mut(channel) {
            handle.play();
        }
    }

    /// Clear the advisory after a play, unless a target channel is known bad
    fn refresh_error(&self, targets: &[ChannelId]) {
        with_board(&self.board, |board| {
            board.last_error = targets
                .iter()
                .find_map(|channel| board.failures[channel.index()].clone());
        });
    }
}

impl<F: ChannelFactory> Drop for PlaybackMachine<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
