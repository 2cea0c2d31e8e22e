//! Platform-agnostic audio channel traits
//!
//! Abstracts the audio engine for different platforms. A channel is a single
//! controllable playback unit bound to one resource URL.

use crate::error::Result;
use crate::types::ChannelId;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// A single controllable playback unit
///
/// Implementors wrap whatever the platform uses to play a file (an HTML audio
/// element bridge, a desktop output stream, a test recorder, ...). Calls are
/// fire-and-forget: an engine that cannot play reports it through the
/// [`LoadErrorReporter`] it was created with, never through these methods.
pub trait Channel: Send {
    /// Start playing from the current position
    fn play(&mut self);

    /// Stop playing and rewind to the beginning
    fn stop(&mut self);

    /// Release engine resources; the channel is not used afterwards
    fn unload(&mut self) {
        self.stop();
    }
}

/// Creates channels for the playback machine
///
/// Called lazily, at most once per channel between teardowns.
pub trait ChannelFactory: Send {
    /// Create the channel bound to `url`
    ///
    /// # Arguments
    /// * `channel` - Which of the two channels is being created
    /// * `url` - Resource the channel plays
    /// * `reporter` - Handle for reporting an asynchronous load failure
    ///
    /// # Returns
    /// * `Ok(channel)` - Channel ready for `play`/`stop`
    /// * `Err(_)` - Engine could not create the channel; the machine records
    ///   the error and treats the channel as silent
    fn create(
        &mut self,
        channel: ChannelId,
        url: &str,
        reporter: LoadErrorReporter,
    ) -> Result<Box<dyn Channel>>;
}

/// Error bookkeeping shared between a machine and its reporters
#[derive(Debug, Default)]
pub(crate) struct ErrorBoard {
    /// Most recent advisory for the caller
    pub(crate) last_error: Option<String>,

    /// Per-channel failure message; a failed channel plays nothing
    pub(crate) failures: [Option<String>; 2],
}

pub(crate) type SharedBoard = Arc<Mutex<ErrorBoard>>;

pub(crate) fn with_board<T>(board: &SharedBoard, f: impl FnOnce(&mut ErrorBoard) -> T) -> T {
    let mut guard = board.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Handle a channel uses to report that its resource failed to load
///
/// Audio engines typically discover load failures asynchronously, so the
/// reporter is `Clone + Send + Sync` and may be moved into engine callbacks.
/// Reports arriving after the machine was torn down are discarded.
#[derive(Debug, Clone)]
pub struct LoadErrorReporter {
    channel: ChannelId,
    board: SharedBoard,
}

impl LoadErrorReporter {
    pub(crate) fn new(channel: ChannelId, board: SharedBoard) -> Self {
        Self { channel, board }
    }

    /// Channel this reporter belongs to
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Report that the channel's resource could not be loaded
    ///
    /// Marks the channel failed and records a caller-visible advisory. Does
    /// not touch the playback state.
    pub fn report(&self, reason: &str) {
        warn!(channel = %self.channel, reason = %reason, "Audio channel failed to load");

        let message = format!("Failed to load {}", self.channel);
        with_board(&self.board, |board| {
            board.failures[self.channel.index()] = Some(message.clone());
            board.last_error = Some(message);
        });
    }
}
