//! Duet - Playback State Machine
//!
//! Platform-agnostic two-channel playback control for Duet.
//!
//! This crate provides:
//! - A playback state (`idle`, `track1`, `track2`, `combine`) describing what
//!   should be audible right now
//! - Total transitions: every command is valid from every state
//! - Stop-then-play semantics, so repeating a command restarts its tracks
//! - Per-channel load error tracking that never blocks a transition
//!
//! # Architecture
//!
//! `duet-playback` owns no audio engine:
//! - No dependency on any decoder or output device
//! - No dependency on the model transport
//! - One machine per session, mutated through `&mut self`
//!
//! Platform-specific audio output is provided via the [`Channel`] and
//! [`ChannelFactory`] traits. Channels are created lazily on the first play
//! command and released on teardown.
//!
//! # Example
//!
//! ```rust
//! use duet_playback::{Channel, ChannelFactory, ChannelId, LoadErrorReporter, PlaybackMachine, PlaybackState, Result};
//!
//! struct Silent;
//!
//! impl Channel for Silent {
//!     fn play(&mut self) {}
//!     fn stop(&mut self) {}
//! }
//!
//! struct SilentFactory;
//!
//! impl ChannelFactory for SilentFactory {
//!     fn create(
//!         &mut self,
//!         _channel: ChannelId,
//!         _url: &str,
//!         _reporter: LoadErrorReporter,
//!     ) -> Result<Box<dyn Channel>> {
//!         Ok(Box::new(Silent))
//!     }
//! }
//!
//! let mut machine = PlaybackMachine::new(SilentFactory);
//! assert_eq!(machine.state(), PlaybackState::Idle);
//!
//! machine.play_combine();
//! assert_eq!(machine.state(), PlaybackState::Combine);
//!
//! machine.stop_all();
//! assert_eq!(machine.state(), PlaybackState::Idle);
//! ```

mod channel;
mod error;
mod machine;
pub mod types;

// Public exports
pub use channel::{Channel, ChannelFactory, LoadErrorReporter};
pub use error::{PlaybackError, Result};
pub use machine::PlaybackMachine;
pub use types::{ChannelId, PlaybackState};
