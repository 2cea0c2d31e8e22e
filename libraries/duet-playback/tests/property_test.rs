//! Property-based tests for the playback machine
//!
//! Uses proptest to verify invariants across random command sequences.

mod common;

use common::{audible, RecordingFactory};
use duet_core::AudioCommand;
use duet_playback::{ChannelId, PlaybackMachine, PlaybackState};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_command() -> impl Strategy<Value = AudioCommand> {
    prop::sample::select(AudioCommand::ALL.to_vec())
}

fn arbitrary_commands() -> impl Strategy<Value = Vec<AudioCommand>> {
    prop::collection::vec(arbitrary_command(), 1..40)
}

fn expected_audible(state: PlaybackState) -> Vec<ChannelId> {
    match state {
        PlaybackState::Idle => vec![],
        PlaybackState::Track1 => vec![ChannelId::Track1],
        PlaybackState::Track2 => vec![ChannelId::Track2],
        PlaybackState::Combine => vec![ChannelId::Track1, ChannelId::Track2],
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: the final state depends only on the last command
    #[test]
    fn final_state_is_last_commands_target(commands in arbitrary_commands()) {
        let (factory, _recorder) = RecordingFactory::new();
        let mut machine = PlaybackMachine::new(factory);

        for command in &commands {
            machine.apply(*command);
        }

        let last = *commands.last().unwrap();
        prop_assert_eq!(machine.state(), PlaybackState::from(last));
    }

    /// Property: with healthy channels, exactly the state's channels are audible
    #[test]
    fn audible_channels_match_state(commands in arbitrary_commands()) {
        let (factory, recorder) = RecordingFactory::new();
        let mut machine = PlaybackMachine::new(factory);

        for command in commands {
            let state = machine.apply(command);
            prop_assert_eq!(audible(&recorder), expected_audible(state));
        }
    }

    /// Property: applying a command twice ends where applying it once does
    #[test]
    fn commands_are_idempotent(
        prefix in arbitrary_commands(),
        command in arbitrary_command(),
    ) {
        let (factory, recorder) = RecordingFactory::new();
        let mut machine = PlaybackMachine::new(factory);

        for c in prefix {
            machine.apply(c);
        }

        let once = machine.apply(command);
        let audible_once = audible(&recorder);
        let twice = machine.apply(command);

        prop_assert_eq!(once, twice);
        prop_assert_eq!(audible_once, audible(&recorder));
    }

    /// Property: a broken channel never blocks a transition
    #[test]
    fn failed_channel_never_blocks_state(commands in arbitrary_commands()) {
        let (factory, recorder) = RecordingFactory::failing(ChannelId::Track1);
        let mut machine = PlaybackMachine::new(factory);

        for command in commands {
            let state = machine.apply(command);
            prop_assert_eq!(state, PlaybackState::from(command));
            prop_assert!(!audible(&recorder).contains(&ChannelId::Track1));
        }
    }
}
