//! Common test utilities: a channel factory that records every call
#![allow(dead_code)]

use duet_playback::{Channel, ChannelFactory, ChannelId, LoadErrorReporter, PlaybackError};
use std::sync::{Arc, Mutex};

/// A call observed on the channel capability surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Created(ChannelId),
    Play(ChannelId),
    Stop(ChannelId),
    Unload(ChannelId),
}

/// Everything the fake engine has seen
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub audible: Vec<ChannelId>,
    pub reporters: Vec<LoadErrorReporter>,
}

pub type SharedRecorder = Arc<Mutex<Recorder>>;

struct RecordingChannel {
    id: ChannelId,
    recorder: SharedRecorder,
}

impl RecordingChannel {
    fn record(&self, event: Event) {
        let mut recorder = self.recorder.lock().unwrap();
        recorder.events.push(event);
        match event {
            Event::Play(id) => {
                if !recorder.audible.contains(&id) {
                    recorder.audible.push(id);
                }
            }
            Event::Stop(id) | Event::Unload(id) => recorder.audible.retain(|c| *c != id),
            Event::Created(_) => {}
        }
    }
}

impl Channel for RecordingChannel {
    fn play(&mut self) {
        self.record(Event::Play(self.id));
    }

    fn stop(&mut self) {
        self.record(Event::Stop(self.id));
    }

    fn unload(&mut self) {
        self.record(Event::Unload(self.id));
    }
}

/// Factory handing out recording channels
pub struct RecordingFactory {
    recorder: SharedRecorder,
    fail_creation: Option<ChannelId>,
}

impl RecordingFactory {
    /// Factory whose channels all create successfully
    pub fn new() -> (Self, SharedRecorder) {
        let recorder = SharedRecorder::default();
        let factory = Self {
            recorder: Arc::clone(&recorder),
            fail_creation: None,
        };
        (factory, recorder)
    }

    /// Factory that refuses to create one channel
    pub fn failing(channel: ChannelId) -> (Self, SharedRecorder) {
        let (mut factory, recorder) = Self::new();
        factory.fail_creation = Some(channel);
        (factory, recorder)
    }
}

impl ChannelFactory for RecordingFactory {
    fn create(
        &mut self,
        channel: ChannelId,
        _url: &str,
        reporter: LoadErrorReporter,
    ) -> duet_playback::Result<Box<dyn Channel>> {
        if self.fail_creation == Some(channel) {
            return Err(PlaybackError::channel_creation(channel, "device busy"));
        }

        let mut recorder = self.recorder.lock().unwrap();
        recorder.events.push(Event::Created(channel));
        recorder.reporters.push(reporter);
        drop(recorder);

        Ok(Box::new(RecordingChannel {
            id: channel,
            recorder: Arc::clone(&self.recorder),
        }))
    }
}

// ===== Accessors =====

pub fn events(recorder: &SharedRecorder) -> Vec<Event> {
    recorder.lock().unwrap().events.clone()
}

pub fn clear_events(recorder: &SharedRecorder) {
    recorder.lock().unwrap().events.clear();
}

pub fn audible(recorder: &SharedRecorder) -> Vec<ChannelId> {
    let mut audible = recorder.lock().unwrap().audible.clone();
    audible.sort_by_key(|c| matches!(c, ChannelId::Track2));
    audible
}

/// Simulate the engine reporting a load failure for a created channel
pub fn report_load_error(recorder: &SharedRecorder, channel: ChannelId) {
    let reporter = recorder
        .lock()
        .unwrap()
        .reporters
        .iter()
        .find(|r| r.channel() == channel)
        .cloned()
        .expect("channel was never created");
    reporter.report("HTTP 404");
}
