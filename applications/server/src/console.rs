//! Console channels for the interactive `chat` session
//!
//! No audio device is opened: each channel prints what it would do. When a
//! track directory is configured, a missing file is reported as a load error
//! just like an engine that failed to fetch the resource.

use duet_playback::{Channel, ChannelFactory, ChannelId, LoadErrorReporter, Result};
use std::path::PathBuf;

/// Creates [`ConsoleChannel`]s
#[derive(Debug, Default)]
pub struct ConsoleChannelFactory {
    static_dir: Option<PathBuf>,
}

impl ConsoleChannelFactory {
    /// `static_dir` is the directory `/tracks/*` URLs are served from, if any
    pub fn new(static_dir: Option<PathBuf>) -> Self {
        Self { static_dir }
    }

    fn local_path(&self, url: &str) -> Option<PathBuf> {
        self.static_dir
            .as_ref()
            .map(|dir| dir.join(url.trim_start_matches('/')))
    }
}

impl ChannelFactory for ConsoleChannelFactory {
    fn create(
        &mut self,
        channel: ChannelId,
        url: &str,
        reporter: LoadErrorReporter,
    ) -> Result<Box<dyn Channel>> {
        if let Some(path) = self.local_path(url) {
            if !path.is_file() {
                reporter.report(&format!("{} not found", path.display()));
            }
        }

        tracing::debug!(channel = %channel, url, "Console channel created");
        Ok(Box::new(ConsoleChannel {
            channel,
            url: url.to_string(),
            playing: false,
        }))
    }
}

/// Channel that prints play/stop transitions
#[derive(Debug)]
pub struct ConsoleChannel {
    channel: ChannelId,
    url: String,
    playing: bool,
}

impl Channel for ConsoleChannel {
    fn play(&mut self) {
        self.playing = true;
        println!("  ♪ {} playing ({})", self.channel, self.url);
    }

    fn stop(&mut self) {
        if self.playing {
            println!("  ■ {} stopped", self.channel);
        }
        self.playing = false;
    }
}
