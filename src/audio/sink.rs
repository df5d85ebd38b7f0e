//! `rodio`-backed `PlaybackEngine`: one `Sink` per prepared track.
//!
//! Opening and decoding happen in `create`, which leaves the sink paused at
//! the start of the file.

use std::fs::File;
use std::io::BufReader;

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::EngineError;
use crate::library::Track;

use super::engine::PlaybackEngine;

pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl PlaybackEngine for RodioEngine {
    type Handle = Sink;

    fn create(&mut self, track: &Track) -> Result<Sink, EngineError> {
        let file = File::open(&track.path).map_err(|source| EngineError::Open {
            path: track.path.clone(),
            source,
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
            path: track.path.clone(),
            reason: e.to_string(),
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        debug!("prepared sink for {:?}", track.path);
        Ok(sink)
    }

    fn start(&mut self, sink: &Sink) {
        sink.play();
    }

    fn pause(&mut self, sink: &Sink) {
        sink.pause();
    }

    fn stop(&mut self, sink: &Sink) {
        sink.stop();
    }

    fn release(&mut self, sink: Sink) {
        drop(sink);
    }

    fn is_playing(&self, sink: &Sink) -> bool {
        !sink.is_paused() && !sink.empty()
    }
}
