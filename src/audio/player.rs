use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::EngineError;
use crate::library::Catalog;

use super::controller::Titles;
use super::engine::PlaybackEngine;
use super::sink::RodioEngine;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// UI-side handle to the audio worker: a command queue in, a snapshot out.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the worker on the default output device.
    pub fn new(catalog: Catalog, titles: Titles, tick: Duration) -> Self {
        Self::with_engine(catalog, titles, tick, RodioEngine::open_default)
    }

    /// Start the worker with an engine built by `open_engine` on the worker thread.
    pub fn with_engine<E, F>(catalog: Catalog, titles: Titles, tick: Duration, open_engine: F) -> Self
    where
        E: PlaybackEngine + 'static,
        F: FnOnce() -> Result<E, EngineError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            catalog,
            rx,
            playback_info.clone(),
            titles,
            tick,
            open_engine,
        );

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Tear the session down and wait for the worker to exit.
    pub fn shutdown(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
