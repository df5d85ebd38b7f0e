use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::error::{ControlError, EngineError};
use crate::library::Catalog;

use super::controller::{PlaybackController, Titles};
use super::engine::PlaybackEngine;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SessionState};

/// Spawn the worker that owns the engine and the playback session.
///
/// The engine is built on the worker itself because output streams are tied
/// to the thread that opened them. Commands are applied strictly in queue
/// order; between commands the worker wakes every `tick` to notice tracks
/// that played out.
pub(super) fn spawn_audio_thread<E, F>(
    catalog: Catalog,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    titles: Titles,
    tick: Duration,
    open_engine: F,
) -> JoinHandle<()>
where
    E: PlaybackEngine + 'static,
    F: FnOnce() -> Result<E, EngineError> + Send + 'static,
{
    thread::spawn(move || {
        let engine = match open_engine() {
            Ok(engine) => engine,
            Err(e) => {
                error!("audio disabled: {e}");
                publish_info(
                    &playback_info,
                    PlaybackInfo {
                        state: SessionState::Empty,
                        title: e.to_string(),
                    },
                );
                return;
            }
        };

        let mut controller = PlaybackController::init(catalog, engine, titles);
        publish(&controller, &playback_info);

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Quit) => break,
                Ok(cmd) => {
                    debug!("audio command {cmd:?} at {:?}", controller.current_index());
                    if let Err(e) = apply(&mut controller, &cmd) {
                        report(&cmd, &e);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = controller.tick() {
                        warn!("could not rewind finished track: {e}");
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
            publish(&controller, &playback_info);
        }

        controller.teardown();
        publish(&controller, &playback_info);
        info!("audio worker stopped");
    })
}

fn apply<E: PlaybackEngine>(
    controller: &mut PlaybackController<E>,
    cmd: &AudioCmd,
) -> Result<(), ControlError> {
    match *cmd {
        AudioCmd::Play => controller.play(),
        AudioCmd::Pause => controller.pause(),
        AudioCmd::PlayPause => controller.toggle(),
        AudioCmd::Stop => controller.stop(),
        AudioCmd::Next => controller.next(),
        AudioCmd::Prev => controller.previous(),
        AudioCmd::Select(position) => controller.select(position),
        // Ends the loop before it gets here; teardown runs once the loop exits.
        AudioCmd::Quit => Ok(()),
    }
}

fn report(cmd: &AudioCmd, e: &ControlError) {
    match e {
        // Already logged when the handle was refused.
        ControlError::Acquire(_) => {}
        ControlError::InvalidSelection { .. } => warn!("ignoring {cmd:?}: {e}"),
        ControlError::EmptyCatalog | ControlError::Closed | ControlError::NoHandle => {
            debug!("ignoring {cmd:?}: {e}")
        }
    }
}

fn publish<E: PlaybackEngine>(controller: &PlaybackController<E>, playback_info: &PlaybackHandle) {
    publish_info(
        playback_info,
        PlaybackInfo {
            state: controller.state(),
            title: controller.title().to_string(),
        },
    );
}

fn publish_info(playback_info: &PlaybackHandle, info: PlaybackInfo) {
    if let Ok(mut shared) = playback_info.lock() {
        *shared = info;
    }
}
