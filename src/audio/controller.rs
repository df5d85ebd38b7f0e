//! The playback session: one catalog, one current index, at most one handle.
//!
//! Every index change releases the previous handle before the next one is
//! acquired, and the displayed title is updated together with the index.

use log::{debug, error, info};

use crate::config::UiSettings;
use crate::error::ControlError;
use crate::library::Catalog;

use super::engine::PlaybackEngine;
use super::queue::{wrap_next, wrap_prev};
use super::types::SessionState;

/// Text templates for the displayed title. `{}` stands for the track name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub now_playing: String,
    pub no_music: String,
    pub failed: String,
}

impl Titles {
    fn now_playing(&self, name: &str) -> String {
        self.now_playing.replacen("{}", name, 1)
    }

    fn failed(&self, name: &str) -> String {
        self.failed.replacen("{}", name, 1)
    }
}

impl From<&UiSettings> for Titles {
    fn from(ui: &UiSettings) -> Self {
        Self {
            now_playing: ui.now_playing_format.clone(),
            no_music: ui.no_music_text.clone(),
            failed: ui.error_format.clone(),
        }
    }
}

impl Default for Titles {
    fn default() -> Self {
        Self::from(&UiSettings::default())
    }
}

pub struct PlaybackController<E: PlaybackEngine> {
    catalog: Catalog,
    engine: E,
    handle: Option<E::Handle>,
    state: SessionState,
    titles: Titles,
    title: String,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    /// Build the session and eagerly prepare the first track.
    ///
    /// An empty catalog yields an `Empty` session showing the "no music" text.
    pub fn init(catalog: Catalog, engine: E, titles: Titles) -> Self {
        let title = titles.no_music.clone();
        let mut controller = Self {
            catalog,
            engine,
            handle: None,
            state: SessionState::Empty,
            titles,
            title,
        };

        if controller.catalog.is_empty() {
            error!("no tracks found; transport commands are disabled");
            return controller;
        }

        // A failure leaves the session in `Failed(0)`; it has already been logged.
        let _ = controller.prepare(0);
        controller
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.index()
    }

    /// The "now playing" label.
    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[cfg(test)]
    pub(crate) fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn play(&mut self) -> Result<(), ControlError> {
        match self.state {
            SessionState::Empty => Err(self.rejected()),
            SessionState::Failed(_) => Err(ControlError::NoHandle),
            SessionState::Playing(_) => Ok(()),
            SessionState::Stopped(i) | SessionState::Paused(i) => {
                let Some(handle) = self.handle.as_ref() else {
                    return Err(ControlError::NoHandle);
                };
                self.engine.start(handle);
                self.state = SessionState::Playing(i);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), ControlError> {
        if let SessionState::Playing(i) = self.state {
            if let Some(handle) = self.handle.as_ref() {
                self.engine.pause(handle);
            }
            self.state = SessionState::Paused(i);
        }
        Ok(())
    }

    /// Pause when playing, play otherwise.
    pub fn toggle(&mut self) -> Result<(), ControlError> {
        match self.state {
            SessionState::Playing(_) => self.pause(),
            _ => self.play(),
        }
    }

    /// Rewind the current track: the handle is replaced by a fresh one and the
    /// session waits for `play` at the same index.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        match self.state.index() {
            Some(i) => self.prepare(i),
            None => Err(self.rejected()),
        }
    }

    /// Switch to `position` and start playing it.
    pub fn select(&mut self, position: usize) -> Result<(), ControlError> {
        if self.state == SessionState::Empty {
            return Err(self.rejected());
        }
        let len = self.catalog.len();
        if position >= len {
            return Err(ControlError::InvalidSelection { position, len });
        }

        self.prepare(position)?;
        self.play()
    }

    pub fn next(&mut self) -> Result<(), ControlError> {
        match self.neighbour(wrap_next) {
            Some(i) => self.select(i),
            None => Err(self.rejected()),
        }
    }

    pub fn previous(&mut self) -> Result<(), ControlError> {
        match self.neighbour(wrap_prev) {
            Some(i) => self.select(i),
            None => Err(self.rejected()),
        }
    }

    /// Notice a track that played to the end and rewind it, so `play` starts
    /// it again from the beginning.
    pub fn tick(&mut self) -> Result<(), ControlError> {
        let SessionState::Playing(i) = self.state else {
            return Ok(());
        };
        let finished = match self.handle.as_ref() {
            Some(handle) => !self.engine.is_playing(handle),
            None => true,
        };
        if finished {
            info!("track {i} finished");
            self.prepare(i)
        } else {
            Ok(())
        }
    }

    /// Release the handle and leave the session `Empty`. Safe to call twice.
    pub fn teardown(&mut self) {
        self.release_handle();
        if self.state != SessionState::Empty {
            debug!("playback session torn down");
        }
        self.state = SessionState::Empty;
    }

    fn neighbour(&self, step: fn(usize, usize) -> Option<usize>) -> Option<usize> {
        self.state
            .index()
            .and_then(|i| step(i, self.catalog.len()))
    }

    fn rejected(&self) -> ControlError {
        if self.catalog.is_empty() {
            ControlError::EmptyCatalog
        } else {
            ControlError::Closed
        }
    }

    fn release_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.stop(&handle);
            self.engine.release(handle);
        }
    }

    /// Replace the handle with a fresh one bound to `index` and enter
    /// `Stopped(index)`, or `Failed(index)` when the engine refuses.
    fn prepare(&mut self, index: usize) -> Result<(), ControlError> {
        let Some(track) = self.catalog.get(index) else {
            return Err(ControlError::InvalidSelection {
                position: index,
                len: self.catalog.len(),
            });
        };

        if let Some(old) = self.handle.take() {
            self.engine.stop(&old);
            self.engine.release(old);
        }

        match self.engine.create(track) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = SessionState::Stopped(index);
                self.title = self.titles.now_playing(&track.display);
                debug!("prepared track {index} ({})", track.display);
                Ok(())
            }
            Err(e) => {
                error!("cannot prepare track {index} ({}): {e}", track.display);
                self.state = SessionState::Failed(index);
                self.title = self.titles.failed(&track.display);
                Err(ControlError::Acquire(e))
            }
        }
    }
}

impl<E: PlaybackEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
