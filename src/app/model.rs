//! Application model: the rendered track list, the cursor and the latest
//! playback snapshot.
//!
//! The model never talks to the engine; it only mirrors what the audio worker
//! publishes through its `PlaybackHandle`.

use crate::audio::{PlaybackHandle, PlaybackInfo, SessionState, wrap_next, wrap_prev};

/// The main application model.
pub struct App {
    /// Display names in catalog order.
    pub tracks: Vec<String>,
    /// Cursor position in the list; independent of what is playing.
    pub selected: usize,
    pub playback: PlaybackInfo,
    pub playback_handle: Option<PlaybackHandle>,

    /// When set, the cursor jumps to the track the session moves to.
    pub follow_playback: bool,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` with the provided list of track names.
    pub fn new(tracks: Vec<String>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackInfo::default(),
            playback_handle: None,
            follow_playback: true,
            current_dir: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.playback.state
    }

    pub fn title(&self) -> &str {
        &self.playback.title
    }

    /// Display name of the track the session is positioned at.
    pub fn current_track(&self) -> Option<&str> {
        self.state()
            .index()
            .and_then(|i| self.tracks.get(i))
            .map(String::as_str)
    }

    /// Copy the latest snapshot from the audio worker.
    ///
    /// Returns true when it differs from the previous one. With
    /// `follow_playback` the cursor moves to the session's index.
    pub fn sync_playback(&mut self) -> bool {
        let Some(snapshot) = self
            .playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|info| info.clone()))
        else {
            return false;
        };

        if snapshot == self.playback {
            return false;
        }

        let moved = snapshot.state.index() != self.playback.state.index();
        self.playback = snapshot;
        if moved && self.follow_playback {
            if let Some(i) = self.playback.state.index() {
                self.set_selected(i);
            }
        }
        true
    }

    /// Enable following playback (cursor follows the current track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    /// Disable follow-playback; the cursor roams freely.
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Set the cursor, clamped to the list.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx.min(self.tracks.len().saturating_sub(1));
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        if let Some(next) = wrap_next(self.selected, self.tracks.len()) {
            self.selected = next;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if let Some(prev) = wrap_prev(self.selected, self.tracks.len()) {
            self.selected = prev;
        }
    }

    pub fn select_first(&mut self) {
        self.set_selected(0);
    }

    pub fn select_last(&mut self) {
        self.set_selected(self.tracks.len().saturating_sub(1));
    }
}
