//! Audio-related small types and handles.
//!
//! This module defines the session states, the command queue vocabulary and
//! the snapshot the worker shares with the UI.

use std::sync::{Arc, Mutex};

/// State of the single playback session, with the catalog index it refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No tracks, or the session has been torn down.
    #[default]
    Empty,
    /// A fresh handle is prepared for the index and waits for `play`.
    Stopped(usize),
    Playing(usize),
    Paused(usize),
    /// The handle for the index could not be prepared; nothing is held.
    Failed(usize),
}

impl SessionState {
    /// Catalog index the session is positioned at, if any.
    pub fn index(&self) -> Option<usize> {
        match *self {
            SessionState::Empty => None,
            SessionState::Stopped(i)
            | SessionState::Playing(i)
            | SessionState::Paused(i)
            | SessionState::Failed(i) => Some(i),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Empty => "Empty",
            SessionState::Stopped(_) => "Stopped",
            SessionState::Playing(_) => "Playing",
            SessionState::Paused(_) => "Paused",
            SessionState::Failed(_) => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Start or resume the current track.
    Play,
    /// Pause the current track.
    Pause,
    /// Pause when playing, play otherwise.
    PlayPause,
    /// Stop and re-prepare the current track from the beginning.
    Stop,
    /// Skip to the next track, wrapping around.
    Next,
    /// Go to the previous track, wrapping around.
    Prev,
    /// Play the track at the given catalog position.
    Select(usize),
    /// Tear the session down and end the worker.
    Quit,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackInfo {
    pub state: SessionState,
    /// The "now playing" label.
    pub title: String,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
