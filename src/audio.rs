//! Playback: the engine seam, the session controller and the worker thread
//! that owns them.
//!
//! The UI never drives the engine directly; it queues `AudioCmd`s on the
//! `AudioPlayer` and reads back the published `PlaybackInfo`.

mod controller;
mod engine;
mod player;
mod queue;
mod sink;
mod thread;
mod types;

pub use controller::Titles;
pub use player::AudioPlayer;
pub use queue::{wrap_next, wrap_prev};
pub use types::{AudioCmd, PlaybackHandle, PlaybackInfo, SessionState};
