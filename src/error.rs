//! Error types shared by the catalog, the playback engine and the controller.

use std::path::PathBuf;

use thiserror::Error;

/// A single namespace entry that could not be turned into a `Track`.
///
/// Discovery skips these; they never abort the scan.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("failed to read namespace entry: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{path:?} is not readable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} has no usable symbolic name")]
    InvalidName(PathBuf),
}

/// Failures reported by a `PlaybackEngine`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    Output(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Rejections returned by `PlaybackController` transport operations.
///
/// A rejected command leaves the session untouched, except `Acquire`, which
/// leaves the session in `SessionState::Failed` for the requested index.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("the catalog is empty")]
    EmptyCatalog,

    #[error("the playback session has been torn down")]
    Closed,

    #[error("position {position} is outside the catalog (0..{len})")]
    InvalidSelection { position: usize, len: usize },

    #[error("no playable handle for the current track")]
    NoHandle,

    #[error(transparent)]
    Acquire(#[from] EngineError),
}
