use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rawplayer/config.toml` or `~/.config/rawplayer/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RAWPLAYER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the bundled tracks, used when none is given on the command line.
    pub dir: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during discovery.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Order the catalog by symbolic name instead of enumeration order.
    pub sort_by_name: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: false,
            sort_by_name: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Title shown after a track is prepared; `{}` is replaced by its display name.
    pub now_playing_format: String,
    /// Title shown when the catalog is empty.
    pub no_music_text: String,
    /// Title shown when a track cannot be prepared; `{}` is replaced by its display name.
    pub error_format: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ rawplayer ~ ".to_string(),
            now_playing_format: "Now playing: {}".to_string(),
            no_music_text: "No music found".to_string(),
            error_format: "Cannot play: {}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the audio worker checks for a played-out track (milliseconds).
    pub tick_ms: u64,
    /// Whether to expose MPRIS media controls on the session bus.
    pub mpris: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            mpris: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default level filter; `RUST_LOG` still takes precedence.
    pub level: LogLevel,
    /// Log file; defaults to `$XDG_STATE_HOME/rawplayer/rawplayer.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Off,
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
