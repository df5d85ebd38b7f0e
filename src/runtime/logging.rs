//! Logger setup: `colog` formatting, written to a file because the terminal
//! belongs to the TUI.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use crate::config::{LogSettings, default_log_path};

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. `RUST_LOG` overrides the configured level.
///
/// When no log file can be opened no logger is installed, so nothing is
/// drawn over the UI; the reason is returned for the caller to report.
pub fn init(settings: &LogSettings) -> Result<(), String> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or_else(|| "no log file location; logging disabled".to_string())?;

    let file = open_log_file(&path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;

    let mut builder = colog::default_builder();
    builder.filter(None, settings.level.into());
    builder.parse_default_env();
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    builder
        .try_init()
        .map_err(|e| format!("logger already installed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("rawplayer").join("rawplayer.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());

        // Reopening appends instead of failing.
        open_log_file(&path).unwrap();
    }
}
