use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::library::{Catalog, DirNamespace, discover};

/// Directory holding the tracks: command line, then config, then `./raw`.
pub fn resolve_dir(arg: Option<String>, settings: &LibrarySettings) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| settings.dir.clone())
        .unwrap_or_else(|| PathBuf::from("raw"))
}

pub fn load_catalog(dir: &Path, settings: &LibrarySettings) -> Catalog {
    discover(&DirNamespace::new(dir, settings), settings.sort_by_name)
}
