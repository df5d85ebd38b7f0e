use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::DiscoveryError;

use super::model::{Catalog, Track};

/// A raw entry of the resource namespace: identifier plus symbolic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub path: PathBuf,
    pub name: String,
}

/// Read-only enumeration of bundled audio entries.
///
/// Order is whatever the source yields; entries that cannot be resolved are
/// reported individually so the caller can skip them.
pub trait ResourceNamespace {
    fn entries(&self) -> Vec<Result<ResourceEntry, DiscoveryError>>;
}

/// Directory-backed namespace: every audio file below `dir`.
pub struct DirNamespace<'a> {
    dir: &'a Path,
    settings: &'a LibrarySettings,
}

impl<'a> DirNamespace<'a> {
    pub fn new(dir: &'a Path, settings: &'a LibrarySettings) -> Self {
        Self { dir, settings }
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn resolve(path: &Path) -> Result<ResourceEntry, DiscoveryError> {
    File::open(path).map_err(|source| DiscoveryError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| DiscoveryError::InvalidName(path.to_path_buf()))?;

    Ok(ResourceEntry {
        path: path.to_path_buf(),
        name: name.to_string(),
    })
}

impl ResourceNamespace for DirNamespace<'_> {
    fn entries(&self) -> Vec<Result<ResourceEntry, DiscoveryError>> {
        let settings = self.settings;
        let mut walker = WalkDir::new(self.dir).follow_links(settings.follow_links);

        // Non-recursive = only the root directory.
        if !settings.recursive {
            walker = walker.max_depth(1);
        }

        walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    (path.is_file() && is_audio_file(path, settings)).then(|| resolve(path))
                }
                Err(e) => Some(Err(DiscoveryError::from(e))),
            })
            .collect()
    }
}

/// Build the catalog from every resolvable entry of `namespace`.
///
/// With `sort_by_name` the catalog is ordered by symbolic name
/// (case-insensitive); otherwise enumeration order is kept.
pub fn discover(namespace: &impl ResourceNamespace, sort_by_name: bool) -> Catalog {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in namespace.entries() {
        match entry {
            Ok(entry) => {
                debug!("discovered {:?} as {:?}", entry.path, entry.name);
                tracks.push(Track::new(entry.path, entry.name));
            }
            Err(e) => warn!("skipping track: {e}"),
        }
    }

    if sort_by_name {
        tracks.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    info!("catalog built with {} track(s)", tracks.len());
    Catalog::new(tracks)
}
