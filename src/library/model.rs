use std::path::PathBuf;

use super::display::display_name;

/// One playable entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Opaque identifier handed to the playback engine.
    pub path: PathBuf,
    /// Symbolic name of the entry (file stem).
    pub name: String,
    pub display: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let name = name.into();
        let display = display_name(&name);
        Self {
            path: path.into(),
            name,
            display,
        }
    }
}

/// Ordered, immutable list of tracks built once by `discover`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Display names in catalog order, for the initial list render.
    pub fn display_names(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.display.clone()).collect()
    }
}

impl FromIterator<Track> for Catalog {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
