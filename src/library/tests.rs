use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::display::display_name;
use super::scan::{ResourceEntry, ResourceNamespace};
use super::*;
use crate::config::LibrarySettings;
use crate::error::DiscoveryError;

/// In-memory namespace; `None` stands for an entry that fails to resolve.
struct FixedNamespace(Vec<Option<&'static str>>);

impl ResourceNamespace for FixedNamespace {
    fn entries(&self) -> Vec<Result<ResourceEntry, DiscoveryError>> {
        self.0
            .iter()
            .map(|name| match name {
                Some(name) => Ok(ResourceEntry {
                    path: PathBuf::from(format!("/raw/{name}.mp3")),
                    name: name.to_string(),
                }),
                None => Err(DiscoveryError::InvalidName(PathBuf::from("/raw/.mp3"))),
            })
            .collect()
    }
}

#[test]
fn display_name_replaces_underscores_and_capitalizes() {
    assert_eq!(display_name("track_one"), "Track one");
    assert_eq!(display_name("a_b_c"), "A b c");
    assert_eq!(display_name("Already Fine"), "Already Fine");
    assert_eq!(display_name("élan_vital"), "Élan vital");
    assert_eq!(display_name(""), "");
}

#[test]
fn display_name_keeps_first_character_when_upper_case_expands() {
    assert_eq!(display_name("ßtrasse_mix"), "ßtrasse mix");
    assert_eq!(display_name("ŉ_intro"), "ŉ intro");
    assert_eq!(display_name("ǆungla"), "Ǆungla");
}

#[test]
fn display_name_is_stable_on_formatted_input() {
    let once = display_name("track_one");
    assert_eq!(display_name(&once), once);
}

#[test]
fn discover_skips_failed_entries_and_keeps_the_rest() {
    let ns = FixedNamespace(vec![Some("intro"), None, Some("outro_theme")]);

    let catalog = discover(&ns, false);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.display_names(), vec!["Intro", "Outro theme"]);
}

#[test]
fn discover_keeps_enumeration_order_unless_sorting() {
    let ns = FixedNamespace(vec![Some("zeta"), Some("Alpha"), Some("beta")]);

    let unsorted = discover(&ns, false);
    assert_eq!(unsorted.display_names(), vec!["Zeta", "Alpha", "Beta"]);

    let sorted = discover(&ns, true);
    assert_eq!(sorted.display_names(), vec!["Alpha", "Beta", "Zeta"]);
}

#[test]
fn discover_of_empty_namespace_is_an_empty_catalog() {
    let catalog = discover(&FixedNamespace(Vec::new()), true);
    assert!(catalog.is_empty());
    assert!(catalog.get(0).is_none());
}

#[test]
fn dir_namespace_filters_non_audio_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b_side.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("a_side.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let settings = LibrarySettings::default();
    let catalog = discover(&DirNamespace::new(dir.path(), &settings), true);

    assert_eq!(catalog.len(), 2);
    let first = catalog.get(0).unwrap();
    assert_eq!(first.name, "a_side");
    assert_eq!(first.display, "A side");
    assert_eq!(first.path, dir.path().join("a_side.ogg"));
    assert_eq!(catalog.get(1).unwrap().display, "B side");
}

#[test]
fn dir_namespace_is_flat_unless_recursive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let flat = LibrarySettings::default();
    let catalog = discover(&DirNamespace::new(dir.path(), &flat), true);
    assert_eq!(catalog.display_names(), vec!["Root"]);

    let deep = LibrarySettings {
        recursive: true,
        ..LibrarySettings::default()
    };
    let catalog = discover(&DirNamespace::new(dir.path(), &deep), true);
    assert_eq!(catalog.display_names(), vec!["Child", "Root"]);
}

#[test]
fn dir_namespace_respects_include_hidden() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let catalog = discover(&DirNamespace::new(dir.path(), &settings), true);
    assert_eq!(catalog.display_names(), vec!["Visible"]);
}

#[test]
fn dir_namespace_reports_missing_directory_without_panicking() {
    let settings = LibrarySettings::default();
    let ns = DirNamespace::new(Path::new("/definitely/not/a/raw/dir"), &settings);

    let entries = ns.entries();
    assert!(entries.iter().all(|e| e.is_err()));
    assert!(discover(&ns, true).is_empty());
}
