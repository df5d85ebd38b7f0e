use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_rawplayer_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RAWPLAYER_CONFIG_PATH", "/tmp/rawplayer-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/rawplayer-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("rawplayer")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("rawplayer")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state/rawplayer/rawplayer.log")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/rawplayer/rawplayer.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
dir = "/srv/raw"
extensions = ["mp3"]
recursive = true
include_hidden = false
follow_links = false
sort_by_name = false

[ui]
header_text = "hello"
now_playing_format = "> {}"
no_music_text = "nothing here"
error_format = "broken: {}"

[playback]
tick_ms = 50
mpris = false

[log]
level = "warning"
file = "/tmp/rawplayer.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RAWPLAYER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RAWPLAYER__PLAYBACK__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.dir, Some(std::path::PathBuf::from("/srv/raw")));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert!(!s.library.sort_by_name);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.now_playing_format, "> {}");
    assert_eq!(s.ui.no_music_text, "nothing here");
    assert_eq!(s.ui.error_format, "broken: {}");
    assert_eq!(s.playback.tick_ms, 50);
    assert!(!s.playback.mpris);
    assert_eq!(s.log.level, LogLevel::Warn);
    assert_eq!(s.log.file, Some(std::path::PathBuf::from("/tmp/rawplayer.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RAWPLAYER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RAWPLAYER__PLAYBACK__TICK_MS", "75");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.tick_ms, 75);
}

#[test]
fn settings_missing_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RAWPLAYER_CONFIG_PATH", "/tmp/rawplayer-does-not-exist.toml");
    let _g2 = EnvGuard::remove("RAWPLAYER__PLAYBACK__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.tick_ms, 200);
    assert_eq!(s.ui.no_music_text, "No music found");
    assert!(s.library.sort_by_name);
    assert!(!s.library.recursive);
}

#[test]
fn validate_rejects_zero_tick_and_missing_placeholders() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    s = Settings::default();
    s.ui.now_playing_format = "Now playing".to_string();
    assert!(s.validate().is_err());

    s = Settings::default();
    s.ui.error_format = "oops".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn log_level_maps_onto_level_filter() {
    assert_eq!(log::LevelFilter::from(LogLevel::Off), log::LevelFilter::Off);
    assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
