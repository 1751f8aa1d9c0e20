use super::load::{default_config_path, resolve_config_path};
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
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadenza-test-config.toml")
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
            .join("cadenza")
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
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_with_seed_tracks() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 40
volume_step = 5
toast_secs = 7
uploaded_artist = "Local File"

[playlist]
base_dir = "/srv/music"

[[playlist.tracks]]
title = "Intro"
artist = "Someone"
source = "audio/intro.ogg"

[[playlist.tracks]]
title = "Outro"
artist = "Someone Else"
source = "https://example.invalid/outro.mp3"
cover = "images/outro.png"

[upload]
dir = "/srv/uploads"
extensions = ["flac"]
recursive = true
max_depth = 3

[ui]
header_text = "hello"
tick_ms = 100

[logging]
enabled = false
file_prefix = "widget"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__PLAYER__VOLUME_STEP");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.initial_volume, 40);
    assert_eq!(s.player.volume_step, 5);
    assert_eq!(s.player.toast_secs, 7);
    assert_eq!(s.player.uploaded_artist, "Local File");
    assert_eq!(
        s.playlist.base_dir,
        Some(std::path::PathBuf::from("/srv/music"))
    );
    assert_eq!(s.playlist.tracks.len(), 2);
    assert_eq!(s.playlist.tracks[0].title, "Intro");
    assert_eq!(s.playlist.tracks[0].cover, None);
    assert_eq!(s.playlist.tracks[1].cover.as_deref(), Some("images/outro.png"));
    assert_eq!(s.upload.dir, Some(std::path::PathBuf::from("/srv/uploads")));
    assert_eq!(s.upload.extensions, vec!["flac".to_string()]);
    assert!(s.upload.recursive);
    assert_eq!(s.upload.max_depth, Some(3));
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.tick_ms, 100);
    assert!(!s.logging.enabled);
    assert_eq!(s.logging.file_prefix, "widget");
    // Untouched keys keep their defaults.
    assert_eq!(s.logging.filter, LoggingSettings::default().filter);
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
[player]
volume_step = 10
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__PLAYER__VOLUME_STEP", "25");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.volume_step, 25);
}

#[test]
fn default_settings_seed_the_three_builtin_tracks() {
    let s = Settings::default();
    let titles: Vec<&str> = s.playlist.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Sapphire", "Safari", "Alone Pt. II"]);
    assert!(s.playlist.tracks.iter().all(|t| t.cover.is_some()));
    assert_eq!(s.player.volume_step, 10);
    assert_eq!(s.player.toast_secs, 3);
    assert_eq!(s.player.uploaded_artist, "Uploaded Song");
    assert!(s.validate().is_ok());
}

#[test]
fn schema_parses_partial_toml_with_defaults() {
    let s: Settings = toml::from_str(
        r#"
[player]
initial_volume = 55
"#,
    )
    .unwrap();
    assert_eq!(s.player.initial_volume, 55);
    assert_eq!(s.player.volume_step, 10);
    assert_eq!(s.playlist.tracks.len(), 3);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.volume_step = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.initial_volume = 120;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.toast_secs = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.tick_ms = 0;
    assert!(s.validate().is_err());
}
