use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub playlist: PlaylistSettings,
    pub upload: UploadSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume applied at startup, in percent (0-100).
    pub initial_volume: u8,
    /// Step used by volume up/down, in percent.
    pub volume_step: u8,
    /// How long toast notifications stay visible (seconds).
    pub toast_secs: u64,
    /// Artist shown for tracks added from uploaded files.
    pub uploaded_artist: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: 100,
            volume_step: 10,
            toast_secs: 3,
            uploaded_artist: "Uploaded Song".to_string(),
        }
    }
}

/// One entry of the startup playlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedTrack {
    pub title: String,
    pub artist: String,
    /// Audio path or URL; relative paths resolve against `playlist.base_dir`.
    pub source: String,
    #[serde(default)]
    pub cover: Option<String>,
}

impl SeedTrack {
    fn new(title: &str, artist: &str, source: &str, cover: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            source: source.to_string(),
            cover: Some(cover.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Directory relative seed sources and covers resolve against.
    /// Defaults to the working directory.
    pub base_dir: Option<PathBuf>,
    /// Tracks the playlist starts with.
    pub tracks: Vec<SeedTrack>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            base_dir: None,
            tracks: vec![
                SeedTrack::new(
                    "Sapphire",
                    "Ed Sheeran",
                    "audio/Sapphire.mp3",
                    "images/sapphire.jpg",
                ),
                SeedTrack::new("Safari", "Sarena", "audio/Safari.mp3", "images/safari.jpg"),
                SeedTrack::new(
                    "Alone Pt. II",
                    "Alan Walker Ava Max",
                    "audio/Alone Pt. II.mp3",
                    "images/alone_p2.jpg",
                ),
            ],
        }
    }
}

impl PlaylistSettings {
    /// The directory relative locators resolve against.
    pub fn resolved_base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Directory the file picker offers files from.
    pub dir: Option<PathBuf>,
    /// File extensions offered by the picker (case-insensitive, without dot).
    /// Only extensions with a known `audio/*` MIME type are accepted.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while listing.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Interval between event-loop ticks (milliseconds); drives time updates.
    pub tick_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ cadenza ~ ".to_string(),
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Whether to write a log file at all.
    pub enabled: bool,
    /// Directory for the daily rolling log files.
    pub dir: PathBuf,
    /// File name prefix of the log files.
    pub file_prefix: String,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(".logs"),
            file_prefix: "cadenza".to_string(),
            filter: "cadenza=debug,warn".to_string(),
        }
    }
}
