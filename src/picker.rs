//! File picking: the capability the controller asks for user-selected audio files.
//!
//! `DirectoryPicker` is the terminal host's picker. It offers every audio file
//! found in the configured upload directory, the way a multi-select dialog
//! restricted to `audio/*` would.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::UploadSettings;

/// A picked file: its name and its bytes.
#[derive(Clone, Debug)]
pub struct FileHandle {
    pub name: String,
    pub data: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, data: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("no upload directory configured")]
    NoDirectory,
    #[error("upload directory {0} does not exist")]
    MissingDirectory(PathBuf),
}

/// Presents a file selection and returns the chosen files.
///
/// An empty selection means the user cancelled.
pub trait FilePicker {
    fn pick(&mut self) -> Result<Vec<FileHandle>, PickerError>;
}

/// MIME type for an audio file extension, if it is one we recognise.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "aiff" | "aif" => "audio/aiff",
        _ => return None,
    };
    Some(mime)
}

fn is_audio_file(path: &Path, settings: &UploadSettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();

    let accepted = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| e == ext);

    accepted
        && mime_for_extension(&ext)
            .map(|m| m.starts_with("audio/"))
            .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files under `dir` according to `settings`, sorted by file name.
pub fn list_audio_files(dir: &Path, settings: &UploadSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_audio_file(path, settings))
        .collect();

    files.sort_by(|a, b| {
        let an = a.file_name().map(|s| s.to_string_lossy().to_lowercase());
        let bn = b.file_name().map(|s| s.to_string_lossy().to_lowercase());
        an.cmp(&bn)
    });
    files
}

/// Picks every audio file in a directory.
pub struct DirectoryPicker {
    settings: UploadSettings,
}

impl DirectoryPicker {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }
}

impl FilePicker for DirectoryPicker {
    fn pick(&mut self) -> Result<Vec<FileHandle>, PickerError> {
        let dir = self.settings.dir.as_ref().ok_or(PickerError::NoDirectory)?;
        if !dir.is_dir() {
            return Err(PickerError::MissingDirectory(dir.clone()));
        }

        let mut picked = Vec::new();
        for path in list_audio_files(dir, &self.settings) {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match fs::read(&path) {
                Ok(bytes) => picked.push(FileHandle::new(name, Arc::from(bytes))),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }

        tracing::debug!(dir = %dir.display(), count = picked.len(), "picked files");
        Ok(picked)
    }
}
