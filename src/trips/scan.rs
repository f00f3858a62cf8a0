//! Media file discovery on the mounted volume
//!
//! Recursively walks the mount root and collects every file whose extension
//! is on the supported media allow-list. Files outside the list are invisible
//! to the rest of the pipeline.

use crate::core::error::Result;
use chrono::{DateTime, Local};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported media file extensions (lowercase, without the leading dot).
///
/// Common image/video/raw formats plus sidecar telemetry formats (GPX tracks,
/// SRT subtitle telemetry from drones/action cameras) so those travel with
/// their trips.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "mp4", "mov", "avi", "heic", "cr2", "nef", "orf", "rw2", "gpx", "srt",
];

/// A media file found on the volume, paired with its capture timestamp.
///
/// The timestamp is currently the filesystem modification time; reading the
/// embedded EXIF capture time instead is a possible future enhancement.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Absolute path on the mounted volume
    pub path: PathBuf,
    /// Capture timestamp (filesystem mtime)
    pub timestamp: DateTime<Local>,
}

/// Check whether a path has a supported media extension (case-insensitive)
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .map(|e| MEDIA_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

/// Recursively gather media files under `root`, pairing each with its
/// modification time. Discovery order is preserved so that the later sort
/// can break timestamp ties deterministically.
pub fn scan_media_files(root: &Path) -> Result<Vec<MediaFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_media_file(path) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let modified = metadata.modified()?;

        files.push(MediaFile {
            path: path.to_path_buf(),
            timestamp: DateTime::<Local>::from(modified),
        });
    }

    debug!("Found {} media files under {}", files.len(), root.display());
    Ok(files)
}
