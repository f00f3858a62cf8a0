//! Trip directory naming and collision-safe file relocation
//!
//! Moves every clustered file into a per-trip directory on the source volume.
//! Moves are physical renames and irreversible within a run; there is no
//! transactional rollback across trips.

use crate::core::error::{ImportError, Result};
use crate::trips::cluster::Trip;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Replace characters that are unsafe in a directory name.
///
/// Whitespace and path separators collapse to single underscores; everything
/// else alphanumeric (plus `-`) passes through.
pub fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_sep = true;
    for c in label.chars() {
        if c.is_alphanumeric() || c == '-' {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    out.trim_end_matches('_').to_string()
}

/// Compute the directory name for a trip.
///
/// `{label}_{start}_{end}` when a location label was resolved, otherwise the
/// date-derived fallback `trip_{index}_{start}_{end}`. `index` is 1-based.
pub fn directory_name(index: usize, trip: &Trip, label: Option<&str>) -> String {
    let start = trip.start().format("%Y%m%d");
    let end = trip.end().format("%Y%m%d");
    match label {
        Some(label) => format!("{}_{}_{}", sanitize_label(label), start, end),
        None => format!("trip_{}_{}_{}", index, start, end),
    }
}

/// Move every file of every trip into its destination directory under
/// `mount_root`, returning the resulting directory names in trip order.
///
/// Directory creation is idempotent. On a filename collision the incoming
/// file is renamed to `{timestamp}_{original_name}`; if even that name is
/// taken the move fails rather than overwrite anything.
pub fn organize_trips(
    trips: &[Trip],
    labels: &[Option<String>],
    mount_root: &Path,
) -> Result<Vec<String>> {
    let total_files: usize = trips.iter().map(|t| t.len()).sum();
    let progress = ProgressBar::new(total_files as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} files {msg}")
            .unwrap(),
    );

    let mut trip_dirs = Vec::with_capacity(trips.len());

    for (i, trip) in trips.iter().enumerate() {
        let index = i + 1;
        let label = labels.get(i).and_then(|l| l.as_deref());
        let dir_name = directory_name(index, trip, label);
        let dest_dir = mount_root.join(&dir_name);

        fs::create_dir_all(&dest_dir)?;
        progress.set_message(dir_name.clone());

        for file in &trip.files {
            let file_name = file
                .path
                .file_name()
                .ok_or_else(|| ImportError::Io(format!("No file name in {}", file.path.display())))?;

            let mut target = dest_dir.join(file_name);
            if target == file.path {
                // Already in place (e.g. a re-run over an organized volume)
                progress.inc(1);
                continue;
            }
            if target.exists() {
                let prefixed = format!(
                    "{}_{}",
                    file.timestamp.format("%Y%m%d_%H%M%S"),
                    file_name.to_string_lossy()
                );
                warn!(
                    "Name collision for {}; renaming to {}",
                    target.display(),
                    prefixed
                );
                target = dest_dir.join(prefixed);
            }
            if target.exists() {
                return Err(ImportError::Move {
                    from: file.path.clone(),
                    to: target,
                    message: "destination already exists".to_string(),
                });
            }

            debug!("Moving {} -> {}", file.path.display(), target.display());
            fs::rename(&file.path, &target).map_err(|e| ImportError::Move {
                from: file.path.clone(),
                to: target.clone(),
                message: e.to_string(),
            })?;
            progress.inc(1);
        }

        trip_dirs.push(dir_name);
    }

    progress.finish_and_clear();
    Ok(trip_dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::scan::MediaFile;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn trip_with(files: Vec<MediaFile>) -> Trip {
        Trip { files }
    }

    fn file_at(name: &str, day: u32) -> MediaFile {
        MediaFile {
            path: PathBuf::from(name),
            timestamp: Local.with_ymd_and_hms(2024, 6, day, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("Seattle"), "Seattle");
        assert_eq!(sanitize_label("New York City"), "New_York_City");
        assert_eq!(sanitize_label("Provence-Alpes/Côte d'Azur "), "Provence-Alpes_Côte_d_Azur");
        assert_eq!(sanitize_label("  "), "");
    }

    #[test]
    fn test_directory_name_with_label() {
        let trip = trip_with(vec![file_at("a.jpg", 1), file_at("b.jpg", 3)]);
        assert_eq!(
            directory_name(1, &trip, Some("Seattle")),
            "Seattle_20240601_20240603"
        );
    }

    #[test]
    fn test_directory_name_fallback() {
        let trip = trip_with(vec![file_at("a.jpg", 5)]);
        assert_eq!(directory_name(3, &trip, None), "trip_3_20240605_20240605");
    }
}
