//! Import orchestrator
//!
//! Sequences the full run: device resolution, mount acquisition, media
//! scanning, trip clustering, location naming, reorganization, remote sync,
//! and mount release. The mount guard is held across the whole mutation
//! pipeline so its release runs on success, clean early exits, and every
//! error path alike.

use crate::cli::Args;
use crate::core::config::Config;
use crate::device::{self, MountGuard};
use crate::location::{resolve_trip_label, ExiftoolReader, NominatimGeocoder};
use crate::sync::{sync_to_remote, RemoteTarget};
use crate::trips::{cluster, organize_trips, scan_media_files, Trip};
use anyhow::Result;
use chrono::Duration;
use log::warn;
use std::path::Path;

/// Run a full import.
///
/// Absence of a candidate device, user abort, and an empty volume all
/// terminate early and cleanly; hard failures bubble up after the mount has
/// been released.
pub fn run_import(args: &Args, config: &Config) -> Result<()> {
    let (device, candidate_mount) = match &args.device {
        Some(device) => {
            println!("Using specified device: {}", device);
            (device.clone(), None)
        }
        None => {
            println!("Auto-detecting SD cards...");
            let candidates = device::list_candidates();
            match device::select_candidate(&candidates)? {
                Some(selected) => {
                    println!("Selected device: {}", selected.device_path);
                    (selected.device_path, selected.mount_point)
                }
                None => {
                    println!("No SD card selected. Exiting.");
                    return Ok(());
                }
            }
        }
    };

    let guard = MountGuard::acquire(
        &device,
        candidate_mount.as_deref(),
        &config.mount.mount_point,
    )?;

    let outcome = run_pipeline(guard.mount_point(), config);
    let released = guard.release();

    match (outcome, released) {
        (Err(e), Err(release_err)) => {
            warn!("{}", release_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), released) => released.map_err(Into::into),
    }
}

/// Everything that happens between mount acquisition and release
fn run_pipeline(mount_point: &Path, config: &Config) -> Result<()> {
    println!("Grouping media files into trips…");
    let files = scan_media_files(mount_point)?;
    if files.is_empty() {
        println!("No media files found. Exiting.");
        return Ok(());
    }

    let threshold = Duration::days(config.trips.threshold_days);
    let trips = cluster(files, threshold);
    let labels = resolve_labels(&trips, config);

    let organized = organize_trips(&trips, &labels, mount_point);
    match &organized {
        Ok(dirs) => println!("Organized into {} trip(s): {:?}", dirs.len(), dirs),
        // Some files may already have moved; the remote sync still runs so
        // whatever landed on disk gets archived, and the mount still gets
        // released by the caller.
        Err(e) => warn!("Reorganization incomplete, syncing partial layout: {}", e),
    }

    println!("Starting rsync to {}…", config.remote.host);
    let remote = RemoteTarget {
        user: config.remote.user.clone(),
        host: config.remote.host.clone(),
        dir: config.remote.dir.clone(),
    };
    let synced = sync_to_remote(mount_point, &remote);
    if synced.is_ok() {
        println!("Rsync and cleanup complete.");
    }

    organized?;
    synced?;
    Ok(())
}

/// Resolve a location label per trip, printing the naming outcome for each.
///
/// Geocoding being disabled or unavailable degrades every trip to the
/// date-based fallback name.
fn resolve_labels(trips: &[Trip], config: &Config) -> Vec<Option<String>> {
    if !config.geocoding.enabled {
        return vec![None; trips.len()];
    }

    let timeout = std::time::Duration::from_secs(config.geocoding.timeout_secs);
    let geocoder = match NominatimGeocoder::new(&config.geocoding.endpoint, timeout) {
        Ok(geocoder) => geocoder,
        Err(e) => {
            warn!("Geocoding unavailable: {}", e);
            return vec![None; trips.len()];
        }
    };
    let reader = ExiftoolReader;

    trips
        .iter()
        .enumerate()
        .map(|(i, trip)| {
            let label = resolve_trip_label(trip, &reader, &geocoder);
            match &label {
                Some(label) => println!("Trip {}: location resolved to {}", i + 1, label),
                None => println!("Trip {}: no location fix, using date-based name", i + 1),
            }
            label
        })
        .collect()
}
