//! Per-trip location labeling by majority vote
//!
//! Tallies the place labels resolved from a trip's files and picks the most
//! frequent one. More than one distinct label marks the trip as a
//! multi-location aggregate.

use crate::location::exif::MetadataReader;
use crate::location::geocode::Geocoder;
use crate::trips::cluster::Trip;
use log::{debug, info};
use std::path::Path;

/// Suffix appended to the winning label when a trip spans more than one
/// distinct location
const MULTI_LOCATION_SUFFIX: &str = "_and_more";

/// Telemetry sidecar formats that carry no usable embedded GPS metadata
const SIDECAR_EXTENSIONS: &[&str] = &["gpx", "srt"];

fn is_geotaggable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| !SIDECAR_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolve a location label for a trip, or `None` when no file yields a fix.
///
/// Per-file failures (missing metadata, tool errors, lookup failures) are
/// swallowed and simply contribute nothing to the tally. Ties break toward
/// the label seen first, keeping the outcome deterministic.
pub fn resolve_trip_label(
    trip: &Trip,
    reader: &dyn MetadataReader,
    geocoder: &dyn Geocoder,
) -> Option<String> {
    // First-seen order preserved for deterministic tie-breaking
    let mut tally: Vec<(String, usize)> = Vec::new();

    for file in &trip.files {
        if !is_geotaggable(&file.path) {
            continue;
        }
        let fix = match reader.gps_fix(&file.path) {
            Some(fix) => fix,
            None => continue,
        };
        let label = match geocoder.reverse(&fix) {
            Some(label) => label,
            None => continue,
        };
        debug!("{} resolved to {}", file.path.display(), label);
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    if tally.is_empty() {
        return None;
    }

    let distinct = tally.len();
    // Strict comparison so the first-seen label wins ties
    let mut winner_idx = 0;
    for (i, (_, count)) in tally.iter().enumerate() {
        if *count > tally[winner_idx].1 {
            winner_idx = i;
        }
    }
    let (winner, votes) = tally.swap_remove(winner_idx);
    info!("Trip location: {} ({} of {} files)", winner, votes, trip.len());

    if distinct > 1 {
        Some(format!("{}{}", winner, MULTI_LOCATION_SUFFIX))
    } else {
        Some(winner)
    }
}
