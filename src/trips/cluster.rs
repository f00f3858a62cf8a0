//! Time-gap clustering of media files into trips
//!
//! Pure function of (file, timestamp) pairs: sort by timestamp, then split
//! wherever the gap between adjacent files strictly exceeds the threshold.

use crate::trips::scan::MediaFile;
use chrono::{DateTime, Duration, Local};

/// An ordered, time-sorted group of media files.
///
/// Invariants (established by [`cluster`]):
/// - files are sorted ascending by timestamp
/// - every adjacent intra-trip gap is `<= threshold`
/// - the gap to the previous trip's last file is `> threshold`
#[derive(Debug, Clone)]
pub struct Trip {
    /// Files in the trip, sorted by timestamp
    pub files: Vec<MediaFile>,
}

impl Trip {
    /// Timestamp of the first file in the trip
    pub fn start(&self) -> DateTime<Local> {
        self.files[0].timestamp
    }

    /// Timestamp of the last file in the trip
    pub fn end(&self) -> DateTime<Local> {
        self.files[self.files.len() - 1].timestamp
    }

    /// Number of files in the trip
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the trip holds no files (never true for clustering output)
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Partition `files` into trips separated by capture-time gaps greater than
/// `threshold`.
///
/// The sort is stable, so files with identical timestamps keep their
/// discovery order. An empty input yields an empty trip list; a single file
/// yields a single one-element trip. A zero threshold puts every strictly
/// increasing timestamp in its own trip.
pub fn cluster(mut files: Vec<MediaFile>, threshold: Duration) -> Vec<Trip> {
    if files.is_empty() {
        return Vec::new();
    }

    files.sort_by_key(|f| f.timestamp);

    let mut trips = Vec::new();
    let mut current: Vec<MediaFile> = Vec::new();
    let mut last_ts: Option<DateTime<Local>> = None;

    for file in files {
        if let Some(last) = last_ts {
            if file.timestamp - last > threshold {
                trips.push(Trip {
                    files: std::mem::take(&mut current),
                });
            }
        }
        last_ts = Some(file.timestamp);
        current.push(file);
    }

    if !current.is_empty() {
        trips.push(Trip { files: current });
    }

    trips
}
