//! Trip grouping and reorganization
//!
//! A "trip" is a maximal run of media files whose consecutive capture-time
//! gaps all fall within the configured threshold. This module discovers
//! media files on the mounted volume, clusters them into trips, and moves
//! them into per-trip directories.

pub mod cluster;
pub mod organize;
pub mod scan;

pub use cluster::{cluster, Trip};
pub use organize::{directory_name, organize_trips};
pub use scan::{is_media_file, scan_media_files, MediaFile};
