//! SD Card Trip Import Library
//!
//! Imports media from a removable card, partitions the files into trips
//! using temporal gaps, names each trip (location-derived when GPS metadata
//! resolves, date-derived otherwise), reorganizes the files on the source
//! volume, and replicates the result to a remote archive before unmounting.
//!
//! # Architecture
//!
//! - [`core`] - Configuration, error types, and external-tool helpers
//! - [`device`] - Removable-volume discovery, selection, and the mount guard
//! - [`trips`] - Media scanning, gap-threshold clustering, and reorganization
//! - [`location`] - GPS extraction, reverse geocoding, and majority-vote naming
//! - [`sync`] - Remote transfer via rsync
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! External tools (`lsblk`, `diskutil`, `mount`, `umount`, `exiftool`,
//! `rsync`) and the reverse-geocoding HTTP endpoint are consumed through
//! their CLI/HTTP contracts, never reimplemented.

pub mod cli;
pub mod core;
pub mod device;
pub mod location;
pub mod sync;
pub mod trips;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
