//! GPS-based trip naming
//!
//! Extracts GPS fixes from media metadata, resolves them to place labels via
//! reverse geocoding, and picks a majority label per trip. Every step
//! degrades gracefully: any failure means "no fix from this file" and never
//! aborts trip processing.

pub mod exif;
pub mod geocode;
pub mod resolver;

pub use exif::{ExiftoolReader, GpsFix, MetadataReader};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use resolver::resolve_trip_label;
