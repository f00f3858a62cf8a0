//! GPS metadata extraction via exiftool
//!
//! Invokes `exiftool -j` for a single file and parses the
//! degrees-minutes-seconds coordinate strings it emits into signed decimal
//! degrees. Malformed output, a missing tool, or a file without GPS tags all
//! yield `None`.

use crate::core::process::run_capture;
use log::debug;
use regex::Regex;
use std::path::Path;

/// A decimal latitude/longitude pair extracted from one file's metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Capability: extract a GPS fix from a file's embedded metadata.
///
/// Narrow seam so trip naming can be tested without invoking any real
/// subprocess.
pub trait MetadataReader {
    fn gps_fix(&self, path: &Path) -> Option<GpsFix>;
}

/// Real metadata reader backed by the `exiftool` CLI
#[derive(Debug, Default)]
pub struct ExiftoolReader;

impl MetadataReader for ExiftoolReader {
    fn gps_fix(&self, path: &Path) -> Option<GpsFix> {
        let stdout = run_capture(
            "exiftool",
            &["-j", "-GPSLatitude", "-GPSLongitude", &path.to_string_lossy()],
        )?;
        let fix = parse_exiftool_json(&stdout);
        if fix.is_none() {
            debug!("No GPS fix in {}", path.display());
        }
        fix
    }
}

/// Parse `exiftool -j` output (a one-element JSON array) into a fix
fn parse_exiftool_json(json: &str) -> Option<GpsFix> {
    let entries: serde_json::Value = serde_json::from_str(json).ok()?;
    let entry = entries.as_array()?.first()?;
    let latitude = parse_dms(entry.get("GPSLatitude")?.as_str()?)?;
    let longitude = parse_dms(entry.get("GPSLongitude")?.as_str()?)?;
    Some(GpsFix {
        latitude,
        longitude,
    })
}

/// Convert a DMS-with-hemisphere coordinate string to signed decimal degrees.
///
/// Accepts the exiftool format `47 deg 9' 38.60" N`; southern and western
/// hemispheres negate the magnitude. Anything malformed yields `None`.
pub fn parse_dms(text: &str) -> Option<f64> {
    let re = Regex::new(
        r#"^\s*(\d+(?:\.\d+)?)\s*deg\s*(\d+(?:\.\d+)?)'\s*(\d+(?:\.\d+)?)"\s*([NSEW])\s*$"#,
    )
    .ok()?;
    let caps = re.captures(text)?;

    let degrees: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;

    let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
    match &caps[4] {
        "S" | "W" => Some(-magnitude),
        _ => Some(magnitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dms_north() {
        let value = parse_dms(r#"47 deg 9' 38.60" N"#).unwrap();
        assert!((value - 47.1607).abs() < 0.0005, "got {}", value);
    }

    #[test]
    fn test_parse_dms_west_negates() {
        let value = parse_dms(r#"122 deg 20' 0.00" W"#).unwrap();
        assert!((value + 122.3333).abs() < 0.0005, "got {}", value);
    }

    #[test]
    fn test_parse_dms_south_negates() {
        let value = parse_dms(r#"33 deg 51' 35.90" S"#).unwrap();
        assert!(value < 0.0);
    }

    #[test]
    fn test_parse_dms_malformed_is_none() {
        assert!(parse_dms("not a coordinate").is_none());
        assert!(parse_dms("47.1607").is_none());
        assert!(parse_dms(r#"47 deg 9' 38.60""#).is_none());
        assert!(parse_dms("").is_none());
    }

    #[test]
    fn test_parse_exiftool_json() {
        let json = r#"[{
            "SourceFile": "IMG_0001.jpg",
            "GPSLatitude": "47 deg 9' 38.60\" N",
            "GPSLongitude": "122 deg 20' 0.00\" W"
        }]"#;
        let fix = parse_exiftool_json(json).unwrap();
        assert!(fix.latitude > 0.0);
        assert!(fix.longitude < 0.0);
    }

    #[test]
    fn test_parse_exiftool_json_without_gps_tags() {
        let json = r#"[{"SourceFile": "IMG_0001.jpg"}]"#;
        assert!(parse_exiftool_json(json).is_none());
    }

    #[test]
    fn test_parse_exiftool_garbage_is_none() {
        assert!(parse_exiftool_json("exiftool blew up").is_none());
    }
}
