//! Removable-volume discovery
//!
//! Enumerates candidate SD cards per host platform. Linux uses `lsblk` JSON
//! output with a sysfs fallback; macOS uses `diskutil` plist output with a
//! plain-text fallback. Enumeration never fails: any tool or parse error
//! yields an empty candidate list and the caller reports "no devices found".

use crate::core::process::run_capture;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A candidate removable volume, produced transiently per run
#[derive(Debug, Clone)]
pub struct DeviceCandidate {
    /// Device node, e.g. `/dev/sdb1` or `/dev/disk4`
    pub device_path: String,
    /// Human-readable size, e.g. `59.5G` or `unknown`
    pub size_descriptor: String,
    /// Where the volume is currently mounted, if anywhere
    pub mount_point: Option<PathBuf>,
    /// One-line description shown in the selection menu
    pub description: String,
}

/// Enumerate candidate removable volumes for the current platform.
///
/// Returns an empty list on unsupported platforms or when every enumeration
/// strategy fails; this function never errors.
pub fn list_candidates() -> Vec<DeviceCandidate> {
    match std::env::consts::OS {
        "linux" => linux_candidates(),
        "macos" => macos_candidates(),
        other => {
            debug!("No device enumeration strategy for {}", other);
            Vec::new()
        }
    }
}

// --- Linux: lsblk JSON, sysfs fallback ---

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    #[serde(default)]
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Debug, Deserialize)]
struct LsblkDevice {
    name: String,
    #[serde(default)]
    size: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    mountpoint: Option<String>,
    /// Bool on current util-linux, "1"/"0" strings on older releases
    #[serde(default)]
    rm: serde_json::Value,
    #[serde(default)]
    children: Vec<LsblkDevice>,
}

fn is_removable_flag(value: &serde_json::Value) -> bool {
    value.as_bool() == Some(true) || value.as_str() == Some("1") || value.as_u64() == Some(1)
}

fn linux_candidates() -> Vec<DeviceCandidate> {
    if let Some(stdout) = run_capture("lsblk", &["-o", "NAME,SIZE,TYPE,MOUNTPOINT,RM", "-J"]) {
        match serde_json::from_str::<LsblkOutput>(&stdout) {
            Ok(data) => return candidates_from_lsblk(data),
            Err(e) => debug!("Failed to parse lsblk output: {}", e),
        }
    }
    sysfs_candidates(Path::new("/sys/block"))
}

fn candidates_from_lsblk(data: LsblkOutput) -> Vec<DeviceCandidate> {
    let mut candidates = Vec::new();
    for device in data.blockdevices {
        if !is_removable_flag(&device.rm) || device.kind != "disk" {
            continue;
        }
        for child in device.children {
            if child.kind != "part" {
                continue;
            }
            let size = child.size.unwrap_or_else(|| "unknown".to_string());
            candidates.push(DeviceCandidate {
                device_path: format!("/dev/{}", child.name),
                size_descriptor: size.clone(),
                mount_point: child.mountpoint.map(PathBuf::from),
                description: format!("Removable device {} ({})", child.name, size),
            });
        }
    }
    candidates
}

/// Fallback: walk /sys/block for devices whose `removable` flag reads "1"
/// and list their partitions.
fn sysfs_candidates(sys_block: &Path) -> Vec<DeviceCandidate> {
    let mut candidates = Vec::new();
    let entries = match fs::read_dir(sys_block) {
        Ok(entries) => entries,
        Err(_) => return candidates,
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let removable = entry.path().join("removable");
        let flag = fs::read_to_string(&removable).unwrap_or_default();
        if flag.trim() != "1" {
            continue;
        }
        let device_name = entry.file_name().to_string_lossy().to_string();
        let partitions = match fs::read_dir(entry.path()) {
            Ok(parts) => parts,
            Err(_) => continue,
        };
        for part in partitions.filter_map(|e| e.ok()) {
            let part_name = part.file_name().to_string_lossy().to_string();
            if part_name == device_name || !part_name.starts_with(&device_name) {
                continue;
            }
            candidates.push(DeviceCandidate {
                device_path: format!("/dev/{}", part_name),
                size_descriptor: "unknown".to_string(),
                mount_point: None,
                description: format!("Removable device {}", part_name),
            });
        }
    }
    candidates
}

// --- macOS: diskutil plist, text fallback ---

fn macos_candidates() -> Vec<DeviceCandidate> {
    if let Some(listing) = run_capture("diskutil", &["list", "-plist"]) {
        let mut candidates = Vec::new();
        for disk_id in plist_disk_identifiers(&listing) {
            let info = match run_capture("diskutil", &["info", &disk_id]) {
                Some(info) => info,
                None => continue,
            };
            if let Some(candidate) = candidate_from_diskutil_info(&info) {
                candidates.push(candidate);
            }
        }
        if !candidates.is_empty() {
            return candidates;
        }
    }
    macos_text_fallback()
}

/// Pull disk identifiers out of `diskutil list -plist` output.
///
/// The full plist schema is not needed; the `AllDisks` array entries are the
/// only `<string>diskN[sM]</string>` values present.
fn plist_disk_identifiers(plist: &str) -> Vec<String> {
    let re = match Regex::new(r"<string>(disk\d+(?:s\d+)?)</string>") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let mut seen = Vec::new();
    for cap in re.captures_iter(plist) {
        let id = cap[1].to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Parse the `Key:   Value` lines of `diskutil info` into a candidate,
/// keeping only removable/external volumes and SD media.
fn candidate_from_diskutil_info(info: &str) -> Option<DeviceCandidate> {
    let mut fields: HashMap<String, String> = HashMap::new();
    for line in info.lines() {
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    let removable = fields
        .get("Removable Media")
        .map(|v| v == "Removable" || v == "Yes")
        .unwrap_or(false);
    let external = fields
        .get("Device Location")
        .map(|v| v.eq_ignore_ascii_case("external"))
        .unwrap_or(false);
    let media_name = fields
        .get("Device / Media Name")
        .or_else(|| fields.get("Media Name"))
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());
    let is_sd = media_name.to_uppercase().contains("SD");

    if !(removable || external || is_sd) {
        return None;
    }

    let device_id = fields.get("Device Identifier")?;
    let size = fields
        .get("Disk Size")
        .or_else(|| fields.get("Total Size"))
        .map(|v| v.split('(').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let mount_point = fields
        .get("Mount Point")
        .filter(|v| !v.is_empty() && v.as_str() != "Not applicable (no file system)")
        .map(PathBuf::from);

    Some(DeviceCandidate {
        device_path: format!("/dev/{}", device_id),
        size_descriptor: size.clone(),
        mount_point,
        description: format!("{} ({})", media_name, size),
    })
}

/// Last-resort fallback: grep `diskutil list` text for external or removable
/// disks.
fn macos_text_fallback() -> Vec<DeviceCandidate> {
    let listing = match run_capture("diskutil", &["list"]) {
        Some(listing) => listing,
        None => return Vec::new(),
    };
    candidates_from_diskutil_text(&listing)
}

fn candidates_from_diskutil_text(listing: &str) -> Vec<DeviceCandidate> {
    let re = match Regex::new(r"(/dev/disk\d+)") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let mut candidates = Vec::new();
    for line in listing.lines() {
        let lower = line.to_lowercase();
        if !lower.contains("external") && !lower.contains("removable") {
            continue;
        }
        if let Some(cap) = re.captures(line) {
            let device = cap[1].to_string();
            candidates.push(DeviceCandidate {
                device_path: device.clone(),
                size_descriptor: "unknown".to_string(),
                mount_point: None,
                description: format!("External device {}", device),
            });
        }
    }
    candidates
}
