//! Mount lifecycle management
//!
//! `MountGuard` is the scoped-acquisition guard around the single shared
//! mutable resource of a run, the mount point. Acquisition records whether
//! the volume was already mounted before this run began; release unmounts
//! only when it was not, and runs exactly once per run — explicitly on the
//! orderly path, via `Drop` on every other exit path.

use crate::core::error::{ImportError, Result};
use crate::core::process::{run_capture, run_output, stderr_text};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Guard over a mounted volume
#[derive(Debug)]
pub struct MountGuard {
    mount_point: PathBuf,
    already_mounted: bool,
    released: bool,
}

impl MountGuard {
    /// Ensure `device` is mounted and return a guard over the mount point.
    ///
    /// A mount point reported by the catalog, or one found for the device in
    /// the live mount table, is reused as-is (`already_mounted = true`, no
    /// mkdir, no mount). Otherwise the configured mount directory is created
    /// if absent and the device is mounted there.
    pub fn acquire(
        device: &str,
        candidate_mount: Option<&Path>,
        configured_mount: &Path,
    ) -> Result<Self> {
        if let Some(existing) = candidate_mount {
            println!("Device already mounted at: {}", existing.display());
            return Ok(Self {
                mount_point: existing.to_path_buf(),
                already_mounted: true,
                released: false,
            });
        }

        if let Some(existing) = find_live_mount(device) {
            println!("Device already mounted at: {}", existing.display());
            return Ok(Self {
                mount_point: existing,
                already_mounted: true,
                released: false,
            });
        }

        println!("Mounting {} on {}…", device, configured_mount.display());
        mount_device(device, configured_mount)?;
        Ok(Self {
            mount_point: configured_mount.to_path_buf(),
            already_mounted: false,
            released: false,
        })
    }

    /// The path files are read from and reorganized under
    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    /// Whether the volume was mounted before this run began
    pub fn already_mounted(&self) -> bool {
        self.already_mounted
    }

    /// Release the guard: unmount unless the volume was already mounted at
    /// acquisition time. Consumes the guard so release happens at most once.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.do_release()
    }

    fn do_release(&self) -> Result<()> {
        if self.already_mounted {
            println!(
                "Leaving {} mounted (was already mounted)",
                self.mount_point.display()
            );
            return Ok(());
        }
        println!("Unmounting {}…", self.mount_point.display());
        unmount(&self.mount_point)
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.do_release() {
            // Drop must not panic; report and move on
            warn!("{}", e);
        }
    }
}

/// Mount `device` at `mount_point`, creating the directory if needed
fn mount_device(device: &str, mount_point: &Path) -> Result<()> {
    if !mount_point.exists() {
        fs::create_dir_all(mount_point).map_err(|e| ImportError::Mount {
            device: device.to_string(),
            mount_point: mount_point.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    if is_mount_point(mount_point) {
        debug!("{} is already a mount point", mount_point.display());
        return Ok(());
    }

    let output = run_output("mount", &[device, &mount_point.to_string_lossy()]).map_err(|e| {
        ImportError::Mount {
            device: device.to_string(),
            mount_point: mount_point.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    if !output.status.success() {
        return Err(ImportError::Mount {
            device: device.to_string(),
            mount_point: mount_point.to_path_buf(),
            message: stderr_text(&output),
        });
    }
    Ok(())
}

/// Unmount `mount_point` if it is currently a mount point
fn unmount(mount_point: &Path) -> Result<()> {
    if !is_mount_point(mount_point) {
        debug!("{} is not a mount point; nothing to unmount", mount_point.display());
        return Ok(());
    }
    let output =
        run_output("umount", &[&mount_point.to_string_lossy()]).map_err(|e| ImportError::Unmount {
            mount_point: mount_point.to_path_buf(),
            message: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(ImportError::Unmount {
            mount_point: mount_point.to_path_buf(),
            message: stderr_text(&output),
        });
    }
    Ok(())
}

/// Look up the live mount table for an existing mount of `device`
pub fn find_live_mount(device: &str) -> Option<PathBuf> {
    run_capture("mount", &[]).and_then(|table| parse_mount_table(&table, device))
}

/// Whether `path` appears as a mount point in the live mount table
pub fn is_mount_point(path: &Path) -> bool {
    run_capture("mount", &[])
        .map(|table| table_mount_points(&table).iter().any(|mp| mp == path))
        .unwrap_or(false)
}

/// Find the mount point for `device` in `mount` output.
///
/// Lines look like `/dev/sdb1 on /media/card type vfat (rw)` on Linux and
/// `/dev/disk4s1 on /Volumes/CARD (msdos, local)` on macOS.
fn parse_mount_table(table: &str, device: &str) -> Option<PathBuf> {
    for line in table.lines() {
        let rest = match line.strip_prefix(device) {
            Some(rest) => rest,
            None => continue,
        };
        let rest = match rest.strip_prefix(" on ") {
            Some(rest) => rest,
            None => continue,
        };
        return Some(PathBuf::from(trim_mount_suffix(rest)));
    }
    None
}

/// All mount points in `mount` output
fn table_mount_points(table: &str) -> Vec<PathBuf> {
    table
        .lines()
        .filter_map(|line| line.split_once(" on "))
        .map(|(_, rest)| PathBuf::from(trim_mount_suffix(rest)))
        .collect()
}

fn trim_mount_suffix(rest: &str) -> &str {
    if let Some(idx) = rest.find(" type ") {
        &rest[..idx]
    } else if let Some(idx) = rest.find(" (") {
        &rest[..idx]
    } else {
        rest
    }
    .trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LINUX_TABLE: &str = "\
/dev/nvme0n1p2 on / type ext4 (rw,relatime)\n\
/dev/sdb1 on /media/card type vfat (rw,nosuid)\n";

    const MACOS_TABLE: &str = "\
/dev/disk3s1s1 on / (apfs, sealed, local, read-only, journaled)\n\
/dev/disk4s1 on /Volumes/CARD (msdos, local, nodev, nosuid)\n";

    #[test]
    fn test_parse_mount_table_linux() {
        assert_eq!(
            parse_mount_table(LINUX_TABLE, "/dev/sdb1"),
            Some(PathBuf::from("/media/card"))
        );
        assert_eq!(parse_mount_table(LINUX_TABLE, "/dev/sdc1"), None);
    }

    #[test]
    fn test_parse_mount_table_macos() {
        assert_eq!(
            parse_mount_table(MACOS_TABLE, "/dev/disk4s1"),
            Some(PathBuf::from("/Volumes/CARD"))
        );
    }

    #[test]
    fn test_table_mount_points() {
        let points = table_mount_points(LINUX_TABLE);
        assert!(points.contains(&PathBuf::from("/")));
        assert!(points.contains(&PathBuf::from("/media/card")));
    }

    #[test]
    fn test_release_leaves_preexisting_mount_alone() {
        let guard = MountGuard {
            mount_point: PathBuf::from("/media/card"),
            already_mounted: true,
            released: false,
        };
        // Must not attempt an unmount of a mount we did not create
        assert!(guard.release().is_ok());
    }

    #[test]
    fn test_release_skips_unmount_when_nothing_is_mounted() {
        // A tempdir is never a mount point, so the unmount is skipped and
        // release succeeds without touching the system.
        let dir = TempDir::new().unwrap();
        let guard = MountGuard {
            mount_point: dir.path().to_path_buf(),
            already_mounted: false,
            released: false,
        };
        assert!(guard.release().is_ok());
    }

    #[test]
    fn test_drop_releases_exactly_once() {
        let dir = TempDir::new().unwrap();
        let guard = MountGuard {
            mount_point: dir.path().to_path_buf(),
            already_mounted: false,
            released: false,
        };
        // Dropping without an explicit release must not panic
        drop(guard);
    }
}
