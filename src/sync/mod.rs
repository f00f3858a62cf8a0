//! Remote synchronization of the reorganized volume
//!
//! Runs rsync in archive/verbose mode against the remote archive. Transfer
//! failure is a hard error (rsync's own retry behavior is all the retrying
//! there is). After a successful transfer, now-empty source directories are
//! reported but never removed.

use crate::core::error::{ImportError, Result};
use log::info;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

/// Destination of the remote transfer
#[derive(Debug, Clone)]
pub struct RemoteTarget {
    pub user: String,
    pub host: String,
    pub dir: String,
}

impl RemoteTarget {
    /// The rsync destination string, `user@host:dir`
    pub fn destination(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.dir)
    }
}

/// Transfer the whole mount root to the remote archive.
///
/// rsync output streams straight to the terminal so its progress display
/// stays usable. A non-zero exit propagates as a transfer error.
pub fn sync_to_remote(mount_root: &Path, remote: &RemoteTarget) -> Result<()> {
    // Trailing slash: sync the contents of the root, not the root itself
    let source = format!("{}/", mount_root.display());
    let destination = remote.destination();

    let status = Command::new("rsync")
        .args(["-avh", "--progress", "--prune-empty-dirs"])
        .arg(&source)
        .arg(&destination)
        .status()
        .map_err(|e| ImportError::Transfer {
            destination: destination.clone(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(ImportError::Transfer {
            destination,
            message: format!("rsync exited with {}", status),
        });
    }

    report_empty_dirs(mount_root);
    Ok(())
}

/// Report directories left empty after the reorganization.
///
/// Removal is deliberately a no-op: the volume gets unmounted with leftover
/// empty directories rather than risk deleting anything during source
/// cleanup.
pub fn report_empty_dirs(mount_root: &Path) {
    for entry in WalkDir::new(mount_root)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() || entry.path() == mount_root {
            continue;
        }
        let is_empty = std::fs::read_dir(entry.path())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty {
            info!("Leaving empty directory in place: {}", entry.path().display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_destination_string() {
        let remote = RemoteTarget {
            user: "tyler".to_string(),
            host: "proxmox".to_string(),
            dir: "/main/imports/".to_string(),
        };
        assert_eq!(remote.destination(), "tyler@proxmox:/main/imports/");
    }

    #[test]
    fn test_report_empty_dirs_removes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("emptied")).unwrap();
        fs::create_dir(dir.path().join("kept")).unwrap();
        fs::write(dir.path().join("kept/photo.jpg"), b"x").unwrap();

        report_empty_dirs(dir.path());

        assert!(dir.path().join("emptied").exists());
        assert!(dir.path().join("kept/photo.jpg").exists());
    }
}
