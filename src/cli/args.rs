//! Command-line argument definitions
//!
//! This module defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// Import an SD card, group media by trip, and rsync to a remote archive
#[derive(Parser, Debug)]
#[command(name = "sd-import")]
#[command(version = "1.0.0")]
#[command(
    about = "Import an SD card, group media by trip, and rsync to a remote archive",
    long_about = None
)]
pub struct Args {
    /// SD card device node (e.g. /dev/sdb1). If not specified, will auto-detect.
    pub device: Option<String>,

    /// Local mount point for the SD card (overrides config)
    #[arg(long)]
    pub mount_point: Option<PathBuf>,

    /// SSH user for the remote host (overrides config)
    #[arg(long)]
    pub remote_user: Option<String>,

    /// Remote host to rsync to (overrides config)
    #[arg(long)]
    pub remote_host: Option<String>,

    /// Remote directory to import into (overrides config)
    #[arg(long)]
    pub remote_dir: Option<String>,

    /// Day gap threshold to start a new trip (overrides config)
    #[arg(long)]
    pub threshold_days: Option<i64>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(["sd-import"]);
        assert!(args.device.is_none());
        assert!(args.mount_point.is_none());
        assert!(args.threshold_days.is_none());
    }

    #[test]
    fn test_parse_full_invocation() {
        let args = Args::parse_from([
            "sd-import",
            "/dev/sdb1",
            "--mount-point",
            "/mnt/card",
            "--remote-user",
            "alex",
            "--remote-host",
            "archive",
            "--remote-dir",
            "/data/imports/",
            "--threshold-days",
            "3",
        ]);
        assert_eq!(args.device.as_deref(), Some("/dev/sdb1"));
        assert_eq!(args.mount_point, Some(PathBuf::from("/mnt/card")));
        assert_eq!(args.remote_user.as_deref(), Some("alex"));
        assert_eq!(args.remote_host.as_deref(), Some("archive"));
        assert_eq!(args.remote_dir.as_deref(), Some("/data/imports/"));
        assert_eq!(args.threshold_days, Some(3));
    }
}
