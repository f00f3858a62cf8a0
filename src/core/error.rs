//! Error types for the SD import tool
//!
//! Per-file metadata and geocoding failures are deliberately not represented
//! here: those degrade to `None` at the call site and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the SD import tool
#[derive(Error, Debug)]
pub enum ImportError {
    /// Mounting the device failed
    #[error("Failed to mount {device} at {mount_point}: {message}")]
    Mount {
        device: String,
        mount_point: PathBuf,
        message: String,
    },

    /// Unmounting the volume failed
    #[error("Failed to unmount {mount_point}: {message}")]
    Unmount { mount_point: PathBuf, message: String },

    /// Moving a file into its trip directory failed
    #[error("Failed to move '{from}' to '{to}': {message}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    /// The remote transfer tool reported failure
    #[error("Transfer to {destination} failed: {message}")]
    Transfer {
        destination: String,
        message: String,
    },

    /// Reading interactive input failed
    #[error("Failed to read input: {0}")]
    Prompt(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ImportError>;

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err.to_string())
    }
}
