//! Small helpers for invoking external tools
//!
//! Everything the tool shells out to (lsblk, diskutil, mount, exiftool,
//! rsync) is consumed through its CLI contract; these helpers keep the
//! invocation and capture boilerplate in one place.

use log::debug;
use std::process::{Command, Output, Stdio};

/// Run a command and capture its stdout.
///
/// Returns `None` when the tool cannot be spawned (missing binary) or exits
/// with a non-zero status. Callers that treat tool failure as a soft
/// condition (device enumeration, metadata extraction) use this.
pub fn run_capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).to_string()),
        Ok(out) => {
            debug!(
                "{} {:?} exited with {}: {}",
                program,
                args,
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            );
            None
        }
        Err(e) => {
            debug!("Failed to spawn {}: {}", program, e);
            None
        }
    }
}

/// Run a command and return the full output, propagating spawn failures.
///
/// Callers that must distinguish and report tool failure (mount, unmount)
/// use this and inspect the status themselves.
pub fn run_output(program: &str, args: &[&str]) -> std::io::Result<Output> {
    Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
}

/// Extract a trimmed stderr string from a finished command, for error messages
pub fn stderr_text(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if text.is_empty() {
        format!("exited with {}", output.status)
    } else {
        text
    }
}
