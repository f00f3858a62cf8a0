//! Interactive device selection
//!
//! Presents the detected candidates as a 1-based menu, accepts an index or
//! `q` to abort, and requires an explicit confirmation before returning.
//! Abort is a clean outcome (`Ok(None)`), not an error.

use crate::core::error::{ImportError, Result};
use crate::device::catalog::DeviceCandidate;
use dialoguer::{Confirm, Input};

/// Let the user pick one of the detected candidates.
///
/// Returns `Ok(None)` when there are no candidates or the user aborts.
pub fn select_candidate(candidates: &[DeviceCandidate]) -> Result<Option<DeviceCandidate>> {
    if candidates.is_empty() {
        println!("No SD cards detected.");
        return Ok(None);
    }

    println!("Detected SD cards:");
    for (i, candidate) in candidates.iter().enumerate() {
        let mount_info = match &candidate.mount_point {
            Some(mp) => format!(" (mounted at {})", mp.display()),
            None => " (not mounted)".to_string(),
        };
        println!("{}. {}{}", i + 1, candidate.description, mount_info);
    }

    loop {
        let choice: String = Input::new()
            .with_prompt(format!(
                "Select SD card (1-{}) or 'q' to quit",
                candidates.len()
            ))
            .interact_text()
            .map_err(|e| ImportError::Prompt(e.to_string()))?;
        let choice = choice.trim();

        if choice.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let index = match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= candidates.len() => n - 1,
            _ => {
                println!(
                    "Please enter a number between 1 and {}, or 'q' to quit",
                    candidates.len()
                );
                continue;
            }
        };

        let selected = &candidates[index];
        let confirmed = Confirm::new()
            .with_prompt(format!("Use {}?", selected.description))
            .default(true)
            .interact()
            .map_err(|e| ImportError::Prompt(e.to_string()))?;

        if confirmed {
            return Ok(Some(selected.clone()));
        }
        // Declined: fall through and re-prompt
    }
}
