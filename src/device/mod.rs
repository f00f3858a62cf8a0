//! Removable-device discovery, selection, and mount lifecycle

pub mod catalog;
pub mod mount;
pub mod select;

pub use catalog::{list_candidates, DeviceCandidate};
pub use mount::MountGuard;
pub use select::select_candidate;
