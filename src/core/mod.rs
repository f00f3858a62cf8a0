//! Core functionality: configuration and error handling

pub mod config;
pub mod error;
pub mod process;

pub use config::Config;
pub use error::{ImportError, Result};
