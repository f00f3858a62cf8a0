//! Command-line interface: argument parsing and the import orchestrator

pub mod args;
pub mod commands;

pub use args::Args;
pub use commands::run_import;
