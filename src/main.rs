//! SD Card Trip Import - CLI Entry Point
//!
//! This binary is a thin wrapper around the library, handling argument
//! parsing, configuration loading, logging setup, and dispatch.

use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::info;
use sd_import_tool::cli::{run_import, Args};
use sd_import_tool::core::config::Config;

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(ref config_path) = args.config {
        match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        }
    } else {
        Config::load_default().unwrap_or_default()
    };

    // Apply CLI overrides to config
    if let Some(ref mount_point) = args.mount_point {
        config.mount.mount_point = mount_point.clone();
    }
    if let Some(ref user) = args.remote_user {
        config.remote.user = user.clone();
    }
    if let Some(ref host) = args.remote_host {
        config.remote.host = host.clone();
    }
    if let Some(ref dir) = args.remote_dir {
        config.remote.dir = dir.clone();
    }
    if let Some(threshold) = args.threshold_days {
        config.trips.threshold_days = threshold;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }

    // Initialize logger
    Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    info!("SD Import Tool v{}", sd_import_tool::VERSION);

    run_import(&args, &config)
}
