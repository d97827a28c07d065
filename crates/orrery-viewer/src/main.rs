//! Orbital viewer.
//!
//! Connects to a running catalog service (see `orrery-server`) and shows its
//! planets orbiting the sun. Click a planet for its details; Escape closes
//! them and F12 asks the service to log its catalog.

use std::path::{Path, PathBuf};

use clap::Parser;
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map(Ok).unwrap_or_else(default_config_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            std::process::exit(1);
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = log_dir(&config, &config_dir);
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Orrery viewer, catalog service at {}",
        config.catalog.base_url()
    );

    if let Err(e) = orrery_viewer::run(config) {
        error!("Viewer failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn log_dir(config: &Config, config_dir: &Path) -> PathBuf {
    config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"))
}
