//! Planet catalog service.
//!
//! Serves the configured planet list over HTTP until the process is killed.
//! Run with `cargo run -p orrery-server -- --port 4943`, optionally with
//! `--catalog-file planets.ron` to replace the built-in solar system.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use orrery_catalog::{Catalog, PlanetCatalog};
use orrery_config::{CatalogConfig, CliArgs, Config, default_config_dir};
use orrery_rpc::CatalogServer;
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

    let catalog = match load_catalog(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load planet catalog: {e}");
            std::process::exit(1);
        }
    };
    info!("Serving {} planets", catalog.len());
    catalog.debug_print();

    let mut server = CatalogServer::new(
        config.catalog.server_address.clone(),
        config.catalog.server_port,
    );
    if let Err(e) = server.start(Arc::new(catalog)) {
        error!("{e}");
        std::process::exit(1);
    }

    server.join();
}

fn log_dir(config: &Config, config_dir: &std::path::Path) -> PathBuf {
    config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"))
}

fn load_catalog(config: &CatalogConfig) -> Result<Catalog, orrery_catalog::CatalogError> {
    match config.catalog_file {
        Some(ref path) => {
            info!("Loading planet catalog from {}", path.display());
            Catalog::load(path)
        }
        None => Ok(Catalog::builtin()),
    }
}
