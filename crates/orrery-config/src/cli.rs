//! Command-line argument parsing shared by the Orrery binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Orrery planet catalog and viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Catalog server address.
    #[arg(long)]
    pub server: Option<String>,

    /// Catalog server port.
    #[arg(long)]
    pub port: Option<u16>,

    /// RON file with the planet list (server only).
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Seed for star placement and planet colors.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref addr) = args.server {
            self.catalog.server_address = addr.clone();
        }
        if let Some(port) = args.port {
            self.catalog.server_port = port;
        }
        if let Some(ref path) = args.catalog_file {
            self.catalog.catalog_file = Some(path.clone());
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
