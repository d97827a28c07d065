//! Configuration system for Orrery.
//!
//! Provides runtime-configurable settings for the catalog server and the
//! orbital viewer, persisted to disk as RON files. Supports CLI overrides via
//! clap and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, CatalogConfig, Config, DebugConfig, SceneConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
