//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Local overrides (optional)
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables (highest priority): CHIKO_QUOTA__PER_MINUTE_LIMIT
        .add_source(environment())
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// `CHIKO_<SECTION>__<KEY>` environment source, e.g. `CHIKO_CREDENTIAL__API_KEY`
fn environment() -> Environment {
    Environment::with_prefix("CHIKO")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
