//! # Runtime Configuration
//!
//! Resolution order: built-in testnet defaults, then an optional JSON file,
//! then `SB_*` environment overrides. The result is validated once.

use std::path::Path;

use anyhow::{Context, Result};
use shared_types::ChainConfig;
use tracing::info;

/// Load and validate the chain configuration.
pub fn load_config(path: Option<&Path>) -> Result<ChainConfig> {
    let mut config = read_config_file(path)?;
    config.apply_env();
    config.validate().context("Invalid chain configuration")?;

    info!(
        indexer = %config.indexer_url,
        node = %config.node_url,
        page_size = config.page_size,
        "configuration loaded"
    );
    Ok(config)
}

/// File layer only: testnet defaults with `path` merged over them.
fn read_config_file(path: Option<&Path>) -> Result<ChainConfig> {
    match path {
        Some(path) => ChainConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ChainConfig::default()),
    }
}
