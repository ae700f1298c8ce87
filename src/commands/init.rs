//! Init command: write the default configuration file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;

pub async fn run(force: bool, config_path: &Path) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {:?} (use --force to overwrite)",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    std::fs::write(config_path, Config::generate_default_yaml())
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    info!("Default config written to {:?}", config_path);
    println!("Config written to {}", config_path.display());

    Ok(())
}
