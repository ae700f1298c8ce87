//! Show command: print the persisted block list.

use anyhow::{Context, Result};
use std::path::Path;

use crate::artifact::BlockListArtifact;
use crate::config::Config;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let artifact = BlockListArtifact::load(config.artifact_path())
        .context("No block list found. Run 'phalanx update' first.")?;

    for entry in artifact.entries() {
        println!("{}", entry);
    }

    Ok(())
}
