//! Check command: is an address covered by the current block list?

use anyhow::{Context, Result};
use std::net::Ipv4Addr;
use std::path::Path;

use crate::artifact::BlockListArtifact;
use crate::config::Config;

pub async fn run(ip: &str, config_path: &Path) -> Result<()> {
    let addr: Ipv4Addr = ip
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid IPv4 address: {}", ip))?;

    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let artifact = BlockListArtifact::load(config.artifact_path())
        .context("No block list found. Run 'phalanx update' first.")?;

    if artifact.covers(addr) {
        println!("{} is BLOCKED", addr);
    } else {
        println!("{} is not blocked", addr);
    }

    Ok(())
}
