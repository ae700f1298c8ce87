//! Update command: the feed-to-artifact pipeline.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::aggregator::aggregate;
use crate::artifact::BlockListArtifact;
use crate::compressor::compress;
use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::lock::LockGuard;
use crate::utils::format_count;

/// Fetch all enabled feeds, consolidate them, and rewrite the block-list
/// artifact. Under `--dry-run` everything runs except the final write.
pub async fn run(dry_run: bool, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Dry runs don't touch the artifact, so they don't need the lock.
    // The lock file lives next to the artifact it protects.
    let _lock = if dry_run {
        None
    } else {
        Some(LockGuard::acquire_at(&config.output_path.join(".phalanx.lock"))?)
    };

    let sources = config.enabled_sources();
    if sources.is_empty() {
        anyhow::bail!("No feed sources enabled. Check your configuration.");
    }

    info!("Updating block list from {} sources...", sources.len());

    let fetcher = Fetcher::new(config.timeout_secs)?;
    let outcomes = fetcher.fetch_feeds(&sources).await;

    // Failed sources were logged by the aggregator; only total exhaustion
    // aborts, so a stale-but-valid artifact is never replaced by an empty one.
    let block_list = aggregate(&outcomes)?;

    info!("Compressing {} addresses...", format_count(block_list.len()));
    let ranges = compress(&block_list);
    info!(
        "Compressed {} addresses -> {} ranges",
        format_count(block_list.len()),
        format_count(ranges.len())
    );

    let artifact = BlockListArtifact::from_ranges(&ranges);

    if dry_run {
        println!(
            "[DRY RUN] {} addresses -> {} entries, artifact not written",
            format_count(block_list.len()),
            format_count(artifact.len())
        );
        return Ok(());
    }

    artifact.save(config.artifact_path())?;

    println!(
        "[OK] {} addresses consolidated into {} block-list entries",
        format_count(block_list.len()),
        format_count(artifact.len())
    );

    Ok(())
}
