//! The persisted block-list artifact.
//!
//! The artifact is a JSON array of strings, each either a bare dotted-quad
//! address or a CIDR block, ascending by address. It is the sole interface
//! to the firewall-application stage, rewritten in full on every update run
//! and never merged incrementally.

use anyhow::{Context, Result};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// An ordered block list ready for the firewall-application stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BlockListArtifact {
    entries: Vec<String>,
}

impl BlockListArtifact {
    /// Render compressed ranges into artifact entries. Single addresses are
    /// written bare, everything else in `a.b.c.d/n` notation.
    pub fn from_ranges(ranges: &[Ipv4Net]) -> Self {
        let entries = ranges
            .iter()
            .map(|net| {
                if net.prefix_len() == 32 {
                    net.addr().to_string()
                } else {
                    net.to_string()
                }
            })
            .collect();
        Self { entries }
    }

    /// Write the artifact atomically: serialize to a temp file in the target
    /// directory, then rename over the destination. A reader never observes
    /// a partially-written list.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize block list")?;

        let parent_dir = path.parent().unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for block list")?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist block list: {:?}", path))?;

        info!("Block list saved to {:?} ({} entries)", path, self.entries.len());
        Ok(())
    }

    /// Load a previously persisted artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read block list: {:?}", path))?;
        let entries: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse block list: {:?}", path))?;
        Ok(Self { entries })
    }

    /// Whether `ip` falls inside any entry of the list.
    pub fn covers(&self, ip: Ipv4Addr) -> bool {
        self.entries.iter().any(|entry| match parse_entry(entry) {
            Some(net) => net.contains(&ip),
            None => false,
        })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse one artifact entry: bare addresses become /32 networks.
fn parse_entry(entry: &str) -> Option<Ipv4Net> {
    if entry.contains('/') {
        entry.parse().ok()
    } else {
        let addr: Ipv4Addr = entry.parse().ok()?;
        Ipv4Net::new(addr, 32).ok()
    }
}
