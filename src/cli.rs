//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phalanx")]
#[command(author, version, about = "Threat-feed block-list builder for transparent firewalls")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "/etc/phalanx/config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (for cron/systemd timer)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Fetch all feeds and rebuild the block-list artifact
    Update {
        /// Fetch and process but don't write the artifact
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the current block-list artifact
    Show,

    /// Check whether an IP is covered by the current block list
    Check {
        /// IPv4 address to check
        ip: String,
    },

    /// Show version
    Version,
}
