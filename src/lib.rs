//! # Phalanx - Threat-Feed Block-List Builder
//!
//! Phalanx automates the intelligence side of a transparent bridging
//! firewall: it downloads public threat feeds, normalizes their
//! heterogeneous formats to individual globally-routable IPv4 addresses,
//! unions and deduplicates them across sources, compresses the result into
//! a minimal CIDR cover, and persists a JSON block-list artifact that the
//! firewall-application stage loads into its kernel matching set.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Phalanx                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                  │
//! │    └── Commands: init, update, show, check, version          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                         │
//! │    └── Feed sources (name, url, format) + output location    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                  │
//! │    └── One GET per source, isolated failures                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Parser (per-format strategies)                              │
//! │    ├── commented-ip  (OTX-style annotated lines)             │
//! │    ├── line-per-ip   (Talos-style bare addresses)            │
//! │    └── netblock      (DShield-style WHOIS records)           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Aggregator                                                  │
//! │    └── Union + dedup + numeric sort across sources           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Compressor                                                  │
//! │    └── Minimal CIDR cover of contiguous runs                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Artifact (serde_json + tempfile)                            │
//! │    └── Atomic write of the JSON block list                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure model
//!
//! Per-source fetch failures and per-line parse failures are absorbed where
//! they occur; a partial run (2 of 3 feeds reachable) still produces a full
//! artifact. Only total source exhaustion is fatal, and in that case the
//! previous artifact is left untouched.
//!
//! ## Modules
//!
//! - [`aggregator`] - Cross-source union, dedup and ordering
//! - [`artifact`] - Persisted block-list artifact
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`compressor`] - Minimal CIDR cover
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error taxonomy
//! - [`fetcher`] - HTTP client for downloading feeds
//! - [`lock`] - File locking for concurrent execution prevention
//! - [`parser`] - Per-format feed parsing strategies
//! - [`routability`] - Global routability predicate
//! - [`utils`] - Formatting helpers

pub mod aggregator;
pub mod artifact;
pub mod cli;
pub mod commands;
pub mod compressor;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod lock;
pub mod parser;
pub mod routability;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
