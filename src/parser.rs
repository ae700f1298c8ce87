//! Feed parsers for the supported threat-feed formats.
//!
//! Each feed publishes addresses in its own text layout; parsing normalizes
//! all of them to plain [`Ipv4Addr`] candidates. Validation is two-stage on
//! purpose: a permissive dotted-quad regex locates candidate tokens, then
//! `Ipv4Addr` parsing rejects out-of-range octets. The regex never bounds
//! octets to 0-255; feeds are known to contain tokens like `999.1.2.3` and
//! those must fall through to the address parser, not crash the line.
//!
//! Malformed lines are skipped with debug-level logging. A bad line never
//! aborts its feed.

use ipnet::{Ipv4AddrRange, Ipv4Net};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::sync::LazyLock;
use tracing::debug;

use crate::routability::is_global;

/// Permissive dotted-quad matcher. Octet range checking is deferred to
/// `Ipv4Addr` parsing.
static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap());

/// Text layout of a feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FeedFormat {
    /// One address at the start of each line, followed by a space and a
    /// free-text annotation (AlienVault OTX reputation style).
    CommentedIp,
    /// Exactly one bare address per line (Cisco Talos style).
    LinePerIp,
    /// Tab-separated WHOIS-style records: base address in column 0, prefix
    /// length in column 2 (ISC DShield style).
    Netblock,
}

/// Parse one feed's raw text into globally-routable candidate addresses.
///
/// Duplicates within a single feed are preserved; cross-source dedup happens
/// in the aggregator.
pub fn parse(format: FeedFormat, text: &str) -> Vec<Ipv4Addr> {
    match format {
        FeedFormat::CommentedIp => parse_commented_ip(text),
        FeedFormat::LinePerIp => parse_line_per_ip(text),
        FeedFormat::Netblock => parse_netblock(text),
    }
}

/// Take the first whitespace-separated token of each line and keep it if it
/// is a valid, globally-routable address.
fn parse_commented_ip(text: &str) -> Vec<Ipv4Addr> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| DOTTED_QUAD.is_match(token))
        .filter_map(|token| match token.parse::<Ipv4Addr>() {
            Ok(addr) => Some(addr),
            Err(_) => {
                debug!("Skipping unparsable token: {}", token);
                None
            }
        })
        .filter(|addr| is_global(*addr))
        .collect()
}

/// Match the dotted-quad pattern anywhere in the line and validate the match.
fn parse_line_per_ip(text: &str) -> Vec<Ipv4Addr> {
    text.lines()
        .filter_map(|line| DOTTED_QUAD.find(line))
        .filter_map(|m| match m.as_str().parse::<Ipv4Addr>() {
            Ok(addr) => Some(addr),
            Err(_) => {
                debug!("Skipping unparsable token: {}", m.as_str());
                None
            }
        })
        .filter(|addr| is_global(*addr))
        .collect()
}

/// Expand tab-separated netblock records into individual addresses.
///
/// The column layout (base at 0, prefix at 2) is an external-format
/// dependency of the DShield feed; rows that do not fit it are skipped
/// rather than trusted.
fn parse_netblock(text: &str) -> Vec<Ipv4Addr> {
    text.lines()
        .filter(|line| DOTTED_QUAD.is_match(line))
        .filter_map(|line| {
            expand_netblock_row(line).or_else(|| {
                debug!("Skipping malformed netblock row: {}", line);
                None
            })
        })
        .flatten()
        .collect()
}

/// Parse one netblock row into the full address range it covers, network and
/// broadcast addresses included. Returns `None` for rows with missing
/// columns, an unparsable base address, or an invalid prefix length.
fn expand_netblock_row(line: &str) -> Option<Vec<Ipv4Addr>> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < 3 {
        return None;
    }

    let base: Ipv4Addr = columns[0].trim().parse().ok()?;
    let prefix: u8 = columns[2].trim().parse().ok()?;
    let net = Ipv4Net::new(base, prefix).ok()?;

    Some(
        Ipv4AddrRange::new(net.network(), net.broadcast())
            .filter(|addr| is_global(*addr))
            .collect(),
    )
}
