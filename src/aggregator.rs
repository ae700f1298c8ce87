//! Cross-source aggregation of feed results.
//!
//! Partial-source outage is expected and non-fatal: a failed source is
//! logged and skipped. Only total exhaustion (every configured source
//! failing) aborts the run, because an empty block list would silently
//! disable the firewall's protection.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::fetcher::SourceOutcome;
use crate::utils::format_count;

/// Union all successful sources into a sorted, deduplicated address list.
///
/// `BTreeSet<Ipv4Addr>` gives both properties at once: `Ipv4Addr` orders by
/// octets most-significant first, which is exactly ascending numeric order
/// (and not the lexicographic string order that would put 10.0.0.10 before
/// 10.0.0.2).
///
/// Returns [`PipelineError::NoSourcesAvailable`] when every source failed.
pub fn aggregate(outcomes: &[SourceOutcome]) -> Result<Vec<Ipv4Addr>, PipelineError> {
    let mut block_set: BTreeSet<Ipv4Addr> = BTreeSet::new();
    let mut successes = 0usize;

    for outcome in outcomes {
        match &outcome.result {
            Ok(addrs) => {
                successes += 1;
                block_set.extend(addrs.iter().copied());
            }
            Err(e) => {
                warn!("Skipping source {}: {}", outcome.name, e);
            }
        }
    }

    if successes == 0 {
        return Err(PipelineError::NoSourcesAvailable);
    }

    info!(
        "Aggregated {} sources - {} unique addresses",
        successes,
        format_count(block_set.len())
    );

    Ok(block_set.into_iter().collect())
}
