//! Minimal CIDR cover for sorted address lists.
//!
//! A block list of individual addresses loads slowly into kernel matching
//! sets; merging contiguous runs into the fewest covering CIDR blocks keeps
//! the set small without ever widening coverage. The output's union is
//! exactly the input set: addresses absent from the input are never swept in.

use ipnet::{Ipv4AddrRange, Ipv4Net};
use std::net::Ipv4Addr;

/// Compress a sorted, deduplicated address list into the minimal set of
/// CIDR blocks covering exactly the same addresses.
///
/// Contiguous runs are detected over the `u32` representation, then each
/// run is split into the fewest power-of-two-aligned blocks. Standalone
/// addresses come out as /32 blocks. An empty input yields an empty output.
///
/// The sorted-and-deduplicated precondition is guaranteed by the
/// aggregator; it is asserted here because a violation would corrupt run
/// detection silently.
pub fn compress(addrs: &[Ipv4Addr]) -> Vec<Ipv4Net> {
    debug_assert!(
        addrs.windows(2).all(|w| w[0] < w[1]),
        "compressor input must be sorted and deduplicated"
    );

    let mut blocks = Vec::new();
    let mut i = 0;

    while i < addrs.len() {
        let start = u32::from(addrs[i]);
        let mut end = start;
        i += 1;

        // Extend the run while addresses stay contiguous
        while i < addrs.len() && end < u32::MAX && u32::from(addrs[i]) == end + 1 {
            end += 1;
            i += 1;
        }

        cover_run(start, end, &mut blocks);
    }

    blocks
}

/// Enumerate every address a block covers.
pub fn expand(net: Ipv4Net) -> impl Iterator<Item = Ipv4Addr> {
    Ipv4AddrRange::new(net.network(), net.broadcast())
}

/// Split the inclusive run `[start, end]` into maximal aligned CIDR blocks.
///
/// At each step the block size is limited by two things: the alignment of
/// the current position (a block must start on its own size boundary) and
/// the number of addresses left in the run.
fn cover_run(start: u32, end: u32, blocks: &mut Vec<Ipv4Net>) {
    let mut cur = start;

    loop {
        let align_bits = if cur == 0 { 32 } else { cur.trailing_zeros() };
        let remaining = u64::from(end) - u64::from(cur) + 1;
        let size_bits = 63 - remaining.leading_zeros();
        let host_bits = align_bits.min(size_bits);
        let prefix = (32 - host_bits) as u8;

        blocks.push(
            Ipv4Net::new(Ipv4Addr::from(cur), prefix)
                .expect("prefix length is always <= 32"),
        );

        let next = u64::from(cur) + (1u64 << host_bits);
        if next > u64::from(end) {
            break;
        }
        cur = next as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn addrs(list: &[&str]) -> Vec<Ipv4Addr> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn blocks(list: &[&str]) -> Vec<Ipv4Net> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(compress(&[]).is_empty());
    }

    #[test]
    fn test_single_address_is_slash_32() {
        let out = compress(&addrs(&["1.2.3.4"]));
        assert_eq!(out, blocks(&["1.2.3.4/32"]));
    }

    #[test]
    fn test_aligned_run_merges_to_single_block() {
        let run: Vec<Ipv4Addr> = (0..=255u8)
            .map(|d| Ipv4Addr::new(198, 51, 100, d))
            .collect();
        let out = compress(&run);
        assert_eq!(out, blocks(&["198.51.100.0/24"]));
    }

    #[test]
    fn test_aligned_pair_merges_to_slash_31() {
        let out = compress(&addrs(&["8.8.8.8", "8.8.8.9"]));
        assert_eq!(out, blocks(&["8.8.8.8/31"]));
    }

    #[test]
    fn test_misaligned_pair_stays_split() {
        // 8.8.8.9/.10 are contiguous but not a valid /31 (odd start)
        let out = compress(&addrs(&["8.8.8.9", "8.8.8.10"]));
        assert_eq!(out, blocks(&["8.8.8.9/32", "8.8.8.10/32"]));
    }

    #[test]
    fn test_misaligned_run_minimal_split() {
        // .1 through .6: /32 + /31 + /31 + /32 is the minimal aligned cover
        let run = addrs(&["7.0.0.1", "7.0.0.2", "7.0.0.3", "7.0.0.4", "7.0.0.5", "7.0.0.6"]);
        let out = compress(&run);
        assert_eq!(
            out,
            blocks(&["7.0.0.1/32", "7.0.0.2/31", "7.0.0.4/31", "7.0.0.6/32"])
        );
    }

    #[test]
    fn test_gap_is_never_bridged() {
        let out = compress(&addrs(&["8.8.8.8", "8.8.8.10"]));
        assert_eq!(out, blocks(&["8.8.8.8/32", "8.8.8.10/32"]));
    }

    #[test]
    fn test_run_crossing_octet_boundary() {
        // 1.2.3.255 and 1.2.4.0 are numerically adjacent
        let out = compress(&addrs(&["1.2.3.255", "1.2.4.0"]));
        assert_eq!(out.len(), 2);
        let expanded: BTreeSet<Ipv4Addr> = out.iter().flat_map(|n| expand(*n)).collect();
        assert_eq!(expanded.len(), 2);
        assert!(expanded.contains(&"1.2.3.255".parse().unwrap()));
        assert!(expanded.contains(&"1.2.4.0".parse().unwrap()));
    }

    #[test]
    fn test_top_of_address_space() {
        let out = compress(&addrs(&["255.255.255.254", "255.255.255.255"]));
        assert_eq!(out, blocks(&["255.255.255.254/31"]));
    }

    #[test]
    fn test_round_trip_exactness() {
        let input = addrs(&[
            "5.5.5.4", "5.5.5.5", "5.5.5.6", "5.5.5.7", "5.5.5.9", "9.9.9.9",
        ]);
        let out = compress(&input);
        let expanded: BTreeSet<Ipv4Addr> = out.iter().flat_map(|n| expand(*n)).collect();
        let original: BTreeSet<Ipv4Addr> = input.into_iter().collect();
        assert_eq!(expanded, original);
    }

    #[test]
    fn test_idempotent_on_minimal_input() {
        let input = addrs(&["5.5.5.4", "5.5.5.5", "5.5.5.6", "5.5.5.7", "9.9.9.9"]);
        let first = compress(&input);
        let re_expanded: Vec<Ipv4Addr> = {
            let set: BTreeSet<Ipv4Addr> = first.iter().flat_map(|n| expand(*n)).collect();
            set.into_iter().collect()
        };
        let second = compress(&re_expanded);
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Sorted, deduplicated address lists clustered into a narrow range so
    /// runs actually form.
    fn address_list_strategy() -> impl Strategy<Value = Vec<Ipv4Addr>> {
        prop::collection::btree_set(0x0a000000u32..0x0a000400u32, 0..200)
            .prop_map(|set| set.into_iter().map(Ipv4Addr::from).collect())
    }

    proptest! {
        /// Compress-then-expand reproduces the input set exactly.
        #[test]
        fn prop_round_trip_exact(input in address_list_strategy()) {
            let out = compress(&input);
            let expanded: BTreeSet<Ipv4Addr> = out.iter().flat_map(|n| expand(*n)).collect();
            let original: BTreeSet<Ipv4Addr> = input.iter().copied().collect();
            prop_assert_eq!(expanded, original);
        }

        /// Output never has more entries than the input.
        #[test]
        fn prop_never_grows(input in address_list_strategy()) {
            prop_assert!(compress(&input).len() <= input.len());
        }

        /// Every emitted block is aligned to its own size.
        #[test]
        fn prop_blocks_are_aligned(input in address_list_strategy()) {
            for net in compress(&input) {
                prop_assert_eq!(net.network(), net.addr());
            }
        }

        /// Compression is idempotent: re-compressing the expansion of a
        /// minimal cover yields the same cover.
        #[test]
        fn prop_idempotent(input in address_list_strategy()) {
            let first = compress(&input);
            let set: BTreeSet<Ipv4Addr> = first.iter().flat_map(|n| expand(*n)).collect();
            let re_expanded: Vec<Ipv4Addr> = set.into_iter().collect();
            prop_assert_eq!(compress(&re_expanded), first);
        }
    }
}
