//! Global routability classification for IPv4 addresses.
//!
//! Feeds routinely carry private, loopback or otherwise reserved addresses,
//! either as junk data or as deliberate poisoning. Everything that is not
//! globally routable is dropped before it can reach the block list.

use std::net::Ipv4Addr;

/// Returns `true` if `addr` is globally routable.
///
/// Excluded ranges, per IANA IPv4 special-purpose allocations:
/// - 0.0.0.0/8          "this network"
/// - 10/8, 172.16/12, 192.168/16 (RFC1918 private)
/// - 100.64/10          shared address space (RFC6598)
/// - 127/8              loopback
/// - 169.254/16         link-local
/// - 192.0.0.0/24       IETF protocol assignments
/// - 198.18/15          benchmarking
/// - 224/4              multicast
/// - 240/4              reserved
/// - 255.255.255.255    limited broadcast
pub fn is_global(addr: Ipv4Addr) -> bool {
    let octets = addr.octets();

    !(addr.is_unspecified()
        || addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_multicast()
        || addr.is_broadcast()
        // Shared address space 100.64.0.0/10 (RFC6598)
        || (octets[0] == 100 && (octets[1] & 0xc0) == 64)
        // IETF protocol assignments 192.0.0.0/24
        || (octets[0] == 192 && octets[1] == 0 && octets[2] == 0)
        // Benchmarking 198.18.0.0/15
        || (octets[0] == 198 && (octets[1] & 0xfe) == 18)
        // Reserved 240.0.0.0/4 (broadcast handled above)
        || (octets[0] & 0xf0) == 240
        // This network 0.0.0.0/8
        || octets[0] == 0)
}
