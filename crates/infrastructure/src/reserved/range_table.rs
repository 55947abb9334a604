use super::cidr_table::{ipv4_ranges, ipv6_ranges};
use ferrous_dnswire_domain::ReservedAddressLookup;
use std::net::IpAddr;
use std::sync::LazyLock;

/// Sorted, non-overlapping inclusive IPv4 ranges.
static IPV4_INTERVALS: LazyLock<Vec<(u32, u32)>> = LazyLock::new(|| {
    let mut intervals: Vec<(u32, u32)> = ipv4_ranges()
        .iter()
        .map(|(addr, prefix)| {
            let mask = prefix_mask_u32(*prefix);
            let start = u32::from(*addr) & mask;
            (start, start | !mask)
        })
        .collect();
    intervals.sort_unstable();
    intervals
});

/// (network, mask) pairs; IPv6 tables are short enough to scan.
static IPV6_PREFIXES: LazyLock<Vec<(u128, u128)>> = LazyLock::new(|| {
    ipv6_ranges()
        .iter()
        .map(|(addr, prefix)| {
            let mask = prefix_mask_u128(*prefix);
            (u128::from(*addr) & mask, mask)
        })
        .collect()
});

/// Binary search over integer intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeTableLookup;

impl RangeTableLookup {
    pub fn new() -> Self {
        Self
    }
}

impl ReservedAddressLookup for RangeTableLookup {
    fn is_special_purpose(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => {
                let value = u32::from(v4);
                let idx = IPV4_INTERVALS.partition_point(|(start, _)| *start <= value);
                idx > 0 && value <= IPV4_INTERVALS[idx - 1].1
            }
            IpAddr::V6(v6) => {
                let value = u128::from(v6);
                IPV6_PREFIXES
                    .iter()
                    .any(|(network, mask)| value & mask == *network)
            }
        }
    }
}

fn prefix_mask_u32(prefix: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(prefix.min(32))).unwrap_or(0)
}

fn prefix_mask_u128(prefix: u8) -> u128 {
    u128::MAX
        .checked_shl(128 - u32::from(prefix.min(128)))
        .unwrap_or(0)
}
