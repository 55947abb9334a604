use ferrous_dnswire_domain::ReservedAddressLookup;
use ipnetwork::{Ipv4Network, Ipv6Network};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

const IPV4_RANGES: &[(Ipv4Addr, u8)] = &[
    (Ipv4Addr::new(0, 0, 0, 0), 8),      // "this" network
    (Ipv4Addr::new(100, 64, 0, 0), 10),  // shared address space (CGNAT)
    (Ipv4Addr::new(192, 0, 0, 0), 29),   // IETF protocol assignments
    (Ipv4Addr::new(192, 0, 2, 0), 24),   // TEST-NET-1
    (Ipv4Addr::new(192, 88, 99, 0), 24), // 6to4 relay anycast
    (Ipv4Addr::new(198, 18, 0, 0), 15),  // benchmarking
    (Ipv4Addr::new(198, 51, 100, 0), 24), // TEST-NET-2
    (Ipv4Addr::new(203, 0, 113, 0), 24), // TEST-NET-3
    (Ipv4Addr::new(224, 0, 0, 0), 3),    // multicast and class E
];

const IPV6_RANGES: &[(Ipv6Addr, u8)] = &[
    (Ipv6Addr::UNSPECIFIED, 128),
    // IPv4-mapped. `is_reserved` unwraps these to IPv4 first, so this only
    // matches when `is_special_purpose` is called directly.
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0, 0), 96),
    (Ipv6Addr::new(0x100, 0, 0, 0, 0, 0, 0, 0), 64),  // discard-only
    (Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 32), // Teredo
    (Ipv6Addr::new(0x2001, 0x10, 0, 0, 0, 0, 0, 0), 28), // ORCHID
    (Ipv6Addr::new(0x2001, 0x20, 0, 0, 0, 0, 0, 0), 28), // ORCHIDv2
    (Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32), // documentation
    (Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8),  // multicast
];

pub(super) fn ipv4_ranges() -> &'static [(Ipv4Addr, u8)] {
    IPV4_RANGES
}

pub(super) fn ipv6_ranges() -> &'static [(Ipv6Addr, u8)] {
    IPV6_RANGES
}

static IPV4_NETWORKS: LazyLock<Vec<Ipv4Network>> = LazyLock::new(|| {
    IPV4_RANGES
        .iter()
        .filter_map(|(addr, prefix)| Ipv4Network::new(*addr, *prefix).ok())
        .collect()
});

static IPV6_NETWORKS: LazyLock<Vec<Ipv6Network>> = LazyLock::new(|| {
    IPV6_RANGES
        .iter()
        .filter_map(|(addr, prefix)| Ipv6Network::new(*addr, *prefix).ok())
        .collect()
});

/// Linear scan over `ipnetwork` CIDR blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CidrTableLookup;

impl CidrTableLookup {
    pub fn new() -> Self {
        Self
    }
}

impl ReservedAddressLookup for CidrTableLookup {
    fn is_special_purpose(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => IPV4_NETWORKS.iter().any(|net| net.contains(v4)),
            IpAddr::V6(v6) => IPV6_NETWORKS.iter().any(|net| net.contains(v6)),
        }
    }
}
