use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Classifies addresses that should never appear as public DNS answers.
///
/// Implementations only supply the special-purpose range table; the
/// private/loopback/link-local checks are shared. Backends are selected at
/// build time, not through runtime inspection.
pub trait ReservedAddressLookup: Send + Sync {
    /// Special-purpose ranges not covered by [`is_private_ip`]
    /// (documentation, benchmarking, CGNAT, multicast, Teredo, ...).
    ///
    /// IPv4-mapped IPv6 addresses are unwrapped before this is called.
    fn is_special_purpose(&self, ip: IpAddr) -> bool;

    fn is_reserved(&self, ip: IpAddr) -> bool {
        let ip = canonical(ip);
        is_private_ip(ip) || self.is_special_purpose(ip)
    }
}

/// RFC 1918 / RFC 4193 private space, loopback and link-local.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match canonical(ip) {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => is_private_v6(v6),
    }
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    ip.is_loopback()
        || ip.is_link_local()
        // 224.0.0.0/24 link-local multicast
        || (a == 224 && b == 0 && c == 0)
        || a == 10
        || (a == 172 && (16..=31).contains(&b))
        || (a == 192 && b == 168)
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        // fe80::/10 link-local unicast
        || (first & 0xffc0) == 0xfe80
        // ff02::/16 link-local multicast
        || (first & 0xff0f) == 0xff02
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
}

/// Unwraps IPv4-mapped IPv6 addresses so they are judged as IPv4.
pub fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}
