//! IANA-assigned IP protocol numbers used by the wire codec.
//!
//! Only the numbers the classifier and the IPv6 extension walker branch on
//! are named here; [`ip_protocol_name`] covers the common ones for logging.

pub const PROTO_HOPOPT: u8 = 0;
pub const PROTO_ICMP: u8 = 1;
pub const PROTO_IGMP: u8 = 2;
pub const PROTO_IPV4: u8 = 4;
pub const PROTO_TCP: u8 = 6;
pub const PROTO_UDP: u8 = 17;
pub const PROTO_IPV6: u8 = 41;
pub const PROTO_IPV6_ROUTE: u8 = 43;
pub const PROTO_IPV6_FRAG: u8 = 44;
pub const PROTO_GRE: u8 = 47;
pub const PROTO_ESP: u8 = 50;
pub const PROTO_AH: u8 = 51;
pub const PROTO_IPV6_ICMP: u8 = 58;
pub const PROTO_IPV6_NONXT: u8 = 59;
pub const PROTO_IPV6_OPTS: u8 = 60;
pub const PROTO_SCTP: u8 = 132;

/// Well-known DNS port.
pub const DNS_PORT: u16 = 53;

/// Returns a short name for common protocol numbers, or the decimal number
/// for everything else.
pub fn ip_protocol_name(proto: u8) -> String {
    let name = match proto {
        PROTO_HOPOPT => "HOPOPT",
        PROTO_ICMP => "ICMP",
        PROTO_IGMP => "IGMP",
        PROTO_IPV4 => "IPv4",
        PROTO_TCP => "TCP",
        PROTO_UDP => "UDP",
        PROTO_IPV6 => "IPv6",
        PROTO_IPV6_ROUTE => "IPv6-Route",
        PROTO_IPV6_FRAG => "IPv6-Frag",
        PROTO_GRE => "GRE",
        PROTO_ESP => "ESP",
        PROTO_AH => "AH",
        PROTO_IPV6_ICMP => "ICMPv6",
        PROTO_IPV6_NONXT => "IPv6-NoNxt",
        PROTO_IPV6_OPTS => "IPv6-Opts",
        PROTO_SCTP => "SCTP",
        other => return other.to_string(),
    };
    name.to_string()
}
