//! In-place destination rewrite of UDP packets, with checksum repair.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ferrous_dnswire_domain::protocol::{DNS_PORT, PROTO_IPV6_ROUTE};
use ferrous_dnswire_domain::reserved::canonical;
use ferrous_dnswire_domain::{IpVersion, PacketError};

use super::checksum::{ipv4_header_checksum, udp_checksum_v4, udp_checksum_v6};
use super::classifier::{locate_udp, LocatedUdp, UDP_HEADER_LEN};

const IPV4_SRC: std::ops::Range<usize> = 12..16;
const IPV4_DST: std::ops::Range<usize> = 16..20;
const IPV6_SRC: std::ops::Range<usize> = 8..24;
const IPV6_DST: std::ops::Range<usize> = 24..40;

/// Rewrites the destination of a UDP packet to `target`:53.
///
/// The target must belong to the packet's address family. An IPv4-mapped
/// IPv6 literal counts as IPv4, so it is accepted for IPv4 packets and
/// rejected for IPv6 ones. The packet must be an unfragmented UDP datagram
/// whose whole segment was captured. IPv6 packets routed through a Routing
/// header are refused because their checksum covers the final segment rather
/// than the destination field.
///
/// Every check runs before the first write: on error the buffer is left
/// untouched.
pub fn rewrite_destination(packet: &mut [u8], target: &str) -> Result<(), PacketError> {
    let target: IpAddr = target
        .trim()
        .parse()
        .map_err(|_| PacketError::InvalidTarget(target.to_string()))?;

    let located = locate_udp(packet)?;
    let version = located.datagram.addressing.ip_version;

    match (version, target) {
        (IpVersion::V4, addr) => match canonical(addr) {
            IpAddr::V4(v4) => {
                let segment = full_segment(packet, &located)?;
                write_ipv4(packet, &located, segment, v4);
                Ok(())
            }
            IpAddr::V6(_) => Err(PacketError::AddressFamilyMismatch),
        },
        (IpVersion::V6, IpAddr::V6(v6)) if v6.to_ipv4_mapped().is_none() => {
            if located.routed {
                return Err(PacketError::UnsupportedExtensionChain(PROTO_IPV6_ROUTE));
            }
            let segment = full_segment(packet, &located)?;
            write_ipv6(packet, segment, v6);
            Ok(())
        }
        (IpVersion::V6, _) => Err(PacketError::AddressFamilyMismatch),
    }
}

/// The UDP segment range, which must lie entirely inside the buffer.
fn full_segment(
    packet: &[u8],
    located: &LocatedUdp,
) -> Result<std::ops::Range<usize>, PacketError> {
    let start = located.datagram.addressing.transport_offset;
    let len = usize::from(located.datagram.udp_length);
    if len < UDP_HEADER_LEN || start + len > packet.len() {
        return Err(PacketError::TruncatedHeader);
    }
    Ok(start..start + len)
}

fn write_ipv4(
    packet: &mut [u8],
    located: &LocatedUdp,
    segment: std::ops::Range<usize>,
    target: Ipv4Addr,
) {
    packet[IPV4_DST].copy_from_slice(&target.octets());
    set_destination_port(packet, segment.start);

    let header_checksum = ipv4_header_checksum(&packet[..located.ipv4_header_len]);
    packet[10..12].copy_from_slice(&header_checksum.to_be_bytes());

    let src = Ipv4Addr::from(octets::<4>(&packet[IPV4_SRC]));
    let udp = udp_checksum_v4(src, target, &packet[segment.clone()]);
    packet[segment.start + 6..segment.start + 8].copy_from_slice(&udp.to_be_bytes());
}

fn write_ipv6(packet: &mut [u8], segment: std::ops::Range<usize>, target: Ipv6Addr) {
    packet[IPV6_DST].copy_from_slice(&target.octets());
    set_destination_port(packet, segment.start);

    let src = Ipv6Addr::from(octets::<16>(&packet[IPV6_SRC]));
    let udp = udp_checksum_v6(src, target, &packet[segment.clone()]);
    packet[segment.start + 6..segment.start + 8].copy_from_slice(&udp.to_be_bytes());
}

fn set_destination_port(packet: &mut [u8], udp_offset: usize) {
    packet[udp_offset + 2..udp_offset + 4].copy_from_slice(&DNS_PORT.to_be_bytes());
}

fn octets<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
