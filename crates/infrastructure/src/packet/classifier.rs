//! Locates the UDP datagram inside a raw IPv4 or IPv6 packet and hands the
//! DNS payload to the message decoder.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use ferrous_dnswire_domain::protocol::{DNS_PORT, PROTO_UDP};
use ferrous_dnswire_domain::{Addressing, CapturedDns, IpVersion, PacketError, UdpDatagram};

use super::ipv6_ext::{walk_to_udp, IPV6_HEADER_LEN};
use super::message::decode_message;

pub const IPV4_MIN_HEADER_LEN: usize = 20;
pub const UDP_HEADER_LEN: usize = 8;

const IPV4_MORE_FRAGMENTS: u16 = 0x2000;
const IPV4_FRAGMENT_OFFSET_MASK: u16 = 0x1FFF;

/// A UDP datagram plus what the rewriter needs to know about the path to it.
#[derive(Debug, Clone)]
pub(crate) struct LocatedUdp {
    pub datagram: UdpDatagram,
    /// IPv4 header length, or 0 for IPv6.
    pub ipv4_header_len: usize,
    /// An IPv6 Routing header precedes the UDP header.
    pub routed: bool,
}

/// Decodes the DNS message carried by a UDP/53 packet.
///
/// Only first or unfragmented datagrams are accepted. Either side of the
/// exchange may use port 53, so both queries and responses pass.
pub fn extract_dns(packet: &[u8]) -> Result<CapturedDns, PacketError> {
    let datagram = extract_udp(packet)?;
    let (src_port, dst_port) = (datagram.source.port(), datagram.destination.port());
    if src_port != DNS_PORT && dst_port != DNS_PORT {
        return Err(PacketError::WrongPort { src_port, dst_port });
    }

    let message = decode_message(datagram.payload(packet))?;
    Ok(CapturedDns { datagram, message })
}

/// Locates the UDP datagram in any IPv4/IPv6 packet, whatever its ports.
pub fn extract_udp(packet: &[u8]) -> Result<UdpDatagram, PacketError> {
    locate_udp(packet).map(|located| located.datagram)
}

pub(crate) fn locate_udp(packet: &[u8]) -> Result<LocatedUdp, PacketError> {
    let first = *packet.first().ok_or(PacketError::TooShort)?;
    match IpVersion::from_first_byte(first) {
        Some(IpVersion::V4) => locate_udp_v4(packet),
        Some(IpVersion::V6) => locate_udp_v6(packet),
        None => Err(PacketError::InvalidVersion(first >> 4)),
    }
}

fn locate_udp_v4(packet: &[u8]) -> Result<LocatedUdp, PacketError> {
    if packet.len() < IPV4_MIN_HEADER_LEN {
        return Err(PacketError::TooShort);
    }

    let ihl = usize::from(packet[0] & 0x0F) * 4;
    if ihl < IPV4_MIN_HEADER_LEN || ihl > packet.len() {
        return Err(PacketError::InvalidHeaderLength(ihl));
    }
    if packet.len() < ihl + UDP_HEADER_LEN {
        return Err(PacketError::TruncatedHeader);
    }

    let fragment = u16::from_be_bytes([packet[6], packet[7]]);
    if fragment & IPV4_MORE_FRAGMENTS != 0 || fragment & IPV4_FRAGMENT_OFFSET_MASK != 0 {
        return Err(PacketError::Fragmented);
    }

    let protocol = packet[9];
    if protocol != PROTO_UDP {
        return Err(PacketError::WrongProtocol(protocol));
    }

    let src = Ipv4Addr::new(packet[12], packet[13], packet[14], packet[15]);
    let dst = Ipv4Addr::new(packet[16], packet[17], packet[18], packet[19]);
    let addressing = Addressing {
        ip_version: IpVersion::V4,
        transport_offset: ihl,
        transport_protocol: PROTO_UDP,
    };

    Ok(LocatedUdp {
        datagram: read_udp_header(packet, addressing, src.into(), dst.into())?,
        ipv4_header_len: ihl,
        routed: false,
    })
}

fn locate_udp_v6(packet: &[u8]) -> Result<LocatedUdp, PacketError> {
    if packet.len() < IPV6_HEADER_LEN {
        return Err(PacketError::TooShort);
    }

    let payload_len = usize::from(u16::from_be_bytes([packet[4], packet[5]]));
    let walk = walk_to_udp(packet, packet[6], IPV6_HEADER_LEN, payload_len)?;
    if walk.remaining < UDP_HEADER_LEN || packet.len() < walk.transport_offset + UDP_HEADER_LEN {
        return Err(PacketError::TruncatedHeader);
    }

    let src = ipv6_at(packet, 8);
    let dst = ipv6_at(packet, 24);
    let addressing = Addressing {
        ip_version: IpVersion::V6,
        transport_offset: walk.transport_offset,
        transport_protocol: PROTO_UDP,
    };

    Ok(LocatedUdp {
        datagram: read_udp_header(packet, addressing, src.into(), dst.into())?,
        ipv4_header_len: 0,
        routed: walk.routed,
    })
}

/// Reads ports and length from the UDP header at the transport offset.
///
/// The payload runs to the declared UDP length, clamped to the captured
/// buffer; an empty or inverted range is rejected.
fn read_udp_header(
    packet: &[u8],
    addressing: Addressing,
    src: IpAddr,
    dst: IpAddr,
) -> Result<UdpDatagram, PacketError> {
    let offset = addressing.transport_offset;
    let header = packet
        .get(offset..offset + UDP_HEADER_LEN)
        .ok_or(PacketError::TruncatedHeader)?;

    let src_port = u16::from_be_bytes([header[0], header[1]]);
    let dst_port = u16::from_be_bytes([header[2], header[3]]);
    let udp_length = u16::from_be_bytes([header[4], header[5]]);

    let start = offset + UDP_HEADER_LEN;
    let end = (offset + usize::from(udp_length)).min(packet.len());
    if start >= end {
        return Err(PacketError::TruncatedHeader);
    }

    Ok(UdpDatagram {
        addressing,
        source: SocketAddr::new(src, src_port),
        destination: SocketAddr::new(dst, dst_port),
        udp_length,
        payload: start..end,
    })
}

fn ipv6_at(packet: &[u8], offset: usize) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&packet[offset..offset + 16]);
    Ipv6Addr::from(octets)
}
