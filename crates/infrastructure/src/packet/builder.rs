//! Builds UDP datagrams with valid checksums around a payload.

use std::net::{SocketAddrV4, SocketAddrV6};

use ferrous_dnswire_domain::protocol::PROTO_UDP;
use ferrous_dnswire_domain::PacketError;

use super::checksum::{ipv4_header_checksum, udp_checksum_v4, udp_checksum_v6};
use super::classifier::{IPV4_MIN_HEADER_LEN, UDP_HEADER_LEN};
use super::ipv6_ext::IPV6_HEADER_LEN;

const DEFAULT_TTL: u8 = 255;

/// IPv4 header without options (IHL 5), TTL 255, no fragmentation.
pub fn build_ipv4_udp_packet(
    source: SocketAddrV4,
    destination: SocketAddrV4,
    payload: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let total_len = IPV4_MIN_HEADER_LEN + UDP_HEADER_LEN + payload.len();
    let total_len_field =
        u16::try_from(total_len).map_err(|_| PacketError::PayloadTooLarge(payload.len()))?;
    let udp_len = total_len_field - IPV4_MIN_HEADER_LEN as u16;

    let mut packet = vec![0u8; total_len];
    packet[0] = 0x45;
    packet[2..4].copy_from_slice(&total_len_field.to_be_bytes());
    packet[8] = DEFAULT_TTL;
    packet[9] = PROTO_UDP;
    packet[12..16].copy_from_slice(&source.ip().octets());
    packet[16..20].copy_from_slice(&destination.ip().octets());

    let header_checksum = ipv4_header_checksum(&packet[..IPV4_MIN_HEADER_LEN]);
    packet[10..12].copy_from_slice(&header_checksum.to_be_bytes());

    let udp = &mut packet[IPV4_MIN_HEADER_LEN..];
    write_udp_header(udp, source.port(), destination.port(), udp_len, payload);
    let checksum = udp_checksum_v4(*source.ip(), *destination.ip(), udp);
    udp[6..8].copy_from_slice(&checksum.to_be_bytes());

    Ok(packet)
}

/// IPv6 fixed header with UDP as next header, hop limit 255.
pub fn build_ipv6_udp_packet(
    source: SocketAddrV6,
    destination: SocketAddrV6,
    payload: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let udp_len = u16::try_from(UDP_HEADER_LEN + payload.len())
        .map_err(|_| PacketError::PayloadTooLarge(payload.len()))?;

    let mut packet = vec![0u8; IPV6_HEADER_LEN + usize::from(udp_len)];
    packet[0] = 0x60;
    packet[4..6].copy_from_slice(&udp_len.to_be_bytes());
    packet[6] = PROTO_UDP;
    packet[7] = DEFAULT_TTL;
    packet[8..24].copy_from_slice(&source.ip().octets());
    packet[24..40].copy_from_slice(&destination.ip().octets());

    let udp = &mut packet[IPV6_HEADER_LEN..];
    write_udp_header(udp, source.port(), destination.port(), udp_len, payload);
    let checksum = udp_checksum_v6(*source.ip(), *destination.ip(), udp);
    udp[6..8].copy_from_slice(&checksum.to_be_bytes());

    Ok(packet)
}

fn write_udp_header(udp: &mut [u8], src_port: u16, dst_port: u16, len: u16, payload: &[u8]) {
    udp[0..2].copy_from_slice(&src_port.to_be_bytes());
    udp[2..4].copy_from_slice(&dst_port.to_be_bytes());
    udp[4..6].copy_from_slice(&len.to_be_bytes());
    udp[6..8].fill(0);
    udp[UDP_HEADER_LEN..].copy_from_slice(payload);
}
