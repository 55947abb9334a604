//! One-line human-readable packet descriptions for debug logging.

use std::net::Ipv4Addr;

use ferrous_dnswire_domain::protocol::{ip_protocol_name, PROTO_ICMP, PROTO_TCP, PROTO_UDP};

use super::classifier::{IPV4_MIN_HEADER_LEN, UDP_HEADER_LEN};

const TCP_MIN_HEADER_LEN: usize = 20;
const ICMP_HEADER_LEN: usize = 4;

const TCP_FIN: u8 = 0x01;
const TCP_SYN: u8 = 0x02;
const TCP_RST: u8 = 0x04;
const TCP_ACK: u8 = 0x10;

/// Summarizes a raw packet. Never fails: malformed input is described rather
/// than rejected.
pub fn summarize_packet(packet: &[u8]) -> String {
    let Some(&first) = packet.first() else {
        return "invalid packet (too short)".to_string();
    };

    match first >> 4 {
        4 => summarize_ipv4(packet),
        6 => "IPv6 packet".to_string(),
        version => format!("unknown IP version {}", version),
    }
}

fn summarize_ipv4(packet: &[u8]) -> String {
    if packet.len() < IPV4_MIN_HEADER_LEN {
        return "invalid IPv4 packet (too short)".to_string();
    }

    let ihl = usize::from(packet[0] & 0x0F) * 4;
    if ihl < IPV4_MIN_HEADER_LEN || packet.len() < ihl {
        return "invalid IPv4 header length".to_string();
    }

    let total_len = usize::from(u16::from_be_bytes([packet[2], packet[3]])).min(packet.len());
    let src = Ipv4Addr::new(packet[12], packet[13], packet[14], packet[15]);
    let dst = Ipv4Addr::new(packet[16], packet[17], packet[18], packet[19]);
    let l4 = &packet[ihl..];
    // Transport bytes covered by the total length field.
    let l4_len = total_len.saturating_sub(ihl);

    match packet[9] {
        PROTO_TCP => summarize_tcp(l4, l4_len, src, dst),
        PROTO_UDP => summarize_udp(l4, l4_len, src, dst),
        PROTO_ICMP => summarize_icmp(l4, l4_len, src, dst),
        proto => format!(
            "IPv4 {}->{} {} | {}B",
            src,
            dst,
            ip_protocol_name(proto),
            l4_len
        ),
    }
}

fn summarize_tcp(tcp: &[u8], l4_len: usize, src: Ipv4Addr, dst: Ipv4Addr) -> String {
    if tcp.len() < TCP_MIN_HEADER_LEN {
        return format!("IPv4 {}->{} TCP | invalid header", src, dst);
    }

    let src_port = u16::from_be_bytes([tcp[0], tcp[1]]);
    let dst_port = u16::from_be_bytes([tcp[2], tcp[3]]);
    let seq = u32::from_be_bytes([tcp[4], tcp[5], tcp[6], tcp[7]]);
    let ack = u32::from_be_bytes([tcp[8], tcp[9], tcp[10], tcp[11]]);
    let data_offset = usize::from(tcp[12] >> 4) * 4;
    if data_offset < TCP_MIN_HEADER_LEN || tcp.len() < data_offset {
        return format!("IPv4 {}->{} TCP | invalid data offset", src, dst);
    }

    format!(
        "IPv4 {}:{}->{}:{} TCP {} | Seq={} Ack={} | {}B",
        src,
        src_port,
        dst,
        dst_port,
        tcp_flags(tcp[13]),
        seq,
        ack,
        l4_len.saturating_sub(data_offset)
    )
}

fn tcp_flags(flags: u8) -> String {
    let mut out = String::new();
    for (bit, name) in [(TCP_SYN, "SYN"), (TCP_ACK, "ACK"), (TCP_FIN, "FIN"), (TCP_RST, "RST")] {
        if flags & bit != 0 {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
        }
    }
    if out.is_empty() {
        return format!("flags=0x{:02x}", flags);
    }
    out
}

fn summarize_udp(udp: &[u8], l4_len: usize, src: Ipv4Addr, dst: Ipv4Addr) -> String {
    if udp.len() < UDP_HEADER_LEN {
        return format!("IPv4 {}->{} UDP | invalid header", src, dst);
    }

    let src_port = u16::from_be_bytes([udp[0], udp[1]]);
    let dst_port = u16::from_be_bytes([udp[2], udp[3]]);
    let udp_len = usize::from(u16::from_be_bytes([udp[4], udp[5]]));
    let payload = udp_len.min(l4_len).saturating_sub(UDP_HEADER_LEN);

    format!(
        "IPv4 {}:{}->{}:{} UDP | {}B",
        src, src_port, dst, dst_port, payload
    )
}

fn summarize_icmp(icmp: &[u8], l4_len: usize, src: Ipv4Addr, dst: Ipv4Addr) -> String {
    if icmp.len() < ICMP_HEADER_LEN || l4_len < ICMP_HEADER_LEN {
        return format!("IPv4 {}->{} ICMP | too short", src, dst);
    }

    format!(
        "IPv4 {}->{} ICMP {} | {}B",
        src,
        dst,
        icmp_type_name(icmp[0]),
        l4_len - ICMP_HEADER_LEN
    )
}

fn icmp_type_name(icmp_type: u8) -> String {
    match icmp_type {
        0 => "Echo Reply".to_string(),
        3 => "Unreach".to_string(),
        8 => "Echo Req".to_string(),
        11 => "Time Exceeded".to_string(),
        other => format!("Type={}", other),
    }
}
