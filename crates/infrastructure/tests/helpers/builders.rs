#![allow(dead_code)]
use ferrous_dnswire_infrastructure::packet::{build_ipv4_udp_packet, build_ipv6_udp_packet};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_AAAA: u16 = 28;

pub const CLIENT_V4: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);
pub const SERVER_V4: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);
pub const CLIENT_V6: Ipv6Addr = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x100);
pub const SERVER_V6: Ipv6Addr = Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888);
pub const CLIENT_PORT: u16 = 40000;

/// Encodes a dotted name as uncompressed labels.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Builds DNS messages. Answer owner names are compressed to point at the
/// first question.
pub struct DnsMessageBuilder {
    id: u16,
    response: bool,
    questions: Vec<String>,
    answers: Vec<(u16, Vec<u8>)>,
    declared_answers: Option<u16>,
}

impl DnsMessageBuilder {
    pub fn query(name: &str) -> Self {
        Self {
            id: 0x1234,
            response: false,
            questions: vec![name.to_string()],
            answers: Vec::new(),
            declared_answers: None,
        }
    }

    pub fn response(name: &str) -> Self {
        Self {
            response: true,
            ..Self::query(name)
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn question(mut self, name: &str) -> Self {
        self.questions.push(name.to_string());
        self
    }

    pub fn answer_a(self, addr: Ipv4Addr) -> Self {
        self.answer(TYPE_A, addr.octets().to_vec())
    }

    pub fn answer_aaaa(self, addr: Ipv6Addr) -> Self {
        self.answer(TYPE_AAAA, addr.octets().to_vec())
    }

    pub fn answer(mut self, rtype: u16, rdata: Vec<u8>) -> Self {
        self.answers.push((rtype, rdata));
        self
    }

    /// Overrides ANCOUNT independently of the records actually written.
    pub fn declared_answers(mut self, count: u16) -> Self {
        self.declared_answers = Some(count);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut msg = Vec::with_capacity(512);
        let flags: u16 = if self.response { 0x8180 } else { 0x0100 };
        let an_count = self
            .declared_answers
            .unwrap_or(self.answers.len() as u16);

        msg.extend_from_slice(&self.id.to_be_bytes());
        msg.extend_from_slice(&flags.to_be_bytes());
        msg.extend_from_slice(&(self.questions.len() as u16).to_be_bytes());
        msg.extend_from_slice(&an_count.to_be_bytes());
        msg.extend_from_slice(&[0, 0, 0, 0]);

        for name in &self.questions {
            msg.extend_from_slice(&encode_name(name));
            msg.extend_from_slice(&TYPE_A.to_be_bytes());
            msg.extend_from_slice(&1u16.to_be_bytes());
        }

        for (rtype, rdata) in &self.answers {
            msg.extend_from_slice(&[0xC0, 0x0C]);
            msg.extend_from_slice(&rtype.to_be_bytes());
            msg.extend_from_slice(&1u16.to_be_bytes());
            msg.extend_from_slice(&300u32.to_be_bytes());
            msg.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            msg.extend_from_slice(rdata);
        }

        msg
    }
}

/// Client to server query over IPv4.
pub fn ipv4_query_packet(payload: &[u8]) -> Vec<u8> {
    build_ipv4_udp_packet(
        SocketAddrV4::new(CLIENT_V4, CLIENT_PORT),
        SocketAddrV4::new(SERVER_V4, 53),
        payload,
    )
    .unwrap()
}

/// Server to client response over IPv4.
pub fn ipv4_response_packet(payload: &[u8]) -> Vec<u8> {
    build_ipv4_udp_packet(
        SocketAddrV4::new(SERVER_V4, 53),
        SocketAddrV4::new(CLIENT_V4, CLIENT_PORT),
        payload,
    )
    .unwrap()
}

pub fn ipv6_query_packet(payload: &[u8]) -> Vec<u8> {
    build_ipv6_udp_packet(
        SocketAddrV6::new(CLIENT_V6, CLIENT_PORT, 0, 0),
        SocketAddrV6::new(SERVER_V6, 53, 0, 0),
        payload,
    )
    .unwrap()
}

pub fn ipv6_response_packet(payload: &[u8]) -> Vec<u8> {
    build_ipv6_udp_packet(
        SocketAddrV6::new(SERVER_V6, 53, 0, 0),
        SocketAddrV6::new(CLIENT_V6, CLIENT_PORT, 0, 0),
        payload,
    )
    .unwrap()
}

/// UDP header with a zero checksum followed by `payload`.
pub fn udp_segment(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut segment = Vec::with_capacity(8 + payload.len());
    segment.extend_from_slice(&src_port.to_be_bytes());
    segment.extend_from_slice(&dst_port.to_be_bytes());
    segment.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    segment.extend_from_slice(&[0, 0]);
    segment.extend_from_slice(payload);
    segment
}

/// One IPv6 extension header: its type and its bytes. The first byte (next
/// header) is filled in by [`ipv6_packet_with_chain`].
pub struct ExtHeader {
    pub kind: u8,
    pub bytes: Vec<u8>,
}

pub fn hop_by_hop() -> ExtHeader {
    // PadN option filling the 6 option bytes
    ExtHeader {
        kind: 0,
        bytes: vec![0, 0, 1, 4, 0, 0, 0, 0],
    }
}

pub fn destination_options(extra_units: u8) -> ExtHeader {
    let len = (usize::from(extra_units) + 1) * 8;
    let mut bytes = vec![0u8; len];
    bytes[1] = extra_units;
    bytes[2] = 1;
    bytes[3] = (len - 4) as u8;
    ExtHeader { kind: 60, bytes }
}

pub fn routing() -> ExtHeader {
    // Type 0 routing header, no segments left
    ExtHeader {
        kind: 43,
        bytes: vec![0, 0, 0, 0, 0, 0, 0, 0],
    }
}

pub fn fragment(offset_units: u16, more: bool) -> ExtHeader {
    let word = (offset_units << 3) | u16::from(more);
    let mut bytes = vec![0u8; 8];
    bytes[2..4].copy_from_slice(&word.to_be_bytes());
    bytes[4..8].copy_from_slice(&0xdead_beefu32.to_be_bytes());
    ExtHeader { kind: 44, bytes }
}

pub fn authentication() -> ExtHeader {
    // 12 bytes: payload length field is (12 / 4) - 2 = 1
    let mut bytes = vec![0u8; 12];
    bytes[1] = 1;
    bytes[4..8].copy_from_slice(&0x100u32.to_be_bytes());
    ExtHeader { kind: 51, bytes }
}

pub fn esp() -> ExtHeader {
    ExtHeader {
        kind: 50,
        bytes: vec![0u8; 16],
    }
}

pub fn unknown_header(kind: u8) -> ExtHeader {
    ExtHeader {
        kind,
        bytes: vec![0u8; 8],
    }
}

/// IPv6 packet from client to server with the given extension chain before
/// a UDP query segment.
pub fn ipv6_packet_with_chain(chain: Vec<ExtHeader>, segment: &[u8]) -> Vec<u8> {
    let ext_len: usize = chain.iter().map(|h| h.bytes.len()).sum();
    let payload_len = (ext_len + segment.len()) as u16;

    let mut packet = vec![0u8; 40];
    packet[0] = 0x60;
    packet[4..6].copy_from_slice(&payload_len.to_be_bytes());
    packet[6] = chain.first().map(|h| h.kind).unwrap_or(17);
    packet[7] = 64;
    packet[8..24].copy_from_slice(&CLIENT_V6.octets());
    packet[24..40].copy_from_slice(&SERVER_V6.octets());

    let kinds: Vec<u8> = chain.iter().map(|h| h.kind).collect();
    for (i, mut header) in chain.into_iter().enumerate() {
        header.bytes[0] = kinds.get(i + 1).copied().unwrap_or(17);
        packet.extend_from_slice(&header.bytes);
    }
    packet.extend_from_slice(segment);
    packet
}

/// Sets the IPv4 flags/fragment-offset word. The header checksum is left
/// stale, which the decoder does not check.
pub fn set_ipv4_fragment_word(packet: &mut [u8], word: u16) {
    packet[6..8].copy_from_slice(&word.to_be_bytes());
}

/// One's complement sum of 16-bit words, padded with a zero byte when odd.
pub fn ones_complement_sum(chunks: &[&[u8]]) -> u16 {
    let mut sum: u32 = 0;
    for chunk in chunks {
        let mut iter = chunk.chunks(2);
        for word in iter.by_ref() {
            let hi = u32::from(word[0]) << 8;
            let lo = u32::from(word.get(1).copied().unwrap_or(0));
            sum += hi | lo;
        }
    }
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}

/// True when the IPv4 header checksum stored in `packet` is correct.
pub fn ipv4_header_checksum_valid(packet: &[u8]) -> bool {
    let ihl = usize::from(packet[0] & 0x0F) * 4;
    ones_complement_sum(&[&packet[..ihl]]) == 0xFFFF
}

/// True when the UDP checksum of an IPv4 packet without options is correct.
pub fn ipv4_udp_checksum_valid(packet: &[u8]) -> bool {
    let segment = &packet[20..];
    let mut pseudo = Vec::with_capacity(12);
    pseudo.extend_from_slice(&packet[12..20]);
    pseudo.extend_from_slice(&[0, 17]);
    pseudo.extend_from_slice(&(segment.len() as u16).to_be_bytes());
    ones_complement_sum(&[&pseudo, segment]) == 0xFFFF
}

/// True when the UDP checksum at `udp_offset` of an IPv6 packet is correct.
pub fn ipv6_udp_checksum_valid(packet: &[u8], udp_offset: usize) -> bool {
    let segment = &packet[udp_offset..];
    let mut pseudo = Vec::with_capacity(40);
    pseudo.extend_from_slice(&packet[8..40]);
    pseudo.extend_from_slice(&(segment.len() as u32).to_be_bytes());
    pseudo.extend_from_slice(&[0, 0, 0, 17]);
    ones_complement_sum(&[&pseudo, segment]) == 0xFFFF
}
