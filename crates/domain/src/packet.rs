use serde::Serialize;
use std::fmt;
use std::net::SocketAddr;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Reads the version nibble of the first header byte.
    pub fn from_first_byte(byte: u8) -> Option<Self> {
        match byte >> 4 {
            4 => Some(IpVersion::V4),
            6 => Some(IpVersion::V6),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => f.write_str("IPv4"),
            IpVersion::V6 => f.write_str("IPv6"),
        }
    }
}

/// Where the transport header lives inside a network-layer packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Addressing {
    pub ip_version: IpVersion,
    /// Byte offset of the transport header from the start of the packet.
    pub transport_offset: usize,
    pub transport_protocol: u8,
}

/// A located UDP datagram inside a captured packet.
///
/// Holds offsets into the caller's buffer rather than borrowing it, so the
/// value stays valid after the buffer is mutated or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdpDatagram {
    pub addressing: Addressing,
    pub source: SocketAddr,
    pub destination: SocketAddr,
    /// Declared UDP length field (header + payload).
    pub udp_length: u16,
    /// Payload byte range, clamped to the captured length.
    pub payload: Range<usize>,
}

impl UdpDatagram {
    pub fn payload<'a>(&self, packet: &'a [u8]) -> &'a [u8] {
        packet.get(self.payload.clone()).unwrap_or_default()
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
