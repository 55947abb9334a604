//! IPv6 extension header chain walking (RFC 8200 section 4).

use ferrous_dnswire_domain::protocol::{
    PROTO_AH, PROTO_GRE, PROTO_HOPOPT, PROTO_ICMP, PROTO_IPV6_FRAG, PROTO_IPV6_ICMP,
    PROTO_IPV6_NONXT, PROTO_IPV6_OPTS, PROTO_IPV6_ROUTE, PROTO_SCTP, PROTO_TCP, PROTO_UDP,
};
use ferrous_dnswire_domain::PacketError;

pub const IPV6_HEADER_LEN: usize = 40;

const FRAGMENT_HEADER_LEN: usize = 8;
const FRAGMENT_OFFSET_MASK: u16 = 0xFFF8;
const MORE_FRAGMENTS: u16 = 0x0001;

/// Result of walking an extension chain up to the UDP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionWalk {
    /// Byte offset of the UDP header.
    pub transport_offset: usize,
    /// Bytes of the declared payload length not consumed by extension headers.
    pub remaining: usize,
    /// A Routing header was traversed; the pseudo-header destination of the
    /// UDP checksum is then the final segment, not the fixed header address.
    pub routed: bool,
}

/// Follows the next-header chain from `next_header` at byte `offset` until
/// the UDP header is reached.
///
/// `payload_len` is the fixed header's payload length field; every header
/// must fit inside it and inside the captured buffer. ESP and unknown header
/// types end the walk with [`PacketError::UnsupportedExtensionChain`];
/// well-known transport protocols other than UDP with
/// [`PacketError::WrongProtocol`].
pub fn walk_to_udp(
    packet: &[u8],
    mut next_header: u8,
    mut offset: usize,
    payload_len: usize,
) -> Result<ExtensionWalk, PacketError> {
    let mut remaining = payload_len;
    let mut routed = false;

    while next_header != PROTO_UDP {
        if remaining == 0 || offset >= packet.len() {
            return Err(PacketError::TruncatedHeader);
        }

        let (following, size) = match next_header {
            PROTO_HOPOPT | PROTO_IPV6_ROUTE | PROTO_IPV6_OPTS => {
                let header = packet
                    .get(offset..offset + 2)
                    .ok_or(PacketError::TruncatedHeader)?;
                routed |= next_header == PROTO_IPV6_ROUTE;
                (header[0], (usize::from(header[1]) + 1) * 8)
            }
            PROTO_IPV6_FRAG => {
                let header = packet
                    .get(offset..offset + FRAGMENT_HEADER_LEN)
                    .ok_or(PacketError::TruncatedHeader)?;
                let offset_flags = u16::from_be_bytes([header[2], header[3]]);
                if offset_flags & FRAGMENT_OFFSET_MASK != 0 || offset_flags & MORE_FRAGMENTS != 0 {
                    return Err(PacketError::Fragmented);
                }
                (header[0], FRAGMENT_HEADER_LEN)
            }
            PROTO_AH => {
                let header = packet
                    .get(offset..offset + 2)
                    .ok_or(PacketError::TruncatedHeader)?;
                (header[0], (usize::from(header[1]) + 2) * 4)
            }
            // Upper-layer protocols end the chain: the packet is simply not UDP.
            PROTO_TCP | PROTO_ICMP | PROTO_IPV6_ICMP | PROTO_SCTP | PROTO_GRE
            | PROTO_IPV6_NONXT => return Err(PacketError::WrongProtocol(next_header)),
            other => return Err(PacketError::UnsupportedExtensionChain(other)),
        };

        if offset + size > packet.len() || size > remaining {
            return Err(PacketError::TruncatedHeader);
        }

        next_header = following;
        offset += size;
        remaining -= size;
    }

    Ok(ExtensionWalk {
        transport_offset: offset,
        remaining,
        routed,
    })
}
