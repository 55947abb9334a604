//! Internet checksums (RFC 791, RFC 768, RFC 8200).
//!
//! All functions treat the checksum field of their input as zero, so they can
//! be run over a header that already carries a (possibly stale) checksum.

use std::net::{Ipv4Addr, Ipv6Addr};

use ferrous_dnswire_domain::protocol::PROTO_UDP;

const IPV4_CHECKSUM_OFFSET: usize = 10;
const UDP_CHECKSUM_OFFSET: usize = 6;

/// One's complement checksum of an IPv4 header.
pub fn ipv4_header_checksum(header: &[u8]) -> u16 {
    !fold(sum_words(header, Some(IPV4_CHECKSUM_OFFSET)))
}

/// UDP checksum over an IPv4 pseudo-header and the full UDP segment.
///
/// Never returns 0: a computed zero is transmitted as `0xFFFF` so the
/// checksum stays active.
pub fn udp_checksum_v4(src: Ipv4Addr, dst: Ipv4Addr, segment: &[u8]) -> u16 {
    let mut sum = sum_words(&src.octets(), None);
    sum += sum_words(&dst.octets(), None);
    sum += u64::from(PROTO_UDP);
    sum += segment.len() as u64;
    sum += sum_words(segment, Some(UDP_CHECKSUM_OFFSET));
    finish_udp(sum)
}

/// UDP checksum over an IPv6 pseudo-header and the full UDP segment.
///
/// The upper-layer length is 32 bits wide in the IPv6 pseudo-header.
pub fn udp_checksum_v6(src: Ipv6Addr, dst: Ipv6Addr, segment: &[u8]) -> u16 {
    let len = segment.len() as u64;
    let mut sum = sum_words(&src.octets(), None);
    sum += sum_words(&dst.octets(), None);
    sum += (len >> 16) & 0xFFFF;
    sum += len & 0xFFFF;
    sum += u64::from(PROTO_UDP);
    sum += sum_words(segment, Some(UDP_CHECKSUM_OFFSET));
    finish_udp(sum)
}

fn finish_udp(sum: u64) -> u16 {
    match !fold(sum) {
        0 => 0xFFFF,
        checksum => checksum,
    }
}

/// Sums big-endian 16-bit words, skipping the word at `skip` and padding an
/// odd trailing byte with a zero low byte.
fn sum_words(data: &[u8], skip: Option<usize>) -> u64 {
    let mut sum: u64 = 0;
    let mut chunks = data.chunks_exact(2);
    for (i, word) in chunks.by_ref().enumerate() {
        if Some(i * 2) == skip {
            continue;
        }
        sum += u64::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let [last] = chunks.remainder() {
        sum += u64::from(*last) << 8;
    }
    sum
}

fn fold(mut sum: u64) -> u16 {
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_words_pads_odd_tail() {
        assert_eq!(sum_words(&[0x12, 0x34, 0x56], None), 0x1234 + 0x5600);
    }

    #[test]
    fn test_sum_words_skips_field() {
        assert_eq!(sum_words(&[0x00, 0x01, 0xFF, 0xFF, 0x00, 0x02], Some(2)), 3);
    }

    #[test]
    fn test_fold_carries_repeatedly() {
        assert_eq!(fold(0x1_FFFF), 0x0001);
        assert_eq!(fold(0xFFFF_FFFF), 0xFFFF);
    }

    #[test]
    fn test_rfc1071_example_header() {
        // Classic example header with checksum 0xb861.
        let header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0xb8, 0x61, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ];
        assert_eq!(ipv4_header_checksum(&header), 0xb861);
    }
}
