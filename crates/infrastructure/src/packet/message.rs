//! DNS message decoding: header, question section and A/AAAA answers.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ferrous_dnswire_domain::{DnsMessageView, PacketError};

use super::name::read_name;

pub const DNS_HEADER_LEN: usize = 12;

const QR_BIT: u16 = 0x8000;
/// QTYPE + QCLASS
const QUESTION_TRAILER_LEN: usize = 4;
/// TYPE + CLASS + TTL + RDLENGTH
const RR_FIXED_LEN: usize = 10;
/// Smallest possible question: root name + QTYPE + QCLASS.
const MIN_QUESTION_LEN: usize = 1 + QUESTION_TRAILER_LEN;
/// Smallest possible resource record: root owner name + fixed part.
const MIN_RECORD_LEN: usize = 1 + RR_FIXED_LEN;

const TYPE_A: u16 = 1;
const TYPE_AAAA: u16 = 28;

/// Decodes a DNS message from a UDP payload.
///
/// Answers are only interpreted for responses; a query carrying answer
/// records still yields an empty address list. A/AAAA records whose RDLENGTH
/// does not match the address size, and records of any other type, are
/// skipped. Any bounds violation fails the whole message.
pub fn decode_message(payload: &[u8]) -> Result<DnsMessageView, PacketError> {
    if payload.len() < DNS_HEADER_LEN {
        return Err(PacketError::TooShort);
    }

    let id = read_u16(payload, 0);
    let flags = read_u16(payload, 2);
    let qd_count = usize::from(read_u16(payload, 4));
    let an_count = usize::from(read_u16(payload, 6));
    let is_query = flags & QR_BIT == 0;

    let mut offset = DNS_HEADER_LEN;
    let mut question_names = Vec::with_capacity(qd_count.min(payload.len() / MIN_QUESTION_LEN));

    for _ in 0..qd_count {
        let (name, next) = read_name(payload, offset)?;
        offset = next
            .checked_add(QUESTION_TRAILER_LEN)
            .filter(|end| *end <= payload.len())
            .ok_or(PacketError::TruncatedRecord)?;
        question_names.push(name);
    }

    if is_query || an_count == 0 {
        return Ok(DnsMessageView {
            id,
            is_query,
            question_names,
            resolved_addresses: Vec::new(),
        });
    }

    let mut resolved_addresses =
        Vec::with_capacity(an_count.min(payload.len() / MIN_RECORD_LEN));

    for _ in 0..an_count {
        let (_, next) = read_name(payload, offset)?;
        let fixed = payload
            .get(next..next + RR_FIXED_LEN)
            .ok_or(PacketError::TruncatedRecord)?;

        let rtype = u16::from_be_bytes([fixed[0], fixed[1]]);
        let rdlength = usize::from(u16::from_be_bytes([fixed[8], fixed[9]]));
        let rdata_start = next + RR_FIXED_LEN;
        let rdata = payload
            .get(rdata_start..rdata_start + rdlength)
            .ok_or(PacketError::TruncatedRecord)?;
        offset = rdata_start + rdlength;

        if let Some(addr) = address_from_rdata(rtype, rdata) {
            resolved_addresses.push(addr);
        }
    }

    Ok(DnsMessageView {
        id,
        is_query,
        question_names,
        resolved_addresses,
    })
}

fn address_from_rdata(rtype: u16, rdata: &[u8]) -> Option<IpAddr> {
    match rtype {
        TYPE_A => {
            let octets: [u8; 4] = rdata.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        TYPE_AAAA => {
            let octets: [u8; 16] = rdata.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}
