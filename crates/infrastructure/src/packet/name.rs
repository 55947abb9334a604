//! DNS name decompression (RFC 1035 section 4.1.4).

use ferrous_dnswire_domain::{DnsName, PacketError};
use smallvec::SmallVec;

/// Maximum number of nested compression jumps.
pub const MAX_POINTER_DEPTH: usize = 10;

const LABEL_TYPE_MASK: u8 = 0xC0;
const LABEL_LITERAL: u8 = 0x00;
const LABEL_POINTER: u8 = 0xC0;

/// Decodes the name starting at `offset` in `msg`.
///
/// Returns the name and the offset immediately after the name as it appears
/// in the stream. When the name ends in a compression pointer this is the
/// byte after the 2-byte pointer, never a position inside the jumped-to
/// region.
pub fn read_name(msg: &[u8], offset: usize) -> Result<(DnsName, usize), PacketError> {
    read_name_at(msg, offset, 0)
}

/// Same as [`read_name`] with an explicit jump depth. Each pointer recurses
/// with `depth + 1`; anything deeper than [`MAX_POINTER_DEPTH`] is rejected,
/// which also bounds pointer cycles.
pub fn read_name_at(
    msg: &[u8],
    mut offset: usize,
    depth: usize,
) -> Result<(DnsName, usize), PacketError> {
    if depth > MAX_POINTER_DEPTH {
        return Err(PacketError::PointerDepthExceeded);
    }

    let mut labels: SmallVec<[&[u8]; 8]> = SmallVec::new();

    loop {
        let len = *msg.get(offset).ok_or(PacketError::TruncatedName)?;
        offset += 1;

        match len & LABEL_TYPE_MASK {
            LABEL_LITERAL if len == 0 => {
                return Ok((join_labels(&labels, None), offset));
            }
            LABEL_LITERAL => {
                let end = offset + usize::from(len);
                let label = msg.get(offset..end).ok_or(PacketError::TruncatedName)?;
                labels.push(label);
                offset = end;
            }
            LABEL_POINTER => {
                let low = *msg.get(offset).ok_or(PacketError::TruncatedName)?;
                let target = (usize::from(len & !LABEL_TYPE_MASK) << 8) | usize::from(low);
                let (suffix, _) = read_name_at(msg, target, depth + 1)?;
                return Ok((join_labels(&labels, Some(&suffix)), offset + 1));
            }
            _ => return Err(PacketError::InvalidLabelType(len)),
        }
    }
}

fn join_labels(labels: &[&[u8]], suffix: Option<&DnsName>) -> DnsName {
    let suffix = suffix.map(DnsName::as_bytes).unwrap_or_default();
    let capacity = labels.iter().map(|l| l.len() + 1).sum::<usize>() + suffix.len();
    let mut out = Vec::with_capacity(capacity);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            out.push(b'.');
        }
        out.extend_from_slice(label);
    }
    if !suffix.is_empty() {
        if !out.is_empty() {
            out.push(b'.');
        }
        out.extend_from_slice(suffix);
    }

    DnsName::from_bytes(out)
}
