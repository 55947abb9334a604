use ferrous_dnswire_application::ports::PacketDecoder;
use ferrous_dnswire_domain::{CapturedDns, PacketError};

use super::{extract_dns, rewrite_destination, summarize_packet};

/// [`PacketDecoder`] backed by this crate's wire codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct WirePacketDecoder;

impl WirePacketDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl PacketDecoder for WirePacketDecoder {
    fn decode(&self, packet: &[u8]) -> Result<CapturedDns, PacketError> {
        extract_dns(packet)
    }

    fn rewrite_destination(&self, packet: &mut [u8], target: &str) -> Result<(), PacketError> {
        rewrite_destination(packet, target)
    }

    fn summarize(&self, packet: &[u8]) -> String {
        summarize_packet(packet)
    }
}
