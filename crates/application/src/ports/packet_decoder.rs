use ferrous_dnswire_domain::{CapturedDns, PacketError};

/// Wire codec for captured network-layer packets.
///
/// Decoding is pure and synchronous; implementations must not keep any
/// reference to the buffer past the call.
pub trait PacketDecoder: Send + Sync {
    fn decode(&self, packet: &[u8]) -> Result<CapturedDns, PacketError>;

    /// Points the packet at `target`:53 and repairs its checksums. On error
    /// the buffer is left untouched.
    fn rewrite_destination(&self, packet: &mut [u8], target: &str) -> Result<(), PacketError>;

    /// One-line description for logging, also for packets `decode` rejects.
    fn summarize(&self, packet: &[u8]) -> String;
}
