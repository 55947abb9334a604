mod dns_event_sink;
mod packet_decoder;

pub use dns_event_sink::DnsEventSink;
pub use packet_decoder::PacketDecoder;

// Re-export for convenience
pub use ferrous_dnswire_domain::ReservedAddressLookup;
