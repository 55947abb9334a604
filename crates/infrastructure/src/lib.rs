//! Ferrous DNSWire Infrastructure Layer
pub mod packet;
pub mod reserved;
pub mod sink;

pub use packet::WirePacketDecoder;
pub use reserved::DefaultReservedLookup;
pub use sink::{JsonLinesSink, TracingEventSink};
