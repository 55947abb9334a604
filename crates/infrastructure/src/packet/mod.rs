//! Wire codec for captured IPv4/IPv6 packets carrying DNS over UDP.
//!
//! Everything here is synchronous and allocation-bounded; decoded values are
//! owned copies and never borrow the input buffer.

pub mod builder;
pub mod checksum;
pub mod classifier;
pub mod decoder;
pub mod ipv6_ext;
pub mod message;
pub mod name;
pub mod rewrite;
pub mod summary;

pub use builder::{build_ipv4_udp_packet, build_ipv6_udp_packet};
pub use checksum::{ipv4_header_checksum, udp_checksum_v4, udp_checksum_v6};
pub use classifier::{extract_dns, extract_udp};
pub use decoder::WirePacketDecoder;
pub use message::decode_message;
pub use name::read_name;
pub use rewrite::rewrite_destination;
pub use summary::summarize_packet;
